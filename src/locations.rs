//! Location registry and calendar labels.
//!
//! Locations are loaded once from configuration. After load the registry
//! is read-only except for each location's `visited` flag, which flips
//! false -> true exactly once.

use crate::constants::*;
use crate::motion::{inverse_lerp, lerp, MotionSettings, UniverseCoordinate};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a playable clip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetHandle(pub String);

impl AssetHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-location override of the match tolerance. Axes left out fall back
/// to the visitation defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dx: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dy: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dz: Option<f32>,
}

impl Tolerance {
    /// Same override on every axis
    pub fn uniform(distance: f32) -> Self {
        Self {
            dx: Some(distance),
            dy: Some(distance),
            dz: Some(distance),
        }
    }

    /// Resolve against `defaults`, axis by axis
    pub fn resolve(&self, defaults: Vec3) -> Vec3 {
        Vec3::new(
            self.dx.unwrap_or(defaults.x),
            self.dy.unwrap_or(defaults.y),
            self.dz.unwrap_or(defaults.z),
        )
    }
}

/// Location entry as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSpec {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Tolerance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetHandle>,
}

impl LocationSpec {
    pub fn new(name: &str, x: f32, y: f32, z: f32, asset: &str) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            z,
            tolerance: None,
            asset: Some(AssetHandle::new(asset)),
        }
    }
}

/// A named point in (x, y, zoom) space
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinate: Vec3,
    pub tolerance: Vec3,
    pub asset: Option<AssetHandle>,
    visited: bool,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinate: Vec3, tolerance: Vec3, asset: Option<AssetHandle>) -> Self {
        Self {
            name: name.into(),
            coordinate,
            tolerance: tolerance.abs(),
            asset,
            visited: false,
        }
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Inclusive per-axis box test. Zoom size is compared against `coordinate.z`.
    pub fn contains(&self, at: UniverseCoordinate) -> bool {
        let d = (at.as_vec3() - self.coordinate).abs();
        d.x <= self.tolerance.x && d.y <= self.tolerance.y && d.z <= self.tolerance.z
    }

    /// Mark visited. Returns false if it already was.
    pub fn visit(&mut self) -> bool {
        if self.visited {
            return false;
        }
        self.visited = true;
        true
    }
}

/// Owner of every location
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: Vec<Location>,
}

impl LocationRegistry {
    /// Build from config entries, filling missing tolerances from the defaults
    pub fn from_specs(specs: &[LocationSpec], xy_distance: f32, z_distance: f32) -> Self {
        let default_tolerance = Vec3::new(xy_distance, xy_distance, z_distance);
        let locations = specs
            .iter()
            .map(|spec| {
                if spec.asset.is_none() {
                    log::error!("Location '{}' has no asset; visiting it will skip playback", spec.name);
                }
                let tolerance = spec
                    .tolerance
                    .map(|t| t.resolve(default_tolerance))
                    .unwrap_or(default_tolerance);
                Location::new(
                    spec.name.clone(),
                    Vec3::new(spec.x, spec.y, spec.z),
                    tolerance,
                    spec.asset.clone(),
                )
            })
            .collect();
        Self { locations }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Location> {
        self.locations.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.locations.iter().filter(|l| l.visited).count()
    }
}

// ============================================================================
// Calendar labels
// ============================================================================

/// The date a universe coordinate stands for
#[derive(Debug, Clone, PartialEq)]
pub struct DateLabel {
    pub day: u32,
    pub month: &'static str,
    pub year: i32,
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month, format_year(self.year))
    }
}

impl DateLabel {
    pub fn for_coordinate(at: UniverseCoordinate, settings: &MotionSettings) -> Self {
        Self {
            day: day_for(at.x, settings.max_x),
            month: month_for(at.y, settings.max_y),
            year: year_for(at.zoom_size, settings),
        }
    }
}

/// Day of the span: X across [-max_x, max_x] maps onto 0..=30
pub fn day_for(x: f32, max_x: f32) -> u32 {
    let t = inverse_lerp(-max_x, max_x, x.clamp(-max_x, max_x));
    (t * DAYS_PER_SPAN).round() as u32
}

/// Month of the span: Y across [-max_y, max_y] maps onto twelve rows
pub fn month_for(y: f32, max_y: f32) -> &'static str {
    let t = inverse_lerp(-max_y, max_y, y.clamp(-max_y, max_y));
    let index = ((t * MONTHS_PER_SPAN as f32).floor() as usize).min(MONTHS_PER_SPAN - 1);
    MONTH_NAMES[index]
}

/// Year for a zoom size. Zooming in stretches each zoom unit over more years.
pub fn year_for(zoom_size: f32, settings: &MotionSettings) -> i32 {
    let zoom_in = 1.0 - settings.zoom01(zoom_size);
    let years_per_unit = lerp(MIN_YEARS_PER_UNIT, MAX_YEARS_PER_UNIT, zoom_in.powf(YEAR_ZOOM_EXPONENT));
    BASE_YEAR + (zoom_size * years_per_unit).round() as i32
}

fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BC", -year)
    } else {
        format!("{} AD", year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LocationRegistry {
        LocationRegistry::from_specs(
            &[
                LocationSpec::new("Harbor", 0.0, 0.0, 3.0, "harbor"),
                LocationSpec {
                    name: "Ridge".to_string(),
                    x: 2.0,
                    y: 1.0,
                    z: 2.0,
                    tolerance: Some(Tolerance::uniform(1.0)),
                    asset: None,
                },
            ],
            0.25,
            0.5,
        )
    }

    #[test]
    fn test_default_tolerance_applied() {
        let reg = registry();
        assert_eq!(reg.get(0).unwrap().tolerance, Vec3::new(0.25, 0.25, 0.5));
        assert_eq!(reg.get(1).unwrap().tolerance, Vec3::ONE);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let reg = registry();
        let harbor = reg.get(0).unwrap();
        assert!(harbor.contains(UniverseCoordinate::new(0.25, -0.25, 3.5)));
        assert!(!harbor.contains(UniverseCoordinate::new(0.26, 0.0, 3.0)));
        assert!(!harbor.contains(UniverseCoordinate::new(0.0, 0.0, 3.6)));
    }

    #[test]
    fn test_visit_flips_once() {
        let mut reg = registry();
        let loc = reg.get_mut(0).unwrap();
        assert!(loc.visit());
        assert!(!loc.visit());
        assert!(loc.is_visited());
        assert_eq!(reg.visited_count(), 1);
    }

    #[test]
    fn test_day_and_month_labels() {
        assert_eq!(day_for(-8.0, 8.0), 0);
        assert_eq!(day_for(0.0, 8.0), 15);
        assert_eq!(day_for(100.0, 8.0), 30);
        assert_eq!(month_for(-5.0, 5.0), "Jan");
        assert_eq!(month_for(0.0, 5.0), "Jul");
        assert_eq!(month_for(5.0, 5.0), "Dec");
    }

    #[test]
    fn test_year_label() {
        let settings = MotionSettings::default();
        // Fully zoomed out: 2 years per unit
        assert_eq!(year_for(5.0, &settings), BASE_YEAR + 10);
        // Fully zoomed in: 50 years per unit
        assert_eq!(year_for(1.0, &settings), BASE_YEAR + 50);
    }

    #[test]
    fn test_date_label_display() {
        let settings = MotionSettings::default();
        let label = DateLabel::for_coordinate(UniverseCoordinate::new(0.0, 0.0, 5.0), &settings);
        assert_eq!(label.to_string(), "15 Jul 8990 BC");
    }
}
