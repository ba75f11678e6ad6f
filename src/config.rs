//! Runtime configuration loaded from a JSON file.
//!
//! Every section has defaults, so a partial file (or none at all) still
//! yields a playable universe. `sanitize` repairs values the simulation
//! can't run with and reports each repair.

use crate::constants::*;
use crate::dial::DialSettings;
use crate::locations::LocationSpec;
use crate::motion::{MotionSettings, ZoomPolicy};
use crate::video::ClipSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file used when `UNIVERSE_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "assets/universe.json";
/// Environment variable overriding the config path
pub const CONFIG_PATH_ENV: &str = "UNIVERSE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitationSettings {
    /// X/Y tolerance for locations without an override
    pub xy_distance: f32,
    /// Zoom tolerance for locations without an override
    pub z_distance: f32,
}

impl Default for VisitationSettings {
    fn default() -> Self {
        Self {
            xy_distance: DEFAULT_XY_DISTANCE,
            z_distance: DEFAULT_Z_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub fade_seconds: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            fade_seconds: DEFAULT_FADE_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeScrollSettings {
    pub enabled: bool,
    pub margin_px: f32,
}

impl Default for EdgeScrollSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            margin_px: DEFAULT_EDGE_SCROLL_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    pub seed: u32,
    pub count: usize,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_STARFIELD_SEED,
            count: DEFAULT_STAR_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    pub motion: MotionSettings,
    pub dials: DialSettings,
    pub visitation: VisitationSettings,
    pub playback: PlaybackSettings,
    pub edge_scroll: EdgeScrollSettings,
    pub starfield: StarfieldSettings,
    /// Optional image drawn behind the starfield
    pub background: Option<PathBuf>,
    /// Serve puffin profiling data on the default port
    pub profiling: bool,
    pub clips: Vec<ClipSpec>,
    pub locations: Vec<LocationSpec>,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            motion: MotionSettings::default(),
            dials: DialSettings::default(),
            visitation: VisitationSettings::default(),
            playback: PlaybackSettings::default(),
            edge_scroll: EdgeScrollSettings::default(),
            starfield: StarfieldSettings::default(),
            background: None,
            profiling: false,
            clips: builtin_clips(),
            locations: builtin_locations(),
        }
    }
}

fn builtin_clips() -> Vec<ClipSpec> {
    [
        ("first_light", "First Light", 6.0),
        ("river_delta", "The River Delta", 8.0),
        ("high_pass", "The High Pass", 5.0),
    ]
    .into_iter()
    .map(|(id, title, duration_secs)| ClipSpec {
        id: id.to_string(),
        title: title.to_string(),
        duration_secs,
    })
    .collect()
}

fn builtin_locations() -> Vec<LocationSpec> {
    vec![
        LocationSpec::new("First Light", 0.0, 0.0, 3.0, "first_light"),
        LocationSpec::new("River Delta", -2.5, 1.2, 2.0, "river_delta"),
        LocationSpec::new("High Pass", 3.0, -1.5, 1.5, "high_pass"),
    ]
}

impl UniverseConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load the file, falling back to built-in defaults on any error.
    /// The result is always sanitized.
    pub fn load_or_default(path: &Path) -> Self {
        let mut config = match Self::load(path) {
            Ok(config) => {
                log::info!(
                    "Loaded {} ({} locations, {} clips)",
                    path.display(),
                    config.locations.len(),
                    config.clips.len()
                );
                config
            }
            Err(e) => {
                log::error!("{}; using built-in configuration", e);
                Self::default()
            }
        };
        for repair in config.sanitize() {
            log::warn!("Config: {}", repair);
        }
        config
    }

    /// Path from `UNIVERSE_CONFIG`, or the default location
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Repair values that would stall or break the simulation.
    /// Returns one message per repair.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut repairs = Vec::new();

        let m = &mut self.motion;
        if m.min_zoom > m.max_zoom {
            std::mem::swap(&mut m.min_zoom, &mut m.max_zoom);
            repairs.push(format!(
                "motion.min_zoom > max_zoom, swapped to [{}, {}]",
                m.min_zoom, m.max_zoom
            ));
        }
        if m.min_zoom <= 0.0 {
            repairs.push(format!("motion.min_zoom {} raised to {}", m.min_zoom, ZOOM_RANGE_EPSILON));
            m.min_zoom = ZOOM_RANGE_EPSILON;
            m.max_zoom = m.max_zoom.max(m.min_zoom);
        }
        clamp_min(&mut m.max_x, 0.0, "motion.max_x", &mut repairs);
        clamp_min(&mut m.max_y, 0.0, "motion.max_y", &mut repairs);
        clamp_min(&mut m.move_speed, 0.0, "motion.move_speed", &mut repairs);
        clamp_min(&mut m.move_scale_speed, 0.0, "motion.move_scale_speed", &mut repairs);
        clamp_min(&mut m.zoom_speed, 0.0, "motion.zoom_speed", &mut repairs);
        clamp_min(&mut m.dial_move_damp, 0.0, "motion.dial_move_damp", &mut repairs);
        clamp_min(&mut m.dial_zoom_damp, 0.0, "motion.dial_zoom_damp", &mut repairs);
        clamp_min(&mut m.dial_move_clamp, 0.0, "motion.dial_move_clamp", &mut repairs);
        clamp_min(&mut m.dial_zoom_clamp, 0.0, "motion.dial_zoom_clamp", &mut repairs);
        if let ZoomPolicy::Bounce { ease_amount } = &mut m.zoom_policy {
            if !(0.0..=1.0).contains(&*ease_amount) {
                repairs.push(format!("motion.zoom_policy.ease_amount {} clamped to [0, 1]", ease_amount));
                *ease_amount = ease_amount.clamp(0.0, 1.0);
            }
        }

        let d = &mut self.dials;
        clamp_min(&mut d.angular_deadzone_deg, 0.0, "dials.angular_deadzone_deg", &mut repairs);
        clamp_min(&mut d.angular_hysteresis_deg, 0.0, "dials.angular_hysteresis_deg", &mut repairs);
        clamp_min(&mut d.linear_deadzone_px, 0.0, "dials.linear_deadzone_px", &mut repairs);
        clamp_min(
            &mut d.pointer_smoothing_time,
            SMOOTHING_EPSILON,
            "dials.pointer_smoothing_time",
            &mut repairs,
        );

        let v = &mut self.visitation;
        clamp_min(&mut v.xy_distance, 0.0, "visitation.xy_distance", &mut repairs);
        clamp_min(&mut v.z_distance, 0.0, "visitation.z_distance", &mut repairs);

        clamp_min(
            &mut self.playback.fade_seconds,
            MIN_FADE_SECONDS,
            "playback.fade_seconds",
            &mut repairs,
        );
        clamp_min(&mut self.edge_scroll.margin_px, 0.0, "edge_scroll.margin_px", &mut repairs);

        for location in &mut self.locations {
            if let Some(t) = &mut location.tolerance {
                let mut repaired = false;
                for axis in [&mut t.dx, &mut t.dy, &mut t.dz].into_iter().flatten() {
                    if *axis < 0.0 {
                        *axis = axis.abs();
                        repaired = true;
                    }
                }
                if repaired {
                    repairs.push(format!("locations['{}'].tolerance made non-negative", location.name));
                }
            }
        }

        repairs
    }

    /// Check every location's asset against the clip library.
    /// Returns one message per location that will play nothing.
    pub fn missing_assets(&self) -> Vec<String> {
        self.locations
            .iter()
            .filter_map(|location| match &location.asset {
                None => None,
                Some(asset) if self.clips.iter().any(|c| c.id == asset.id()) => None,
                Some(asset) => Some(format!(
                    "location '{}' refers to unknown clip '{}'",
                    location.name, asset
                )),
            })
            .collect()
    }
}

/// Raise `value` to `min` (also replacing NaN), recording the repair
fn clamp_min(value: &mut f32, min: f32, name: &str, repairs: &mut Vec<String>) {
    if value.is_nan() || *value < min {
        repairs.push(format!("{} {} raised to {}", name, value, min));
        *value = min;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::{LocationRegistry, Tolerance};
    use glam::Vec3;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = UniverseConfig::from_json("{}").unwrap();
        assert_eq!(config, UniverseConfig::default());
        assert!(!config.locations.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let config = UniverseConfig::from_json(
            r#"{
                "motion": { "min_zoom": 2.0, "zoom_policy": { "mode": "clamped" } },
                "playback": { "fade_seconds": 1.0 },
                "locations": [
                    { "name": "Solo", "x": 1.0, "y": 2.0, "z": 3.0, "asset": "solo" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.motion.min_zoom, 2.0);
        assert_eq!(config.motion.max_zoom, DEFAULT_MAX_ZOOM);
        assert_eq!(config.motion.zoom_policy, ZoomPolicy::Clamped);
        assert_eq!(config.playback.fade_seconds, 1.0);
        assert_eq!(config.locations.len(), 1);
        assert_eq!(config.locations[0].tolerance, None);
    }

    #[test]
    fn test_partial_tolerance_override() {
        let mut config = UniverseConfig::from_json(
            r#"{
                "visitation": { "xy_distance": 0.3, "z_distance": 0.6 },
                "locations": [
                    { "name": "Wide", "x": 0.0, "y": 0.0, "z": 3.0,
                      "tolerance": { "dx": 1.0 }, "asset": "wide" },
                    { "name": "Flipped", "x": 1.0, "y": 1.0, "z": 2.0,
                      "tolerance": { "dz": -0.4 }, "asset": "flipped" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.locations.len(), 2);
        assert_eq!(
            config.locations[0].tolerance,
            Some(Tolerance {
                dx: Some(1.0),
                dy: None,
                dz: None
            })
        );

        let repairs = config.sanitize();
        assert_eq!(repairs.len(), 1);
        assert_eq!(config.locations[1].tolerance.and_then(|t| t.dz), Some(0.4));

        let registry = LocationRegistry::from_specs(
            &config.locations,
            config.visitation.xy_distance,
            config.visitation.z_distance,
        );
        assert_eq!(registry.get(0).unwrap().tolerance, Vec3::new(1.0, 0.3, 0.6));
        assert_eq!(registry.get(1).unwrap().tolerance, Vec3::new(0.3, 0.3, 0.4));
    }

    #[test]
    fn test_bounce_policy_parses() {
        let config = UniverseConfig::from_json(
            r#"{ "motion": { "zoom_policy": { "mode": "bounce", "ease_amount": 0.5 } } }"#,
        )
        .unwrap();
        assert_eq!(config.motion.zoom_policy, ZoomPolicy::Bounce { ease_amount: 0.5 });
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let mut config = UniverseConfig::default();
        config.motion.min_zoom = 6.0;
        config.motion.max_zoom = 2.0;
        config.dials.pointer_smoothing_time = 0.0;
        config.playback.fade_seconds = -1.0;
        config.motion.max_x = -3.0;

        let repairs = config.sanitize();
        assert_eq!(repairs.len(), 4);
        assert_eq!(config.motion.min_zoom, 2.0);
        assert_eq!(config.motion.max_zoom, 6.0);
        assert_eq!(config.dials.pointer_smoothing_time, SMOOTHING_EPSILON);
        assert_eq!(config.playback.fade_seconds, MIN_FADE_SECONDS);
        assert_eq!(config.motion.max_x, 0.0);
    }

    #[test]
    fn test_sanitize_default_is_clean() {
        let mut config = UniverseConfig::default();
        assert!(config.sanitize().is_empty());
        assert!(config.missing_assets().is_empty());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = UniverseConfig::load_or_default(Path::new("does/not/exist.json"));
        assert_eq!(config.locations.len(), builtin_locations().len());
    }

    #[test]
    fn test_load_error_kinds() {
        let err = UniverseConfig::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
