//! Location markers and the date grid.

use crate::constants::*;
use crate::locations::LocationRegistry;
use crate::motion::{pingpong, MotionSettings};
use crate::renderer::Quad;
use glam::Vec2;
use noise::{NoiseFn, Perlin};

const MARKER_COLOR_A: [f32; 4] = [1.0, 0.78, 0.35, 0.95];
const MARKER_COLOR_B: [f32; 4] = [0.55, 0.85, 1.0, 0.95];
const VISITED_MARKER_COLOR: [f32; 4] = [0.45, 0.45, 0.5, 0.5];

/// Color pulse, scale pulse and noise drift for unvisited location markers
pub struct MarkerAnimator {
    drift: Perlin,
}

impl MarkerAnimator {
    pub fn new(seed: u32) -> Self {
        Self {
            drift: Perlin::new(seed),
        }
    }

    /// Drift offset for marker `index` at `time`
    fn offset(&self, index: usize, time: f32) -> Vec2 {
        let t = (time * MARKER_FLOAT_SPEED) as f64;
        // Separate noise rows per marker and per axis
        let row = index as f64 * 7.31;
        let dx = self.drift.get([t, row]) as f32;
        let dy = self.drift.get([t, row + 3.7]) as f32;
        Vec2::new(dx, dy) * MARKER_FLOAT_AMPLITUDE
    }

    pub fn quads(&self, locations: &LocationRegistry, time: f32) -> Vec<Quad> {
        let pulse = pingpong(time * MARKER_PULSE_SPEED, 1.0);
        let scale = MARKER_SCALE_RANGE.0 + (MARKER_SCALE_RANGE.1 - MARKER_SCALE_RANGE.0) * pulse;
        let color = lerp_color(MARKER_COLOR_A, MARKER_COLOR_B, pulse);

        locations
            .iter()
            .enumerate()
            .map(|(index, location)| {
                let anchor = location.coordinate.truncate();
                if location.is_visited() {
                    Quad {
                        position: anchor,
                        size: MARKER_SIZE,
                        color: VISITED_MARKER_COLOR,
                    }
                } else {
                    Quad {
                        position: anchor + self.offset(index, time),
                        size: MARKER_SIZE * scale,
                        color,
                    }
                }
            })
            .collect()
    }
}

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

/// Day columns and month rows over the full pan span
pub fn date_grid_lines(settings: &MotionSettings) -> Vec<(Vec2, Vec2)> {
    let (max_x, max_y) = (settings.max_x, settings.max_y);
    let days = DAYS_PER_SPAN as usize;
    let mut lines = Vec::with_capacity(days + MONTHS_PER_SPAN + 2);

    for i in 0..=days {
        let x = -max_x + 2.0 * max_x * i as f32 / days as f32;
        lines.push((Vec2::new(x, -max_y), Vec2::new(x, max_y)));
    }
    for i in 0..=MONTHS_PER_SPAN {
        let y = -max_y + 2.0 * max_y * i as f32 / MONTHS_PER_SPAN as f32;
        lines.push((Vec2::new(-max_x, y), Vec2::new(max_x, y)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::LocationSpec;
    use crate::motion::UniverseCoordinate;
    use crate::proximity;

    #[test]
    fn test_visited_markers_are_dimmed_and_still() {
        let mut registry = LocationRegistry::from_specs(
            &[
                LocationSpec::new("A", 0.0, 0.0, 3.0, "a"),
                LocationSpec::new("B", 2.0, 1.0, 3.0, "b"),
            ],
            0.25,
            0.25,
        );
        proximity::scan(&mut registry, UniverseCoordinate::new(0.0, 0.0, 3.0));

        let animator = MarkerAnimator::new(1);
        let quads = animator.quads(&registry, 12.3);
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].color, VISITED_MARKER_COLOR);
        assert_eq!(quads[0].position, Vec2::ZERO);
        assert_ne!(quads[1].color, VISITED_MARKER_COLOR);
        assert!((quads[1].position - Vec2::new(2.0, 1.0)).length() <= MARKER_FLOAT_AMPLITUDE * 1.5);
    }

    #[test]
    fn test_marker_pulse_stays_in_range() {
        let registry = LocationRegistry::from_specs(&[LocationSpec::new("A", 0.0, 0.0, 3.0, "a")], 0.25, 0.25);
        let animator = MarkerAnimator::new(2);
        for step in 0..200 {
            let quad = animator.quads(&registry, step as f32 * 0.05)[0];
            assert!(quad.size >= MARKER_SIZE * MARKER_SCALE_RANGE.0 - 1e-5);
            assert!(quad.size <= MARKER_SIZE * MARKER_SCALE_RANGE.1 + 1e-5);
        }
    }

    #[test]
    fn test_date_grid_covers_span() {
        let settings = MotionSettings::default();
        let lines = date_grid_lines(&settings);
        assert_eq!(lines.len(), 31 + 13);
        assert_eq!(lines[0].0.x, -settings.max_x);
        assert!((lines[30].0.x - settings.max_x).abs() < 1e-4);
    }
}
