//! Procedural starfield behind the universe map.
//!
//! Stars are scattered with a seeded RNG and thinned by a Perlin density
//! field, so they clump into loose clusters. A second Perlin channel tints
//! each star between warm and cool white.

use crate::constants::*;
use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Candidate stars tried per star wanted before giving up
const MAX_ATTEMPTS_PER_STAR: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub size: f32,
    pub color: [f32; 3],
    twinkle_phase: f32,
    twinkle_speed: f32,
}

impl Star {
    /// Brightness multiplier at `time` (unscaled seconds)
    pub fn brightness(&self, time: f32) -> f32 {
        0.75 + 0.25 * (time * self.twinkle_speed + self.twinkle_phase).sin()
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
    pub extent: Vec2,
}

impl Starfield {
    /// Scatter up to `count` stars over `[-extent, extent]`.
    /// The same seed always yields the same field.
    pub fn generate(seed: u32, count: usize, extent: Vec2) -> Self {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let density = Perlin::new(seed);
        let tint = Perlin::new(seed.wrapping_add(1));

        let mut stars = Vec::with_capacity(count);
        let mut attempts = 0;
        while stars.len() < count && attempts < count * MAX_ATTEMPTS_PER_STAR {
            attempts += 1;
            let position = Vec2::new(
                rng.gen_range(-extent.x..=extent.x),
                rng.gen_range(-extent.y..=extent.y),
            );
            let sample = [
                position.x as f64 * STAR_CLUSTER_FREQUENCY,
                position.y as f64 * STAR_CLUSTER_FREQUENCY,
            ];
            let d = (0.5 + 0.5 * density.get(sample)).clamp(0.0, 1.0);
            if rng.gen::<f64>() > 0.25 + 0.75 * d {
                continue;
            }

            let warmth = (0.5 + 0.5 * tint.get([sample[1], sample[0]])).clamp(0.0, 1.0) as f32;
            stars.push(Star {
                position,
                size: rng.gen_range(STAR_SIZE_RANGE.0..=STAR_SIZE_RANGE.1),
                color: [0.75 + 0.25 * warmth, 0.85, 1.0 - 0.25 * warmth],
                twinkle_phase: rng.gen_range(0.0..std::f32::consts::TAU),
                twinkle_speed: rng.gen_range(0.5..2.5),
            });
        }

        if stars.len() < count {
            log::debug!("Starfield placed {} of {} stars", stars.len(), count);
        }
        Self { stars, extent }
    }

    /// Stars inside the given world rectangle
    pub fn visible(&self, min: Vec2, max: Vec2) -> impl Iterator<Item = &Star> {
        self.stars.iter().filter(move |s| {
            s.position.x >= min.x && s.position.x <= max.x && s.position.y >= min.y && s.position.y <= max.y
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_field() {
        let a = Starfield::generate(7, 200, Vec2::new(10.0, 8.0));
        let b = Starfield::generate(7, 200, Vec2::new(10.0, 8.0));
        assert_eq!(a.stars, b.stars);

        let c = Starfield::generate(8, 200, Vec2::new(10.0, 8.0));
        assert_ne!(a.stars, c.stars);
    }

    #[test]
    fn test_stars_stay_in_extent() {
        let extent = Vec2::new(4.0, 3.0);
        let field = Starfield::generate(3, 500, extent);
        assert!(!field.stars.is_empty());
        for star in &field.stars {
            assert!(star.position.abs().cmple(extent).all());
            assert!(star.size >= STAR_SIZE_RANGE.0 && star.size <= STAR_SIZE_RANGE.1);
        }
    }

    #[test]
    fn test_twinkle_stays_visible() {
        let field = Starfield::generate(1, 50, Vec2::splat(5.0));
        for star in &field.stars {
            for t in 0..100 {
                let b = star.brightness(t as f32 * 0.1);
                assert!((0.5..=1.0).contains(&b));
            }
        }
    }

    #[test]
    fn test_visible_filter() {
        let field = Starfield::generate(5, 300, Vec2::splat(10.0));
        let min = Vec2::splat(-1.0);
        let max = Vec2::splat(1.0);
        assert!(field.visible(min, max).all(|s| s.position.abs().max_element() <= 1.0));
    }
}
