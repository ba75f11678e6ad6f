//! Camera motion controller.
//!
//! Integrates keyboard axes and dial momentum into a pan position and an
//! orthographic zoom size each tick. Dial input lands in a `MotionAccumulator`
//! that decays exponentially, so a flick of a dial coasts to a stop.
//!
//! Pan speed scales with how far out the view is zoomed, and the pan bounds
//! shrink to `max_axis * (1 - zoom01)` as the view zooms out.

use crate::constants::*;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// The camera's (pan-x, pan-y, zoom-size) triple, also read as a date
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UniverseCoordinate {
    pub x: f32,
    pub y: f32,
    /// Orthographic half-height (smaller = more zoomed in)
    pub zoom_size: f32,
}

impl UniverseCoordinate {
    pub fn new(x: f32, y: f32, zoom_size: f32) -> Self {
        Self { x, y, zoom_size }
    }

    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.zoom_size)
    }
}

/// Dial momentum, fed by dial events and decayed every tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionAccumulator {
    pub dial_move: Vec2,
    pub dial_zoom: f32,
}

impl MotionAccumulator {
    /// Add pan input, clamping each axis to `±clamp`
    pub fn add_move(&mut self, delta: Vec2, clamp: f32) {
        let limit = Vec2::splat(clamp.abs());
        self.dial_move = (self.dial_move + delta).clamp(-limit, limit);
    }

    /// Add zoom input, clamping to `±clamp`
    pub fn add_zoom(&mut self, delta: f32, clamp: f32) {
        let limit = clamp.abs();
        self.dial_zoom = (self.dial_zoom + delta).clamp(-limit, limit);
    }

    /// Exponential decay: `value *= exp(-damp * dt)`
    pub fn decay(&mut self, move_damp: f32, zoom_damp: f32, dt: f32) {
        self.dial_move *= (-move_damp * dt).exp();
        self.dial_zoom *= (-zoom_damp * dt).exp();
    }
}

/// How zoom input maps onto the zoom range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ZoomPolicy {
    /// Hard stop at the zoom limits
    Clamped,
    /// Reflect an unbounded phase into the range with a triangle wave,
    /// blended toward a cosine by `ease_amount`
    Bounce { ease_amount: f32 },
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        ZoomPolicy::Bounce {
            ease_amount: DEFAULT_BOUNCE_EASE,
        }
    }
}

/// Runtime-tunable motion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    pub move_speed: f32,
    pub move_scale_speed: f32,
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom size at startup (clamped into the range)
    pub start_zoom: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub dial_move_damp: f32,
    pub dial_zoom_damp: f32,
    pub dial_move_clamp: f32,
    pub dial_zoom_clamp: f32,
    pub zoom_policy: ZoomPolicy,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            move_scale_speed: DEFAULT_MOVE_SCALE_SPEED,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            start_zoom: DEFAULT_MAX_ZOOM,
            max_x: DEFAULT_MAX_X,
            max_y: DEFAULT_MAX_Y,
            dial_move_damp: DEFAULT_DIAL_MOVE_DAMP,
            dial_zoom_damp: DEFAULT_DIAL_ZOOM_DAMP,
            dial_move_clamp: DEFAULT_DIAL_MOVE_CLAMP,
            dial_zoom_clamp: DEFAULT_DIAL_ZOOM_CLAMP,
            zoom_policy: ZoomPolicy::default(),
        }
    }
}

impl MotionSettings {
    /// Normalized zoom: 0 at `min_zoom`, 1 at `max_zoom`
    pub fn zoom01(&self, zoom_size: f32) -> f32 {
        inverse_lerp(self.min_zoom, self.max_zoom, zoom_size)
    }

    /// Pan bound for the given zoom size
    pub fn pan_bounds(&self, zoom_size: f32) -> Vec2 {
        let zoom10 = 1.0 - self.zoom01(zoom_size);
        Vec2::new(self.max_x * zoom10, self.max_y * zoom10)
    }
}

/// Instantaneous keyboard-side input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionInput {
    /// Pan axes, each in [-1, 1]
    pub move_axes: Vec2,
    /// Discrete zoom direction: +1 out, -1 in, 0 none
    pub zoom: f32,
}

/// Normalize an axis vector only when it is longer than 1,
/// so diagonals aren't faster than straight moves.
pub fn normalize_axes(axes: Vec2) -> Vec2 {
    if axes.length_squared() > 1.0 {
        axes.normalize()
    } else {
        axes
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < ZOOM_RANGE_EPSILON {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Triangle wave: ramps 0 → length → 0 as `t` grows by `2 * length`
pub fn pingpong(t: f32, length: f32) -> f32 {
    if length <= 0.0 {
        return 0.0;
    }
    let period = length * 2.0;
    let wrapped = (t - (t / period).floor() * period).clamp(0.0, period);
    length - (wrapped - length).abs()
}

/// Eased bounce curve on [0, 1]
fn bounce_ease(tri: f32, ease_amount: f32) -> f32 {
    let cosine = 0.5 - 0.5 * (std::f32::consts::PI * tri).cos();
    lerp(tri, cosine, ease_amount)
}

/// Map an unbounded bounce phase into `[min_zoom, max_zoom]`
pub fn bounce_zoom(phase: f32, min_zoom: f32, max_zoom: f32, ease_amount: f32) -> f32 {
    let range = max_zoom - min_zoom;
    if range < ZOOM_RANGE_EPSILON {
        return min_zoom;
    }
    let tri = pingpong(phase - min_zoom, range) / range;
    (min_zoom + bounce_ease(tri, ease_amount) * range).clamp(min_zoom, max_zoom)
}

/// Phase on the first rising ramp that maps to `zoom_size`
fn bounce_phase_for(zoom_size: f32, min_zoom: f32, max_zoom: f32, ease_amount: f32) -> f32 {
    let range = max_zoom - min_zoom;
    if range < ZOOM_RANGE_EPSILON {
        return min_zoom;
    }
    let target = inverse_lerp(min_zoom, max_zoom, zoom_size);

    // The eased curve is monotonic on [0, 1], so bisection converges
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..BOUNCE_INVERT_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if bounce_ease(mid, ease_amount) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    min_zoom + 0.5 * (lo + hi) * range
}

/// Damped, clamped, multi-source pan/zoom controller
#[derive(Debug, Clone)]
pub struct CameraMotionController {
    settings: MotionSettings,
    position: Vec2,
    zoom_size: f32,
    /// Unbounded zoom accumulator used by the bounce policy
    bounce_phase: f32,
    accumulator: MotionAccumulator,
    can_move: bool,
    coordinate: UniverseCoordinate,
}

impl CameraMotionController {
    pub fn new(settings: MotionSettings) -> Self {
        let zoom_size = settings.start_zoom.clamp(settings.min_zoom, settings.max_zoom);
        let bounce_phase = match settings.zoom_policy {
            ZoomPolicy::Bounce { ease_amount } => {
                bounce_phase_for(zoom_size, settings.min_zoom, settings.max_zoom, ease_amount)
            }
            ZoomPolicy::Clamped => zoom_size,
        };

        Self {
            settings,
            position: Vec2::ZERO,
            zoom_size,
            bounce_phase,
            accumulator: MotionAccumulator::default(),
            can_move: true,
            coordinate: UniverseCoordinate::new(0.0, 0.0, zoom_size),
        }
    }

    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    /// The coordinate published by the last tick
    pub fn coordinate(&self) -> UniverseCoordinate {
        self.coordinate
    }

    pub fn accumulator(&self) -> &MotionAccumulator {
        &self.accumulator
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn zoom_size(&self) -> f32 {
        self.zoom_size
    }

    pub fn zoom01(&self) -> f32 {
        self.settings.zoom01(self.zoom_size)
    }

    /// Dial pan input (already scaled by the dial's sensitivity)
    pub fn on_dial_move(&mut self, dx: f32, dy: f32) {
        self.accumulator
            .add_move(Vec2::new(dx, dy), self.settings.dial_move_clamp);
    }

    /// Dial zoom input (already scaled by the dial's sensitivity)
    pub fn on_dial_zoom(&mut self, dz: f32) {
        self.accumulator.add_zoom(dz, self.settings.dial_zoom_clamp);
    }

    /// Suspend motion. Repeated calls are no-ops.
    pub fn stop_movement(&mut self) {
        self.can_move = false;
    }

    /// Resume motion. Repeated calls are no-ops.
    pub fn start_movement(&mut self) {
        self.can_move = true;
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Advance one tick and return the published coordinate
    pub fn update(&mut self, input: MotionInput, dt: f32) -> UniverseCoordinate {
        let key_move = normalize_axes(input.move_axes);
        let key_zoom = input.zoom.clamp(-1.0, 1.0) * self.settings.zoom_speed;

        let total_move = key_move + self.accumulator.dial_move;
        let total_zoom = key_zoom + self.accumulator.dial_zoom;

        if self.can_move {
            self.apply_zoom(total_zoom, dt);
            self.apply_movement(total_move, dt);
            self.publish();
        }

        // Momentum decays even while suspended so it doesn't resume mid-flick
        self.accumulator.decay(
            self.settings.dial_move_damp,
            self.settings.dial_zoom_damp,
            dt,
        );

        self.coordinate
    }

    fn apply_zoom(&mut self, total_zoom: f32, dt: f32) {
        let s = &self.settings;
        match s.zoom_policy {
            ZoomPolicy::Clamped => {
                self.zoom_size = (self.zoom_size + total_zoom * dt).clamp(s.min_zoom, s.max_zoom);
            }
            ZoomPolicy::Bounce { ease_amount } => {
                self.bounce_phase += total_zoom * dt;
                self.zoom_size = bounce_zoom(self.bounce_phase, s.min_zoom, s.max_zoom, ease_amount);
            }
        }
    }

    fn apply_movement(&mut self, total_move: Vec2, dt: f32) {
        let s = &self.settings;
        let zoom01 = s.zoom01(self.zoom_size);
        let move_scale = lerp(MOVE_SCALE_ZOOMED_IN, MOVE_SCALE_ZOOMED_OUT, zoom01) * s.move_scale_speed;

        let step = total_move * s.move_speed * dt * move_scale;
        let bounds = s.pan_bounds(self.zoom_size);
        self.position = (self.position + step).clamp(-bounds, bounds);
    }

    fn publish(&mut self) {
        self.coordinate = UniverseCoordinate::new(self.position.x, self.position.y, self.zoom_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn clamped_settings() -> MotionSettings {
        MotionSettings {
            zoom_policy: ZoomPolicy::Clamped,
            start_zoom: 3.0,
            ..MotionSettings::default()
        }
    }

    #[test]
    fn test_diagonal_is_normalized() {
        for (x, y) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
            let v = normalize_axes(Vec2::new(x, y));
            assert!((v.length() - 1.0).abs() < 1e-6);
        }
        // Short vectors pass through untouched
        let half = Vec2::new(0.5, 0.0);
        assert_eq!(normalize_axes(half), half);
    }

    #[test]
    fn test_accumulator_saturates_at_clamp() {
        let mut controller = CameraMotionController::new(clamped_settings());
        for _ in 0..50 {
            controller.on_dial_move(10.0, -10.0);
            controller.on_dial_zoom(100.0);
        }
        let acc = controller.accumulator();
        assert_eq!(acc.dial_move, Vec2::new(DEFAULT_DIAL_MOVE_CLAMP, -DEFAULT_DIAL_MOVE_CLAMP));
        assert_eq!(acc.dial_zoom, DEFAULT_DIAL_ZOOM_CLAMP);
    }

    #[test]
    fn test_decay_matches_exponential() {
        let mut acc = MotionAccumulator::default();
        acc.add_move(Vec2::new(1.0, 0.0), 10.0);
        acc.add_zoom(2.0, 10.0);

        let damp = 8.0;
        let steps = 30;
        for _ in 0..steps {
            acc.decay(damp, damp, DT);
        }
        let t = steps as f32 * DT;
        let expected = (-damp * t).exp();
        assert!((acc.dial_move.x - expected).abs() < 1e-5);
        assert!((acc.dial_zoom - 2.0 * expected).abs() < 1e-5);
    }

    #[test]
    fn test_decay_becomes_negligible() {
        let mut acc = MotionAccumulator::default();
        acc.add_move(Vec2::new(1.5, 1.5), 1.5);
        // Five time constants
        let damp = 8.0;
        let total = 5.0 / damp;
        let mut elapsed = 0.0;
        while elapsed < total {
            acc.decay(damp, damp, DT);
            elapsed += DT;
        }
        assert!(acc.dial_move.length() < 0.01 * Vec2::splat(1.5).length());
    }

    #[test]
    fn test_clamped_zoom_stays_in_range() {
        let mut controller = CameraMotionController::new(clamped_settings());
        for _ in 0..600 {
            controller.update(MotionInput { move_axes: Vec2::ZERO, zoom: 1.0 }, DT);
            assert!(controller.zoom_size() <= DEFAULT_MAX_ZOOM);
        }
        assert_eq!(controller.zoom_size(), DEFAULT_MAX_ZOOM);
        for _ in 0..600 {
            controller.update(MotionInput { move_axes: Vec2::ZERO, zoom: -1.0 }, DT);
            assert!(controller.zoom_size() >= DEFAULT_MIN_ZOOM);
        }
        assert_eq!(controller.zoom_size(), DEFAULT_MIN_ZOOM);
    }

    #[test]
    fn test_pingpong_shape() {
        assert_eq!(pingpong(0.0, 4.0), 0.0);
        assert!((pingpong(2.0, 4.0) - 2.0).abs() < 1e-6);
        assert!((pingpong(4.0, 4.0) - 4.0).abs() < 1e-6);
        assert!((pingpong(6.0, 4.0) - 2.0).abs() < 1e-6);
        assert!((pingpong(8.0, 4.0)).abs() < 1e-6);
        assert!((pingpong(-2.0, 4.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_stays_in_range_far_from_origin() {
        for ease in [0.0, 0.35, 1.0] {
            let mut phase = -30.0;
            while phase < 30.0 {
                let z = bounce_zoom(phase, 1.0, 5.0, ease);
                assert!((1.0..=5.0).contains(&z), "zoom {} out of range at phase {}", z, phase);
                phase += 0.05;
            }
        }
    }

    #[test]
    fn test_bounce_is_continuous_at_wrap_points() {
        let (min, max) = (1.0, 5.0);
        let range = max - min;
        let eps = 1e-3;
        for k in 1..6 {
            let wrap = min + range * k as f32;
            let before = bounce_zoom(wrap - eps, min, max, 0.35);
            let after = bounce_zoom(wrap + eps, min, max, 0.35);
            assert!((before - after).abs() < 0.01, "jump at wrap {}", wrap);
        }
    }

    #[test]
    fn test_bounce_reverses_at_limit() {
        let settings = MotionSettings {
            zoom_policy: ZoomPolicy::Bounce { ease_amount: 0.0 },
            start_zoom: 4.0,
            ..MotionSettings::default()
        };
        let mut controller = CameraMotionController::new(settings);
        assert!((controller.zoom_size() - 4.0).abs() < 1e-3);

        // Zoom out for long enough to pass max_zoom
        let mut peak = controller.zoom_size();
        for _ in 0..30 {
            controller.update(MotionInput { move_axes: Vec2::ZERO, zoom: 1.0 }, DT);
            peak = peak.max(controller.zoom_size());
        }
        assert!(peak <= DEFAULT_MAX_ZOOM + 1e-4);
        assert!(controller.zoom_size() < peak, "zoom should come back down after the limit");
    }

    #[test]
    fn test_bounce_start_zoom_maps_to_itself() {
        for ease in [0.0, 0.5, 1.0] {
            let settings = MotionSettings {
                zoom_policy: ZoomPolicy::Bounce { ease_amount: ease },
                start_zoom: 2.5,
                ..MotionSettings::default()
            };
            let mut controller = CameraMotionController::new(settings);
            let coord = controller.update(MotionInput::default(), DT);
            assert!((coord.zoom_size - 2.5).abs() < 1e-3);
        }
    }

    #[test]
    fn test_pan_is_clamped_to_zoom_bounds() {
        let mut controller = CameraMotionController::new(clamped_settings());
        for _ in 0..2000 {
            controller.update(MotionInput { move_axes: Vec2::new(1.0, 1.0), zoom: 0.0 }, DT);
        }
        let bounds = controller.settings().pan_bounds(controller.zoom_size());
        let pos = controller.position();
        assert!((pos.x - bounds.x).abs() < 1e-4);
        assert!((pos.y - bounds.y).abs() < 1e-4);
    }

    #[test]
    fn test_fully_zoomed_out_cannot_pan() {
        let settings = MotionSettings {
            zoom_policy: ZoomPolicy::Clamped,
            start_zoom: DEFAULT_MAX_ZOOM,
            ..MotionSettings::default()
        };
        let mut controller = CameraMotionController::new(settings);
        let coord = controller.update(MotionInput { move_axes: Vec2::X, zoom: 0.0 }, DT);
        assert_eq!(coord.x, 0.0);
    }

    #[test]
    fn test_pan_speed_grows_with_zoom() {
        let step_at = |zoom: f32| {
            let settings = MotionSettings {
                zoom_policy: ZoomPolicy::Clamped,
                start_zoom: zoom,
                ..MotionSettings::default()
            };
            let mut controller = CameraMotionController::new(settings);
            controller.update(MotionInput { move_axes: Vec2::X, zoom: 0.0 }, DT).x
        };
        assert!(step_at(3.0) > step_at(1.0));
    }

    #[test]
    fn test_suspended_skips_motion_but_decays() {
        let mut controller = CameraMotionController::new(clamped_settings());
        controller.on_dial_move(1.0, 0.0);
        controller.stop_movement();
        controller.stop_movement();

        let before = controller.coordinate();
        let after = controller.update(MotionInput { move_axes: Vec2::X, zoom: 1.0 }, DT);
        assert_eq!(before, after);
        assert!(controller.accumulator().dial_move.x < 1.0);

        controller.start_movement();
        let moved = controller.update(MotionInput { move_axes: Vec2::X, zoom: 0.0 }, DT);
        assert!(moved.x > before.x);
    }

    #[test]
    fn test_dial_momentum_moves_camera() {
        let mut controller = CameraMotionController::new(clamped_settings());
        controller.on_dial_move(0.0, -1.0);
        let coord = controller.update(MotionInput::default(), DT);
        assert!(coord.y < 0.0);
    }
}
