//! Dial gesture filtering.
//!
//! A dial turns a press-drag-release pointer gesture into filtered delta
//! events: degrees for the rotary dial, pixels for the linear dials.
//! Raw pointer deltas are noisy, so small steps are dropped (deadzone) and a
//! change of direction must clear an extra margin (hysteresis) before it is
//! honored. The pointer hand is smoothed separately, so the visual stays fluid
//! even while the deadzone holds events back.
//!
//! All positions are in y-up dial space: 0° points right and angles grow
//! counter-clockwise. The UI flips egui's y-down coordinates before calling in.

use crate::constants::*;
use crate::events::GameEvent;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What a dial measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialMode {
    /// Angle around the dial center (degrees)
    Rotary,
    /// Horizontal drag (pixels, right positive)
    LinearX,
    /// Vertical drag (pixels, up positive)
    LinearY,
}

/// Runtime-tunable filter and binding parameters for the dial panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialSettings {
    pub angular_deadzone_deg: f32,
    pub angular_hysteresis_deg: f32,
    pub pointer_smoothing_time: f32,
    pub linear_deadzone_px: f32,
    pub x_per_pixel: f32,
    pub y_per_pixel: f32,
    pub zoom_per_degree: f32,
}

impl Default for DialSettings {
    fn default() -> Self {
        Self {
            angular_deadzone_deg: DEFAULT_ANGULAR_DEADZONE_DEG,
            angular_hysteresis_deg: DEFAULT_ANGULAR_HYSTERESIS_DEG,
            pointer_smoothing_time: DEFAULT_POINTER_SMOOTHING_TIME,
            linear_deadzone_px: DEFAULT_LINEAR_DEADZONE_PX,
            x_per_pixel: DEFAULT_X_PER_PIXEL,
            y_per_pixel: DEFAULT_Y_PER_PIXEL,
            zoom_per_degree: DEFAULT_ZOOM_PER_DEGREE,
        }
    }
}

/// Signed shortest difference from `current` to `target`, in (-180, 180]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Interpolate between two angles along the shortest arc
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    a + delta_angle(a, b) * t.clamp(0.0, 1.0)
}

/// Angle of `pointer` around `center` in degrees, 0° = right, CCW positive
pub fn screen_angle(pointer: Vec2, center: Vec2) -> f32 {
    let v = pointer - center;
    v.y.atan2(v.x).to_degrees()
}

/// Sign with zero counted as positive
fn sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// State of one press-drag-release interaction
#[derive(Debug, Clone, Copy, PartialEq)]
struct DialGesture {
    center: Vec2,
    start_angle: f32,
    last_raw: f32,
    last_emitted: f32,
    /// Sign of the last honored rotation (-1, 0, 1)
    hold_dir: f32,
    display_angle: f32,
    /// Pointer angle of the hand when the gesture began
    pointer_base: f32,
    press_position: Vec2,
    last_sample: Vec2,
    current_sample: Vec2,
}

/// Filters one dial's gestures into delta events
#[derive(Debug, Clone)]
pub struct DialFilter {
    mode: DialMode,
    settings: DialSettings,
    gesture: Option<DialGesture>,
    /// Visual hand angle (degrees), kept across gestures
    pointer_angle: f32,
}

impl DialFilter {
    pub fn new(mode: DialMode, settings: DialSettings) -> Self {
        Self {
            mode,
            settings,
            gesture: None,
            pointer_angle: 0.0,
        }
    }

    pub fn mode(&self) -> DialMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Smoothed visual angle of the rotary hand (degrees)
    pub fn pointer_angle(&self) -> f32 {
        self.pointer_angle
    }

    /// Drag offset from the press position (linear dials), zero when idle
    pub fn drag_offset(&self) -> Vec2 {
        self.gesture
            .map(|g| g.current_sample - g.press_position)
            .unwrap_or(Vec2::ZERO)
    }

    /// Begin a gesture at `pointer`; `center` is the dial's screen center
    pub fn press(&mut self, pointer: Vec2, center: Vec2) {
        let start_angle = screen_angle(pointer, center);
        self.gesture = Some(DialGesture {
            center,
            start_angle,
            last_raw: start_angle,
            last_emitted: start_angle,
            hold_dir: 0.0,
            display_angle: start_angle,
            pointer_base: self.pointer_angle,
            press_position: pointer,
            last_sample: pointer,
            current_sample: pointer,
        });
    }

    /// Feed a drag sample. Returns the filtered delta when one is emitted.
    pub fn drag(&mut self, pointer: Vec2, unscaled_dt: f32) -> Option<f32> {
        match self.mode {
            DialMode::Rotary => self.drag_rotary(pointer, unscaled_dt),
            DialMode::LinearX | DialMode::LinearY => self.drag_linear(pointer),
        }
    }

    /// End the gesture, discarding its state
    pub fn release(&mut self) {
        self.gesture = None;
    }

    fn drag_rotary(&mut self, pointer: Vec2, unscaled_dt: f32) -> Option<f32> {
        let deadzone = self.settings.angular_deadzone_deg;
        let hysteresis = self.settings.angular_hysteresis_deg;
        let smoothing_time = self.settings.pointer_smoothing_time;

        let gesture = self.gesture.as_mut()?;
        gesture.current_sample = pointer;
        let now = screen_angle(pointer, gesture.center);

        let raw_step = delta_angle(gesture.last_raw, now);
        if raw_step.abs() < deadzone {
            self.pointer_angle = smooth_pointer(gesture, now, smoothing_time, unscaled_dt);
            return None;
        }

        if gesture.hold_dir == 0.0 {
            gesture.hold_dir = sign(raw_step);
        }

        let from_last_emit = delta_angle(gesture.last_emitted, now);
        if sign(from_last_emit) != gesture.hold_dir && from_last_emit.abs() < deadzone + hysteresis {
            // Reversal too small to honor
            self.pointer_angle = smooth_pointer(gesture, now, smoothing_time, unscaled_dt);
            gesture.last_raw = now;
            return None;
        }

        gesture.last_emitted = now;
        gesture.last_raw = now;
        if from_last_emit != 0.0 {
            gesture.hold_dir = sign(from_last_emit);
        }
        self.pointer_angle = smooth_pointer(gesture, now, smoothing_time, unscaled_dt);

        Some(from_last_emit)
    }

    fn drag_linear(&mut self, pointer: Vec2) -> Option<f32> {
        let deadzone = self.settings.linear_deadzone_px;
        let gesture = self.gesture.as_mut()?;
        gesture.current_sample = pointer;

        let step = pointer - gesture.last_sample;
        let signed = match self.mode {
            DialMode::LinearY => step.y,
            _ => step.x,
        };

        if signed.abs() >= deadzone {
            gesture.last_sample = pointer;
            Some(signed)
        } else {
            None
        }
    }
}

/// Move the displayed angle toward `raw` and return the hand angle
fn smooth_pointer(gesture: &mut DialGesture, raw: f32, smoothing_time: f32, unscaled_dt: f32) -> f32 {
    let rate = (1.0 / smoothing_time.max(SMOOTHING_EPSILON)).max(SMOOTHING_EPSILON);
    let k = 1.0 - (-rate * unscaled_dt).exp();
    gesture.display_angle = lerp_angle(gesture.display_angle, raw, k);

    // Measured from the press angle so the hand never drifts
    gesture.pointer_base + delta_angle(gesture.start_angle, gesture.display_angle)
}

/// The three dials that steer the camera
#[derive(Debug, Clone)]
pub struct DialPanel {
    pub x_dial: DialFilter,
    pub y_dial: DialFilter,
    pub zoom_dial: DialFilter,
    settings: DialSettings,
}

impl DialPanel {
    pub fn new(settings: DialSettings) -> Self {
        Self {
            x_dial: DialFilter::new(DialMode::LinearX, settings),
            y_dial: DialFilter::new(DialMode::LinearY, settings),
            zoom_dial: DialFilter::new(DialMode::Rotary, settings),
            settings,
        }
    }

    /// Scale a dial emission into a motion event.
    /// Clockwise rotation is negative degrees, which zooms in.
    pub fn event_for(&self, mode: DialMode, delta: f32) -> GameEvent {
        match mode {
            DialMode::LinearX => GameEvent::DialMoved {
                delta: Vec2::new(delta * self.settings.x_per_pixel, 0.0),
            },
            DialMode::LinearY => GameEvent::DialMoved {
                delta: Vec2::new(0.0, delta * self.settings.y_per_pixel),
            },
            DialMode::Rotary => GameEvent::DialZoomed {
                delta: delta * self.settings.zoom_per_degree,
            },
        }
    }

    /// Release every dial (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.x_dial.release();
        self.y_dial.release();
        self.zoom_dial.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn at_angle(degrees: f32) -> Vec2 {
        let r = degrees.to_radians();
        Vec2::new(r.cos(), r.sin()) * 50.0
    }

    fn rotary() -> DialFilter {
        let mut dial = DialFilter::new(DialMode::Rotary, DialSettings::default());
        dial.press(at_angle(0.0), Vec2::ZERO);
        dial
    }

    #[test]
    fn test_delta_angle_wraps() {
        assert!((delta_angle(170.0, -170.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle(-170.0, 170.0) + 20.0).abs() < 1e-4);
        assert!((delta_angle(10.0, 30.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle(0.0, 180.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_screen_angle_is_ccw_from_right() {
        assert!((screen_angle(Vec2::new(0.0, 1.0), Vec2::ZERO) - 90.0).abs() < 1e-4);
        assert!((screen_angle(Vec2::new(-1.0, 0.0), Vec2::ZERO) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_sub_deadzone_steps_emit_nothing() {
        let mut dial = rotary();
        for step in 1..=5 {
            // Each sample stays within the deadzone of the press angle
            let angle = 0.1 * step as f32;
            assert_eq!(dial.drag(at_angle(angle), DT), None);
        }
    }

    fn rotary_with(deadzone: f32, hysteresis: f32) -> DialFilter {
        let settings = DialSettings {
            angular_deadzone_deg: deadzone,
            angular_hysteresis_deg: hysteresis,
            ..DialSettings::default()
        };
        let mut dial = DialFilter::new(DialMode::Rotary, settings);
        dial.press(Vec2::new(1.0, 0.0), Vec2::ZERO);
        dial
    }

    #[test]
    fn test_step_exactly_at_deadzone_emits() {
        let mut dial = rotary();
        let delta = dial.drag(at_angle(0.6), DT).expect("step at the deadzone should emit");
        assert!((delta - 0.6).abs() < 1e-4);
        assert_eq!(dial.drag(at_angle(0.6), DT), None);

        // (1, 1) sits at exactly 45 degrees
        let mut dial = rotary_with(45.0, 0.0);
        assert_eq!(dial.drag(Vec2::new(1.0, 1.0), DT), Some(45.0));
        assert_eq!(dial.drag(Vec2::new(1.0, 1.0), DT), None);
    }

    #[test]
    fn test_step_at_deadzone_emits_once() {
        let mut dial = rotary();
        let emitted = dial.drag(at_angle(0.7), DT);
        let delta = emitted.expect("step above deadzone should emit");
        assert!((delta - 0.7).abs() < 1e-3);

        // Same position again: no new event
        assert_eq!(dial.drag(at_angle(0.7), DT), None);

        let second = dial.drag(at_angle(1.5), DT).expect("second qualifying step");
        assert!((second - 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_small_reversal_is_suppressed() {
        let mut dial = rotary();
        assert!(dial.drag(at_angle(5.0), DT).is_some());

        // Back by 0.7 degrees: clears the deadzone but not deadzone + hysteresis
        assert_eq!(dial.drag(at_angle(4.3), DT), None);
    }

    #[test]
    fn test_large_reversal_emits_signed_delta() {
        let mut dial = rotary();
        assert!(dial.drag(at_angle(5.0), DT).is_some());
        assert_eq!(dial.drag(at_angle(4.3), DT), None);

        // Keep reversing until past deadzone + hysteresis from the last emit
        let delta = dial.drag(at_angle(3.5), DT).expect("reversal beyond hysteresis");
        assert!((delta + 1.5).abs() < 1e-3);

        // Reversal of exactly deadzone + hysteresis (45 degrees) fires
        let mut dial = rotary_with(30.0, 15.0);
        assert_eq!(dial.drag(Vec2::new(1.0, 1.0), DT), Some(45.0));
        assert_eq!(dial.drag(Vec2::new(1.0, 0.0), DT), Some(-45.0));

        // Just under the margin it is held back
        let mut dial = rotary_with(30.0, 15.5);
        assert_eq!(dial.drag(Vec2::new(1.0, 1.0), DT), Some(45.0));
        assert_eq!(dial.drag(Vec2::new(1.0, 0.0), DT), None);
    }

    #[test]
    fn test_rotation_across_the_seam() {
        let mut dial = DialFilter::new(DialMode::Rotary, DialSettings::default());
        dial.press(at_angle(178.0), Vec2::ZERO);
        let delta = dial.drag(at_angle(-178.0), DT).expect("crossing 180 should emit");
        assert!((delta - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_clockwise_zooms_in() {
        let panel = DialPanel::new(DialSettings::default());
        match panel.event_for(DialMode::Rotary, -10.0) {
            GameEvent::DialZoomed { delta } => assert!(delta < 0.0),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_linear_steps_accumulate_until_deadzone() {
        let mut dial = DialFilter::new(DialMode::LinearX, DialSettings::default());
        dial.press(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(dial.drag(Vec2::new(1.0, 0.0), DT), None);
        // Reference did not move, so the next step measures 2px from the press
        assert_eq!(dial.drag(Vec2::new(2.0, 0.0), DT), Some(2.0));
        assert_eq!(dial.drag(Vec2::new(2.5, 0.0), DT), None);
        assert_eq!(dial.drag(Vec2::new(0.0, 0.0), DT), Some(-2.0));
    }

    #[test]
    fn test_linear_y_uses_vertical_axis() {
        let mut dial = DialFilter::new(DialMode::LinearY, DialSettings::default());
        dial.press(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(dial.drag(Vec2::new(50.0, 0.0), DT), None);
        assert_eq!(dial.drag(Vec2::new(50.0, 3.0), DT), Some(3.0));
    }

    #[test]
    fn test_linear_binding_scales_pixels() {
        let panel = DialPanel::new(DialSettings::default());
        match panel.event_for(DialMode::LinearY, 100.0) {
            GameEvent::DialMoved { delta } => {
                assert_eq!(delta.x, 0.0);
                assert!((delta.y - 100.0 * DEFAULT_Y_PER_PIXEL).abs() < 1e-6);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_release_discards_gesture() {
        let mut dial = rotary();
        dial.release();
        assert!(!dial.is_active());
        assert_eq!(dial.drag(at_angle(90.0), DT), None);
    }

    #[test]
    fn test_pointer_smoothing_lags_then_converges() {
        let mut dial = rotary();
        dial.drag(at_angle(30.0), DT);
        let first = dial.pointer_angle();
        assert!(first > 0.0 && first < 30.0);
        for _ in 0..120 {
            dial.drag(at_angle(30.0), DT);
        }
        assert!((dial.pointer_angle() - 30.0).abs() < 0.1);
    }

    #[test]
    fn test_zero_smoothing_time_is_guarded() {
        let settings = DialSettings {
            pointer_smoothing_time: 0.0,
            ..DialSettings::default()
        };
        let mut dial = DialFilter::new(DialMode::Rotary, settings);
        dial.press(at_angle(0.0), Vec2::ZERO);
        dial.drag(at_angle(20.0), DT);
        assert!(dial.pointer_angle().is_finite());
    }
}
