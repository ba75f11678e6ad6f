//! Keyboard and pointer input.
//!
//! Tracks held keys for continuous pan/zoom axes and pressed keys for
//! one-shot actions, plus the pointer position for edge scrolling.

use crate::config::EdgeScrollSettings;
use crate::motion::MotionInput;
use glam::Vec2;
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Input state tracking
pub struct InputState {
    /// Keys currently down
    pub keys_held: HashSet<KeyCode>,
    /// Keys pressed since the last `process_keyboard`
    pub keys_pressed: HashSet<KeyCode>,
    pub mouse_pos: (f32, f32),
    /// Pointer is inside the window
    pub mouse_inside: bool,
    pub window_size: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            mouse_pos: (0.0, 0.0),
            mouse_inside: false,
            window_size: (0.0, 0.0),
        }
    }

    pub fn key_down(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// Drop all held keys (e.g. on focus loss, so nothing sticks)
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.keys_pressed.clear();
    }

    fn held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.keys_held.contains(k))
    }

    fn axis(&self, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
        let mut value = 0.0;
        if self.held(negative) {
            value -= 1.0;
        }
        if self.held(positive) {
            value += 1.0;
        }
        value
    }

    /// Q zooms out (bigger half-height), E zooms in. Q wins when both are held.
    fn zoom_axis(&self) -> f32 {
        if self.held(&[KeyCode::KeyQ]) {
            1.0
        } else if self.held(&[KeyCode::KeyE]) {
            -1.0
        } else {
            0.0
        }
    }

    /// Continuous motion input for this frame
    pub fn motion_input(&self, edge_scroll: &EdgeScrollSettings) -> MotionInput {
        let mut move_axes = Vec2::new(
            self.axis(&[KeyCode::KeyA, KeyCode::ArrowLeft], &[KeyCode::KeyD, KeyCode::ArrowRight]),
            self.axis(&[KeyCode::KeyS, KeyCode::ArrowDown], &[KeyCode::KeyW, KeyCode::ArrowUp]),
        );
        if edge_scroll.enabled && self.mouse_inside {
            move_axes += self.edge_scroll_axes(edge_scroll.margin_px);
        }

        MotionInput {
            move_axes: move_axes.clamp(Vec2::NEG_ONE, Vec2::ONE),
            zoom: self.zoom_axis(),
        }
    }

    /// Unit push toward whichever window edges the pointer is near (y up)
    fn edge_scroll_axes(&self, margin: f32) -> Vec2 {
        let (w, h) = self.window_size;
        if w <= 0.0 || h <= 0.0 {
            return Vec2::ZERO;
        }
        let (mx, my) = self.mouse_pos;
        let mut axes = Vec2::ZERO;
        if mx <= margin {
            axes.x -= 1.0;
        } else if mx >= w - margin {
            axes.x += 1.0;
        }
        // Screen y grows downward
        if my <= margin {
            axes.y += 1.0;
        } else if my >= h - margin {
            axes.y -= 1.0;
        }
        axes
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot actions from this frame's key presses
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputResult {
    pub toggle_pause: bool,
    pub toggle_fullscreen: bool,
    pub toggle_grid_lines: bool,
    /// Enter: close the acknowledgement panel
    pub dismiss_panel: bool,
    /// Space: skip the running clip
    pub skip_clip: bool,
}

/// Process keyboard input and return actions to take
pub fn process_keyboard(input: &mut InputState) -> InputResult {
    let mut result = InputResult::default();

    if input.keys_pressed.remove(&KeyCode::Escape) {
        result.toggle_pause = true;
    }
    if input.keys_pressed.remove(&KeyCode::F11) {
        result.toggle_fullscreen = true;
    }
    if input.keys_pressed.remove(&KeyCode::KeyG) {
        result.toggle_grid_lines = true;
    }
    if input.keys_pressed.remove(&KeyCode::Enter) || input.keys_pressed.remove(&KeyCode::NumpadEnter) {
        result.dismiss_panel = true;
    }
    if input.keys_pressed.remove(&KeyCode::Space) {
        result.skip_clip = true;
    }

    // Held-key axes are read separately; drop stale edges
    input.keys_pressed.clear();
    result
}
