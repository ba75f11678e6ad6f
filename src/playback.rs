//! Playback gate: the fade -> play -> fade -> resume sequence around a visit.
//!
//! ```text
//! Idle --visit--> FadingOut --opaque--> Playing --finished--> FadingIn --clear--> Idle
//! ```
//!
//! The controller is suspended when a visit begins and resumed only when the
//! user dismisses the acknowledgement panel. Visits that arrive while a
//! sequence is running wait in a queue and start after dismissal.

use crate::events::{EventQueue, GameEvent};
use crate::fade::{Fade, FadeTarget};
use crate::locations::AssetHandle;
use crate::motion::CameraMotionController;
use crate::proximity::Visit;
use std::collections::VecDeque;

/// External clip playback
pub trait PlaybackSink {
    /// Begin playing `asset`. Completion is reported as `GameEvent::PlaybackFinished`.
    fn start_playback(&mut self, asset: &AssetHandle);
    /// Stop whatever is playing without reporting completion
    fn stop_playback(&mut self);
    fn is_playing(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    FadingOut,
    Playing,
    FadingIn,
}

#[derive(Debug, Clone)]
pub struct PlaybackGate {
    state: GateState,
    fade: Fade,
    current: Option<Visit>,
    pending: VecDeque<Visit>,
    overlay_visible: bool,
    panel_visible: bool,
}

impl PlaybackGate {
    pub fn new(fade_seconds: f32) -> Self {
        Self {
            state: GateState::Idle,
            fade: Fade::new(fade_seconds),
            current: None,
            pending: VecDeque::new(),
            overlay_visible: false,
            panel_visible: false,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Opacity of the full-screen fade overlay
    pub fn fade_opacity(&self) -> f32 {
        self.fade.opacity()
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_running()
    }

    /// The visit whose sequence is running (or whose panel is still open)
    pub fn current(&self) -> Option<&Visit> {
        self.current.as_ref()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn is_idle(&self) -> bool {
        self.state == GateState::Idle && !self.panel_visible && self.pending.is_empty()
    }

    /// Suspend the controller and start the sequence for `visit`, or queue it
    /// behind the one already running.
    pub fn begin(&mut self, visit: Visit, controller: &mut CameraMotionController) {
        controller.stop_movement();

        if self.state == GateState::Idle && !self.panel_visible {
            self.start_visit(visit);
        } else {
            log::debug!("Queued visit to '{}' behind the running sequence", visit.name);
            self.pending.push_back(visit);
        }
    }

    /// Advance the fade by unscaled time and react to its completion
    pub fn update(
        &mut self,
        unscaled_dt: f32,
        controller: &mut CameraMotionController,
        sink: &mut dyn PlaybackSink,
        events: &mut EventQueue,
    ) {
        let Some(target) = self.fade.update(unscaled_dt) else {
            return;
        };
        events.push(GameEvent::FadeCompleted { target });

        match (self.state, target) {
            (GateState::FadingOut, FadeTarget::Opaque) => self.enter_playing(sink, events),
            (GateState::FadingIn, FadeTarget::Clear) => {
                self.state = GateState::Idle;
                if !self.panel_visible {
                    self.start_next(controller);
                }
            }
            _ => {}
        }
    }

    /// The playback collaborator reported completion. Ignored unless playing.
    pub fn on_playback_finished(&mut self, asset: Option<&AssetHandle>, sink: &mut dyn PlaybackSink) {
        if self.state != GateState::Playing {
            return;
        }
        let expected = self.current.as_ref().and_then(|v| v.asset.as_ref());
        if let (Some(finished), Some(expected)) = (asset, expected) {
            if finished != expected {
                log::warn!("Ignoring completion of '{}' while '{}' is playing", finished, expected);
                return;
            }
        }
        if sink.is_playing() {
            sink.stop_playback();
        }
        self.finish_playback();
    }

    /// Close the acknowledgement panel. Returns false if no panel was open.
    pub fn dismiss_panel(&mut self, controller: &mut CameraMotionController) -> bool {
        if !self.panel_visible {
            return false;
        }
        self.panel_visible = false;
        self.current = None;

        // A fade-in still running finishes on its own; the next visit
        // (if any) waits for it unless it can take over now
        if self.state == GateState::Idle || !self.pending.is_empty() {
            self.start_next(controller);
        }
        true
    }

    fn start_visit(&mut self, visit: Visit) {
        log::info!("Fading out for '{}'", visit.name);
        self.current = Some(visit);
        self.state = GateState::FadingOut;
        self.fade.start(FadeTarget::Opaque);
    }

    fn start_next(&mut self, controller: &mut CameraMotionController) {
        match self.pending.pop_front() {
            Some(next) => self.start_visit(next),
            None => {
                if !controller.can_move() {
                    log::info!("Resuming camera motion");
                }
                controller.start_movement();
            }
        }
    }

    fn enter_playing(&mut self, sink: &mut dyn PlaybackSink, events: &mut EventQueue) {
        let asset = self.current.as_ref().and_then(|v| v.asset.clone());
        match asset {
            Some(asset) => {
                sink.start_playback(&asset);
                events.push(GameEvent::PlaybackStarted { asset });
                self.overlay_visible = true;
                self.state = GateState::Playing;
            }
            None => {
                let name = self.current.as_ref().map(|v| v.name.as_str()).unwrap_or("?");
                log::error!("No asset to play for '{}', skipping playback", name);
                self.finish_playback();
            }
        }
    }

    fn finish_playback(&mut self) {
        self.overlay_visible = false;
        self.panel_visible = true;
        self.state = GateState::FadingIn;
        self.fade.start(FadeTarget::Clear);
    }
}
