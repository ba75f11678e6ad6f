//! Per-frame universe simulation.
//!
//! One `tick` per rendered frame, in a fixed order:
//! 1. drain the event queue and route each event to its consumer
//! 2. advance the camera controller by scaled time
//! 3. scan locations (skipped while paused) and begin visits
//! 4. advance the playback gate by unscaled time

use crate::config::UniverseConfig;
use crate::events::{EventQueue, GameEvent};
use crate::locations::{DateLabel, LocationRegistry};
use crate::motion::{CameraMotionController, MotionInput, UniverseCoordinate};
use crate::playback::{PlaybackGate, PlaybackSink};
use crate::proximity;
use crate::time_system::FrameTime;

/// Everything the simulation owns
pub struct Universe {
    pub controller: CameraMotionController,
    pub locations: LocationRegistry,
    pub gate: PlaybackGate,
    pub events: EventQueue,
}

impl Universe {
    pub fn from_config(config: &UniverseConfig) -> Self {
        Self {
            controller: CameraMotionController::new(config.motion),
            locations: LocationRegistry::from_specs(
                &config.locations,
                config.visitation.xy_distance,
                config.visitation.z_distance,
            ),
            gate: PlaybackGate::new(config.playback.fade_seconds),
            events: EventQueue::new(),
        }
    }

    pub fn coordinate(&self) -> UniverseCoordinate {
        self.controller.coordinate()
    }

    /// The date the camera currently stands on
    pub fn date(&self) -> DateLabel {
        DateLabel::for_coordinate(self.coordinate(), self.controller.settings())
    }

    /// Run one frame. Returns the events routed this tick.
    pub fn tick(&mut self, frame: FrameTime, input: MotionInput, sink: &mut dyn PlaybackSink) -> Vec<GameEvent> {
        puffin::profile_function!();

        let routed: Vec<GameEvent> = self.events.drain().collect();
        for event in &routed {
            self.route(event, sink);
        }

        let coordinate = {
            puffin::profile_scope!("camera_motion");
            self.controller.update(input, frame.dt)
        };

        if !frame.paused {
            puffin::profile_scope!("proximity");
            for visit in proximity::scan(&mut self.locations, coordinate) {
                self.events.push(GameEvent::LocationVisited {
                    index: visit.index,
                    name: visit.name.clone(),
                });
                self.gate.begin(visit, &mut self.controller);
            }
        }

        self.gate
            .update(frame.unscaled_dt, &mut self.controller, sink, &mut self.events);

        routed
    }

    fn route(&mut self, event: &GameEvent, sink: &mut dyn PlaybackSink) {
        match event {
            GameEvent::DialMoved { delta } => self.controller.on_dial_move(delta.x, delta.y),
            GameEvent::DialZoomed { delta } => self.controller.on_dial_zoom(*delta),
            GameEvent::PlaybackFinished { asset } => self.gate.on_playback_finished(asset.as_ref(), sink),
            GameEvent::PanelDismissed => {
                if !self.gate.dismiss_panel(&mut self.controller) {
                    log::debug!("Dismiss ignored: no panel open");
                }
            }
            GameEvent::PauseToggled { paused } => {
                log::info!("{}", if *paused { "Paused" } else { "Resumed" });
            }
            GameEvent::LocationVisited { name, .. } => log::debug!("Visit event for '{}'", name),
            GameEvent::FadeCompleted { target } => log::debug!("Fade to {:?} complete", target),
            GameEvent::PlaybackStarted { asset } => log::debug!("Playback of '{}' started", asset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fade::FadeTarget;
    use crate::locations::{AssetHandle, LocationSpec, Tolerance};
    use crate::motion::ZoomPolicy;
    use crate::playback::tests::RecordingSink;
    use crate::playback::GateState;
    use crate::video::{ClipLibrary, ClipPlayer, ClipSpec};
    use glam::Vec2;

    const DT: f32 = 0.02;

    fn scenario_config() -> UniverseConfig {
        let mut config = UniverseConfig::default();
        config.motion.start_zoom = 3.0;
        config.motion.zoom_policy = ZoomPolicy::Clamped;
        config.playback.fade_seconds = 1.0;
        config.locations = vec![LocationSpec {
            name: "Origin".to_string(),
            x: 0.0,
            y: 0.0,
            z: 3.0,
            tolerance: Some(Tolerance::uniform(0.5)),
            asset: Some(AssetHandle::new("origin")),
        }];
        config.clips = vec![ClipSpec {
            id: "origin".to_string(),
            title: "Origin".to_string(),
            duration_secs: 0.5,
        }];
        config
    }

    #[test]
    fn test_visit_suspends_and_starts_playback_after_fade() {
        let mut universe = Universe::from_config(&scenario_config());
        let mut sink = RecordingSink::default();

        universe.tick(FrameTime::running(DT), MotionInput::default(), &mut sink);
        assert!(universe.locations.get(0).unwrap().is_visited());
        assert!(!universe.controller.can_move());
        assert_eq!(universe.gate.state(), GateState::FadingOut);
        assert!(universe.gate.is_fading());
        assert!(sink.started.is_empty());

        // The fade started during the first tick and has DT behind it already
        let mut ticks = 0;
        while sink.started.is_empty() && ticks < 200 {
            universe.tick(FrameTime::running(DT), MotionInput::default(), &mut sink);
            ticks += 1;
        }
        assert_eq!(sink.started, vec![AssetHandle::new("origin")]);
        let elapsed = (ticks + 1) as f32 * DT;
        assert!(elapsed >= 1.0 - 1e-3 && elapsed <= 1.0 + 2.0 * DT);
    }

    #[test]
    fn test_full_loop_with_clip_player() {
        let config = scenario_config();
        let mut universe = Universe::from_config(&config);
        let mut player = ClipPlayer::new(ClipLibrary::from_specs(&config.clips));

        let mut routed = Vec::new();
        for _ in 0..200 {
            player.update(DT, &mut universe.events);
            routed.extend(universe.tick(FrameTime::running(DT), MotionInput::default(), &mut player));
            if universe.gate.state() == GateState::Idle && universe.gate.panel_visible() {
                break;
            }
        }
        assert!(universe.gate.panel_visible());
        assert!(!universe.controller.can_move());
        assert!(routed.contains(&GameEvent::FadeCompleted {
            target: FadeTarget::Opaque
        }));
        assert!(routed.contains(&GameEvent::PlaybackFinished {
            asset: Some(AssetHandle::new("origin"))
        }));

        universe.events.push(GameEvent::PanelDismissed);
        universe.tick(FrameTime::running(DT), MotionInput::default(), &mut player);
        assert!(universe.controller.can_move());
        assert!(universe.gate.is_idle());

        // Standing on a visited location never re-triggers
        for _ in 0..10 {
            universe.tick(FrameTime::running(DT), MotionInput::default(), &mut player);
        }
        assert!(universe.gate.is_idle());
    }

    #[test]
    fn test_paused_tick_freezes_motion_and_scans() {
        let mut config = scenario_config();
        config.locations[0].x = 1.0;
        let mut universe = Universe::from_config(&config);
        let mut sink = RecordingSink::default();

        let paused = FrameTime {
            dt: 0.0,
            unscaled_dt: DT,
            paused: true,
        };
        let input = MotionInput {
            move_axes: Vec2::X,
            zoom: 0.0,
        };
        for _ in 0..100 {
            universe.tick(paused, input, &mut sink);
        }
        assert_eq!(universe.coordinate().x, 0.0);
        assert_eq!(universe.locations.visited_count(), 0);
    }

    #[test]
    fn test_dial_events_are_routed() {
        let mut config = scenario_config();
        config.locations.clear();
        let mut universe = Universe::from_config(&config);
        let mut sink = RecordingSink::default();

        universe.events.push(GameEvent::DialMoved {
            delta: Vec2::new(0.5, 0.0),
        });
        universe.events.push(GameEvent::DialZoomed { delta: -2.0 });
        universe.tick(FrameTime::running(DT), MotionInput::default(), &mut sink);

        assert!(universe.coordinate().x > 0.0);
        assert!(universe.coordinate().zoom_size < 3.0);
    }
}
