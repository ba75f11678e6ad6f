//! Game event system for decoupled communication between systems.
//!
//! The UI, the clip player and the simulation push events; the simulation
//! drains the queue once per tick and routes each event to its consumer.

use crate::fade::FadeTarget;
use crate::locations::AssetHandle;
use glam::Vec2;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A linear dial produced pan input (already scaled to world input)
    DialMoved { delta: Vec2 },
    /// The rotary dial produced zoom input (already scaled)
    DialZoomed { delta: f32 },
    /// The camera entered a location's tolerance box for the first time
    LocationVisited { index: usize, name: String },
    /// An overlay fade reached its target
    FadeCompleted { target: FadeTarget },
    /// The playback collaborator was handed an asset
    PlaybackStarted { asset: AssetHandle },
    /// The playback collaborator finished (or skipped) its asset
    PlaybackFinished { asset: Option<AssetHandle> },
    /// The user closed the acknowledgement panel
    PanelDismissed,
    /// Scaled time was frozen or unfrozen
    PauseToggled { paused: bool },
}

/// Simple event queue - events are pushed during a frame, drained at the next tick
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Push several events at once
    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.events.extend(events);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
