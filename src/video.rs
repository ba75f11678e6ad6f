//! Clip player standing in for a video backend.
//!
//! Clips are timed, not decoded: each clip id from the library has a title
//! and a duration, and the player reports completion once that much scaled
//! time has passed.

use crate::constants::DEFAULT_CLIP_SECONDS;
use crate::events::{EventQueue, GameEvent};
use crate::locations::AssetHandle;
use crate::playback::PlaybackSink;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_clip_seconds() -> f32 {
    DEFAULT_CLIP_SECONDS
}

/// Clip entry as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSpec {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_clip_seconds")]
    pub duration_secs: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub title: String,
    pub duration: f32,
}

/// Known clips by asset id
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: HashMap<AssetHandle, ClipInfo>,
}

impl ClipLibrary {
    pub fn from_specs(specs: &[ClipSpec]) -> Self {
        let mut clips = HashMap::new();
        for spec in specs {
            let title = if spec.title.is_empty() {
                spec.id.clone()
            } else {
                spec.title.clone()
            };
            let info = ClipInfo {
                title,
                duration: spec.duration_secs.max(0.0),
            };
            if clips.insert(AssetHandle::new(spec.id.clone()), info).is_some() {
                log::warn!("Duplicate clip id '{}', keeping the last entry", spec.id);
            }
        }
        Self { clips }
    }

    pub fn get(&self, asset: &AssetHandle) -> Option<&ClipInfo> {
        self.clips.get(asset)
    }

    pub fn contains(&self, asset: &AssetHandle) -> bool {
        self.clips.contains_key(asset)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NowPlaying {
    asset: AssetHandle,
    title: String,
    duration: f32,
    elapsed: f32,
}

/// Progress of the running clip, for the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct ClipStatus<'a> {
    pub title: &'a str,
    pub elapsed: f32,
    pub duration: f32,
}

impl ClipStatus<'_> {
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClipPlayer {
    library: ClipLibrary,
    now_playing: Option<NowPlaying>,
    /// Set when asked to play an unknown clip; reported finished on the next update
    failed: Option<AssetHandle>,
}

impl ClipPlayer {
    pub fn new(library: ClipLibrary) -> Self {
        Self {
            library,
            now_playing: None,
            failed: None,
        }
    }

    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    pub fn now_playing(&self) -> Option<ClipStatus<'_>> {
        self.now_playing.as_ref().map(|clip| ClipStatus {
            title: &clip.title,
            elapsed: clip.elapsed,
            duration: clip.duration,
        })
    }

    /// Advance the running clip by scaled time
    pub fn update(&mut self, dt: f32, events: &mut EventQueue) {
        if let Some(asset) = self.failed.take() {
            events.push(GameEvent::PlaybackFinished { asset: Some(asset) });
        }

        let Some(clip) = self.now_playing.as_mut() else {
            return;
        };
        clip.elapsed += dt.max(0.0);
        if clip.elapsed >= clip.duration {
            log::info!("Clip '{}' finished", clip.title);
            let asset = clip.asset.clone();
            self.now_playing = None;
            events.push(GameEvent::PlaybackFinished { asset: Some(asset) });
        }
    }

    /// End the running clip early. Returns false if nothing was playing.
    pub fn skip(&mut self, events: &mut EventQueue) -> bool {
        match self.now_playing.take() {
            Some(clip) => {
                log::info!("Skipped clip '{}'", clip.title);
                events.push(GameEvent::PlaybackFinished {
                    asset: Some(clip.asset),
                });
                true
            }
            None => false,
        }
    }
}

impl PlaybackSink for ClipPlayer {
    fn start_playback(&mut self, asset: &AssetHandle) {
        if self.now_playing.as_ref().is_some_and(|c| &c.asset == asset) {
            return;
        }
        match self.library.get(asset) {
            Some(info) => {
                log::info!("Playing clip '{}' ({:.1}s)", info.title, info.duration);
                self.now_playing = Some(NowPlaying {
                    asset: asset.clone(),
                    title: info.title.clone(),
                    duration: info.duration,
                    elapsed: 0.0,
                });
            }
            None => {
                log::error!("Clip '{}' is not in the clip library", asset);
                self.now_playing = None;
                self.failed = Some(asset.clone());
            }
        }
    }

    fn stop_playback(&mut self) {
        self.now_playing = None;
        self.failed = None;
    }

    fn is_playing(&self) -> bool {
        self.now_playing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> ClipPlayer {
        ClipPlayer::new(ClipLibrary::from_specs(&[
            ClipSpec {
                id: "harbor".to_string(),
                title: "The Harbor".to_string(),
                duration_secs: 1.0,
            },
            ClipSpec {
                id: "ridge".to_string(),
                title: String::new(),
                duration_secs: 2.0,
            },
        ]))
    }

    #[test]
    fn test_clip_finishes_after_duration() {
        let mut player = player();
        let mut events = EventQueue::new();
        player.start_playback(&AssetHandle::new("harbor"));
        assert!(player.is_playing());

        player.update(0.6, &mut events);
        assert!(events.is_empty());
        player.update(0.6, &mut events);
        assert!(!player.is_playing());

        let drained: Vec<_> = events.drain().collect();
        assert_eq!(
            drained,
            vec![GameEvent::PlaybackFinished {
                asset: Some(AssetHandle::new("harbor"))
            }]
        );
    }

    #[test]
    fn test_paused_clip_does_not_advance() {
        let mut player = player();
        let mut events = EventQueue::new();
        player.start_playback(&AssetHandle::new("harbor"));
        for _ in 0..100 {
            player.update(0.0, &mut events);
        }
        assert!(player.is_playing());
        assert!(events.is_empty());
    }

    #[test]
    fn test_restarting_same_clip_is_noop() {
        let mut player = player();
        let mut events = EventQueue::new();
        player.start_playback(&AssetHandle::new("harbor"));
        player.update(0.5, &mut events);
        player.start_playback(&AssetHandle::new("harbor"));
        assert_eq!(player.now_playing().map(|s| s.elapsed), Some(0.5));
    }

    #[test]
    fn test_unknown_clip_reports_finished() {
        let mut player = player();
        let mut events = EventQueue::new();
        player.start_playback(&AssetHandle::new("missing"));
        assert!(!player.is_playing());
        player.update(0.016, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_skip_and_title_fallback() {
        let mut player = player();
        let mut events = EventQueue::new();
        assert!(!player.skip(&mut events));
        player.start_playback(&AssetHandle::new("ridge"));
        assert_eq!(player.now_playing().map(|s| s.title), Some("ridge"));
        assert!(player.skip(&mut events));
        assert!(!player.is_playing());
        assert_eq!(events.len(), 1);
    }
}
