//! Full-screen overlay fade.
//!
//! A fade linearly interpolates an opacity over a fixed duration of unscaled
//! time. Starting a new fade replaces any fade in flight, and completion is
//! reported exactly once from `update`.

use crate::constants::MIN_FADE_SECONDS;

/// Where a fade ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeTarget {
    /// Fade to black (covering the map)
    Opaque,
    /// Fade back to the map
    Clear,
}

impl FadeTarget {
    fn start_opacity(self) -> f32 {
        match self {
            FadeTarget::Opaque => 0.0,
            FadeTarget::Clear => 1.0,
        }
    }

    fn end_opacity(self) -> f32 {
        match self {
            FadeTarget::Opaque => 1.0,
            FadeTarget::Clear => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveFade {
    target: FadeTarget,
    elapsed: f32,
}

/// Restartable timed opacity
#[derive(Debug, Clone)]
pub struct Fade {
    duration: f32,
    opacity: f32,
    active: Option<ActiveFade>,
}

impl Fade {
    /// A fade with the given duration, starting fully clear
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(MIN_FADE_SECONDS),
            opacity: 0.0,
            active: None,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// The fade in flight, if any
    pub fn target(&self) -> Option<FadeTarget> {
        self.active.map(|a| a.target)
    }

    /// Start fading toward `target`, cancelling any fade in flight.
    /// Opacity jumps to the target's start value.
    pub fn start(&mut self, target: FadeTarget) {
        self.opacity = target.start_opacity();
        self.active = Some(ActiveFade {
            target,
            elapsed: 0.0,
        });
    }

    /// Advance by unscaled time. Returns the target on the tick the fade completes.
    pub fn update(&mut self, unscaled_dt: f32) -> Option<FadeTarget> {
        let active = self.active.as_mut()?;
        active.elapsed += unscaled_dt.max(0.0);

        let target = active.target;
        let t = (active.elapsed / self.duration).min(1.0);
        self.opacity = target.start_opacity() + (target.end_opacity() - target.start_opacity()) * t;

        if active.elapsed >= self.duration {
            self.opacity = target.end_opacity();
            self.active = None;
            return Some(target);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_completes_exactly_once() {
        let mut fade = Fade::new(1.0);
        fade.start(FadeTarget::Opaque);

        let mut completions = 0;
        for _ in 0..100 {
            if fade.update(0.05).is_some() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(fade.opacity(), 1.0);
        assert!(!fade.is_running());
    }

    #[test]
    fn test_fade_is_linear() {
        let mut fade = Fade::new(2.0);
        fade.start(FadeTarget::Clear);
        assert_eq!(fade.opacity(), 1.0);
        fade.update(0.5);
        assert!((fade.opacity() - 0.75).abs() < 1e-6);
        fade.update(0.5);
        assert!((fade.opacity() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_restart_cancels_in_flight_fade() {
        let mut fade = Fade::new(1.0);
        fade.start(FadeTarget::Opaque);
        fade.update(0.9);
        fade.start(FadeTarget::Clear);
        assert_eq!(fade.target(), Some(FadeTarget::Clear));

        // The first fade would have finished here; the replacement has not
        assert_eq!(fade.update(0.2), None);
        assert_eq!(fade.update(0.8), Some(FadeTarget::Clear));
        assert_eq!(fade.opacity(), 0.0);
    }

    #[test]
    fn test_zero_duration_is_guarded() {
        let mut fade = Fade::new(0.0);
        assert!(fade.duration() > 0.0);
        fade.start(FadeTarget::Opaque);
        assert_eq!(fade.update(0.016), Some(FadeTarget::Opaque));
    }

    #[test]
    fn test_idle_update_reports_nothing() {
        let mut fade = Fade::new(1.0);
        assert_eq!(fade.update(1.0), None);
        assert_eq!(fade.opacity(), 0.0);
    }
}
