//! Visitation and playback constants.

/// Duration of each overlay fade (seconds, unscaled time)
pub const DEFAULT_FADE_SECONDS: f32 = 2.5;
/// Fades shorter than this complete on the next update
pub const MIN_FADE_SECONDS: f32 = 1e-3;

/// Default X/Y tolerance around a location
pub const DEFAULT_XY_DISTANCE: f32 = 0.25;
/// Default zoom tolerance around a location
pub const DEFAULT_Z_DISTANCE: f32 = 0.25;

/// Clip length used when a clip entry leaves out its duration
pub const DEFAULT_CLIP_SECONDS: f32 = 6.0;
