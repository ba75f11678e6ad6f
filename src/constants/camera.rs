//! Camera motion constants.

/// Base pan speed (world units per second before zoom scaling)
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
/// Multiplier applied on top of the zoom-dependent pan scale
pub const DEFAULT_MOVE_SCALE_SPEED: f32 = 2.0;
/// Zoom-size change per second while a zoom key is held
pub const DEFAULT_ZOOM_SPEED: f32 = 5.0;
/// Smallest orthographic half-height (most zoomed in)
pub const DEFAULT_MIN_ZOOM: f32 = 1.0;
/// Largest orthographic half-height (most zoomed out)
pub const DEFAULT_MAX_ZOOM: f32 = 5.0;
/// Pan bound on X when fully zoomed in
pub const DEFAULT_MAX_X: f32 = 8.0;
/// Pan bound on Y when fully zoomed in
pub const DEFAULT_MAX_Y: f32 = 5.0;

/// Decay rate of dial pan momentum (higher = quicker decay)
pub const DEFAULT_DIAL_MOVE_DAMP: f32 = 8.0;
/// Decay rate of dial zoom momentum (higher = quicker decay)
pub const DEFAULT_DIAL_ZOOM_DAMP: f32 = 8.0;
/// Per-axis cap on accumulated dial pan input
pub const DEFAULT_DIAL_MOVE_CLAMP: f32 = 1.5;
/// Cap on accumulated dial zoom input
pub const DEFAULT_DIAL_ZOOM_CLAMP: f32 = 10.0;

/// Blend from triangle to cosine shape in bounce zoom
pub const DEFAULT_BOUNCE_EASE: f32 = 0.35;

/// Pan scale when fully zoomed in
pub const MOVE_SCALE_ZOOMED_IN: f32 = 0.05;
/// Pan scale when fully zoomed out
pub const MOVE_SCALE_ZOOMED_OUT: f32 = 1.0;

/// Zoom ranges narrower than this are treated as a single zoom level
pub const ZOOM_RANGE_EPSILON: f32 = 1e-4;
/// Bisection steps used to invert the eased bounce curve
pub const BOUNCE_INVERT_ITERATIONS: u32 = 32;
