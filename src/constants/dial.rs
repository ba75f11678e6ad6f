//! Dial gesture constants.

/// Rotary steps smaller than this (degrees) are ignored
pub const DEFAULT_ANGULAR_DEADZONE_DEG: f32 = 0.6;
/// Extra degrees required before a direction reversal is honored
pub const DEFAULT_ANGULAR_HYSTERESIS_DEG: f32 = 0.4;
/// Time constant (seconds) of the pointer hand smoothing
pub const DEFAULT_POINTER_SMOOTHING_TIME: f32 = 0.06;
/// Linear steps smaller than this (pixels) are ignored
pub const DEFAULT_LINEAR_DEADZONE_PX: f32 = 1.5;

/// Pan input per pixel dragged on the X dial
pub const DEFAULT_X_PER_PIXEL: f32 = 0.01;
/// Pan input per pixel dragged on the Y dial
pub const DEFAULT_Y_PER_PIXEL: f32 = 0.01;
/// Zoom input per degree turned on the rotary dial
pub const DEFAULT_ZOOM_PER_DEGREE: f32 = 1.0;

/// Floor for smoothing time constants and rates
pub const SMOOTHING_EPSILON: f32 = 1e-4;

/// Diameter of the rotary dial widget (points)
pub const ROTARY_DIAL_SIZE: f32 = 110.0;
/// Length of the linear dial tracks (points)
pub const LINEAR_DIAL_LENGTH: f32 = 150.0;
/// Thickness of the linear dial tracks (points)
pub const LINEAR_DIAL_THICKNESS: f32 = 26.0;
