//! UI and window constants.

/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;

/// How long the "visited" toast stays on screen (seconds)
pub const TOAST_SECONDS: f32 = 3.0;
/// Pointer distance from the window edge that starts edge scrolling (pixels)
pub const DEFAULT_EDGE_SCROLL_MARGIN: f32 = 20.0;
