//! Universe map constants: date labels, starfield and markers.

/// Day columns across the full X span
pub const DAYS_PER_SPAN: f32 = 30.0;
/// Month rows across the full Y span
pub const MONTHS_PER_SPAN: usize = 12;
/// Month labels, bottom row first
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
/// Year at z = 0
pub const BASE_YEAR: i32 = -9000;
/// Years per zoom unit when fully zoomed out
pub const MIN_YEARS_PER_UNIT: f32 = 2.0;
/// Years per zoom unit when fully zoomed in
pub const MAX_YEARS_PER_UNIT: f32 = 50.0;
/// Curve exponent applied to zoom-in fraction for year scaling
pub const YEAR_ZOOM_EXPONENT: f32 = 1.5;

/// Default starfield seed
pub const DEFAULT_STARFIELD_SEED: u32 = 7;
/// Default number of stars
pub const DEFAULT_STAR_COUNT: usize = 1800;
/// Starfield extends this far past the pan bounds
pub const STARFIELD_MARGIN: f32 = 6.0;
/// Perlin frequency for star clustering
pub const STAR_CLUSTER_FREQUENCY: f64 = 0.35;
/// Smallest and largest star quad size (world units)
pub const STAR_SIZE_RANGE: (f32, f32) = (0.015, 0.06);

/// Location marker quad size (world units)
pub const MARKER_SIZE: f32 = 0.35;
/// Marker color pulse speed (cycles per second)
pub const MARKER_PULSE_SPEED: f32 = 0.8;
/// Marker scale at the ends of the pulse
pub const MARKER_SCALE_RANGE: (f32, f32) = (0.9, 1.1);
/// Marker drift amplitude (world units)
pub const MARKER_FLOAT_AMPLITUDE: f32 = 0.04;
/// Marker drift speed
pub const MARKER_FLOAT_SPEED: f32 = 0.5;
