//! Tuning constants organized by domain.
//!
//! Runtime-tunable values have a `DEFAULT_` constant here and a field in
//! `config::UniverseConfig`. Everything else is fixed at compile time.

mod camera;
mod dial;
mod playback;
mod time;
mod ui;
mod universe;

pub use camera::*;
pub use dial::*;
pub use playback::*;
pub use time::*;
pub use ui::*;
pub use universe::*;
