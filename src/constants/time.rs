//! Frame timing constants.

/// Longest frame delta fed to the simulation (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;
