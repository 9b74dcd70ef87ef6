//! Frame pacing and the scene lighting uniform.

/// Frame pacing with a smoothed FPS readout.
pub mod frame_timing;
/// Scene lighting uniform and its GPU bind group.
pub mod lighting;
