use serde::{Deserialize, Serialize};

/// Growth simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrowthOptions {
    /// Number of flower instances scattered over the surface.
    pub population: u32,
    /// Instances closer to the target than this accelerate.
    pub near_radius: f32,
    /// Rate gained per step while near the target.
    pub acceleration: f32,
    /// Rate multiplier per step while away from the target.
    pub decay: f32,
    /// Scatter seed, so the same surface plants identically across runs.
    pub scatter_seed: u64,
}

impl Default for GrowthOptions {
    fn default() -> Self {
        Self {
            population: 500,
            near_radius: 0.1,
            acceleration: 0.001,
            decay: 0.9,
            scatter_seed: 0,
        }
    }
}
