use serde::{Deserialize, Serialize};

/// Projection and orbit control settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view, degrees.
    pub fovy: f32,
    /// Near clip plane distance.
    pub znear: f32,
    /// Far clip plane distance.
    pub zfar: f32,
    /// Orbit speed in radians per pixel of drag.
    pub rotate_speed: f32,
    /// Pan speed in world units per pixel of drag.
    pub pan_speed: f32,
    /// Dolly fraction per scroll step.
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 70.0,
            znear: 0.001,
            zfar: 1000.0,
            rotate_speed: 0.01,
            pan_speed: 0.003,
            zoom_speed: 0.05,
        }
    }
}
