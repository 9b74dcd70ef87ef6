use serde::{Deserialize, Serialize};

/// Scene lighting parameters.
///
/// Directions point from the surface toward the light and are normalized
/// when uploaded, so presets can use whole-number vectors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingOptions {
    /// Direction toward the sun.
    pub sun_direction: [f32; 3],
    /// Sun diffuse intensity.
    pub sun_intensity: f32,
    /// Direction toward the fill light.
    pub fill_direction: [f32; 3],
    /// Fill diffuse intensity.
    pub fill_intensity: f32,
    /// Flat ambient term.
    pub ambient: f32,
    /// Blinn-Phong specular strength.
    pub specular_intensity: f32,
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            sun_direction: [2.8, 3.0, 0.0],
            sun_intensity: 0.8,
            fill_direction: [-2.0, 1.5, -1.0],
            fill_intensity: 0.25,
            ambient: 0.3,
            specular_intensity: 0.25,
            shininess: 32.0,
        }
    }
}
