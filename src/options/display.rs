use serde::{Deserialize, Serialize};

/// Render toggles and flower template selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Draw the terrain surface.
    pub show_terrain: bool,
    /// Draw the flower instances.
    pub show_flowers: bool,
    /// Mesh name to use as the flower template when loading from a model
    /// file. Empty selects the file's first mesh.
    pub flower_mesh: String,
    /// Uniform scale baked into flower templates loaded from a file.
    pub flower_scale: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_terrain: true,
            show_flowers: true,
            flower_mesh: String::new(),
            flower_scale: 0.004,
        }
    }
}
