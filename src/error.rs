//! The crate-wide error enum.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::model::GltfError;

/// Errors produced by the floret crate.
#[derive(Debug)]
pub enum FloretError {
    /// GPU context could not be brought up.
    Gpu(RenderContextError),
    /// Failed to load a terrain or flower model file.
    ModelLoad(GltfError),
    /// Scene assembly failure (empty surface, degenerate scatter weights).
    SceneBuild(String),
    /// WGSL shader composition failure.
    Shader(String),
    /// I/O outside the more specific cases above.
    Io(std::io::Error),
    /// Options TOML could not be parsed or serialized.
    OptionsParse(String),
    /// Event loop creation or run failure.
    Viewer(String),
}

impl fmt::Display for FloretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::ModelLoad(e) => write!(f, "model load error: {e}"),
            Self::SceneBuild(msg) => {
                write!(f, "scene build error: {msg}")
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for FloretError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::ModelLoad(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for FloretError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<GltfError> for FloretError {
    fn from(e: GltfError) -> Self {
        Self::ModelLoad(e)
    }
}

impl From<std::io::Error> for FloretError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
