// Crate-wide lint levels live in [workspace.lints] in Cargo.toml.

//! GPU-accelerated interactive 3D scene built on wgpu.
//!
//! Floret scatters an instanced population of flowers across a terrain mesh
//! and grows them toward the point the user last clicked. Clicks are ray
//! cast against the merged terrain surface; each frame every instance runs a
//! small distance-gated growth update and its transform is rewritten into
//! the shared instance buffer.
//!
//! # Key entry points
//!
//! - [`engine::FloretEngine`] - the rendering engine and command executor
//! - [`growth::GrowthField`] - the per-instance growth state and update
//! - [`scene::SceneData`] - terrain, flower template, scatter, pick surface
//! - [`options::Options`] - runtime configuration (display, lighting,
//!   camera, growth, keybindings)
//!
//! # Architecture
//!
//! Everything runs on one cooperative loop: the winit event loop delivers
//! input and redraw events, the redraw handler steps the growth field,
//! rewrites instance transforms, and submits a single forward pass (terrain
//! mesh + instanced flowers). There are no worker threads and no locks.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod growth;
pub mod input;
pub mod model;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{FloretCommand, FloretEngine};
pub use error::FloretError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
