//! Device, surface, buffer, and shader plumbing.

/// Grow-on-write GPU buffers.
pub mod dynamic_buffer;
/// Device, queue, and surface ownership.
pub mod render_context;
/// WGSL composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth buffer texture for the forward pass.
pub mod texture;

pub use render_context::RenderContext;
