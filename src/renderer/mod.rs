//! Rendering subsystems for the planted scene.
//!
//! A single forward pass draws the terrain mesh first and the instanced
//! flowers on top, sharing one vertex format, depth buffer, and the
//! camera/lighting bind groups.

pub mod flowers;
pub(crate) mod pipeline_util;
pub mod terrain;
pub mod vertex;

pub use flowers::{FlowerInstance, FlowerRenderer};
pub use terrain::TerrainRenderer;
pub use vertex::Vertex;
