//! Scene assembly: the merged growth surface, the flower template, and
//! the scatter that places one surface point per instance.
//!
//! The same merged mesh serves rendering, surface sampling, and click
//! ray casting, so what the user sees is exactly what they pick against.

mod raycast;
mod sampler;

use std::path::Path;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use raycast::{Ray, RayHit};
pub use sampler::{SurfacePoint, SurfaceSampler};

use crate::error::FloretError;
use crate::model::{self, load_model, merge_meshes, MeshData, ModelLibrary};
use crate::options::Options;

// ---------------------------------------------------------------------------
// SceneData
// ---------------------------------------------------------------------------

/// Everything the engine needs about the world: the merged terrain
/// surface, the prepared flower template, and the scattered instance
/// anchor points.
pub struct SceneData {
    /// Merged terrain mesh. Rendered, sampled, and ray cast.
    terrain: MeshData,
    /// Flower template, pre-scaled with its growth axis along +Z.
    flower: MeshData,
    /// One anchor per instance: surface position and outward normal.
    points: Vec<SurfacePoint>,
}

impl SceneData {
    /// Build the scene from glTF files.
    ///
    /// All terrain meshes are merged into one surface. The flower file is
    /// optional; without one the built-in sprig is used. Loaded flower
    /// meshes are reoriented from Y-up to Z-up and pre-scaled by
    /// `display.flower_scale`.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError::ModelLoad`] when a file cannot be imported
    /// and [`FloretError::SceneBuild`] when the terrain cannot be sampled.
    pub fn from_files(
        terrain_path: &Path,
        flower_path: Option<&Path>,
        options: &Options,
    ) -> Result<Self, FloretError> {
        let terrain = load_model(terrain_path)?;

        let flower = if let Some(path) = flower_path {
            let library = load_model(path)?;
            let template =
                select_flower_mesh(&library, &options.display.flower_mesh)
                    .clone();
            prepare_flower_template(template, options.display.flower_scale)
        } else {
            model::procedural::flower_sprig()
        };

        Self::assemble(terrain.meshes(), flower, options)
    }

    /// Build the self-contained procedural scene: a mossy mound with the
    /// built-in flower sprig. Needs no assets on disk.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError::SceneBuild`] when the scatter fails, which
    /// for the built-in mound means a bug rather than bad input.
    pub fn procedural(options: &Options) -> Result<Self, FloretError> {
        let mound = model::procedural::terrain_mound();
        let sprig = model::procedural::flower_sprig();
        Self::assemble(std::slice::from_ref(&mound), sprig, options)
    }

    /// Merge the terrain, build the weighted sampler, and scatter the
    /// instance anchors.
    fn assemble(
        terrain_meshes: &[MeshData],
        flower: MeshData,
        options: &Options,
    ) -> Result<Self, FloretError> {
        let terrain = merge_meshes(terrain_meshes);

        let sampler = SurfaceSampler::build(&terrain)?;
        let mut rng = StdRng::seed_from_u64(options.growth.scatter_seed);
        let count = options.growth.population as usize;
        let points: Vec<SurfacePoint> =
            (0..count).map(|_| sampler.sample(&mut rng)).collect();

        log::info!(
            "scene: {} terrain triangles, {} flower triangles, {} instances",
            terrain.triangle_count(),
            flower.triangle_count(),
            points.len()
        );

        Ok(Self {
            terrain,
            flower,
            points,
        })
    }

    /// The merged terrain surface.
    #[must_use]
    pub fn terrain(&self) -> &MeshData {
        &self.terrain
    }

    /// The prepared flower template.
    #[must_use]
    pub fn flower(&self) -> &MeshData {
        &self.flower
    }

    /// Scattered instance anchors, one per instance.
    #[must_use]
    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    /// Number of instances in the scene.
    #[must_use]
    pub fn population(&self) -> usize {
        self.points.len()
    }

    /// Cast a ray against the terrain surface.
    #[must_use]
    pub fn cast_ray(&self, ray: &Ray) -> Option<RayHit> {
        ray.cast(&self.terrain)
    }
}

// ---------------------------------------------------------------------------
// Flower template preparation
// ---------------------------------------------------------------------------

/// Pick the flower mesh by name, falling back to the library's first mesh
/// when the name is empty or unknown.
fn select_flower_mesh<'a>(
    library: &'a ModelLibrary,
    name: &str,
) -> &'a MeshData {
    if !name.is_empty() {
        if let Some(mesh) = library.mesh_named(name) {
            return mesh;
        }
        log::warn!(
            "flower mesh '{name}' not found, using '{}'",
            library.primary().name
        );
    }
    library.primary()
}

/// Reorient a loaded flower from Y-up to Z-up and bake in the uniform
/// pre-scale. The growth axis must end up along +Z because instances are
/// oriented by rotating +Z onto the surface normal.
fn prepare_flower_template(mut mesh: MeshData, scale: f32) -> MeshData {
    let transform = Mat4::from_scale(Vec3::splat(scale))
        * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2);
    mesh.bake_transform(&transform);
    mesh
}
