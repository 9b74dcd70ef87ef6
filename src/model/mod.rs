//! CPU-side triangle mesh data: glTF import, procedural fallbacks,
//! transform baking, and mesh merging.

pub mod gltf;
pub mod merge;
pub mod procedural;

use std::fmt;

use glam::{Mat3, Mat4, Vec2, Vec3};

pub use gltf::{load_model, ModelLibrary};
pub use merge::merge_meshes;

/// Errors raised while importing a model file.
#[derive(Debug)]
pub enum GltfError {
    /// The gltf crate failed to parse or resolve the file.
    Import(::gltf::Error),
    /// Generic I/O failure while reading the file.
    Io(std::io::Error),
    /// A primitive is missing its position attribute.
    MissingPositions(String),
    /// The document contains no triangle meshes at all.
    NoMeshes(String),
}

impl fmt::Display for GltfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import(e) => write!(f, "glTF import failed: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingPositions(name) => {
                write!(f, "primitive '{name}' has no position data")
            }
            Self::NoMeshes(path) => {
                write!(f, "no triangle meshes in '{path}'")
            }
        }
    }
}

impl std::error::Error for GltfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Import(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<::gltf::Error> for GltfError {
    fn from(e: ::gltf::Error) -> Self {
        Self::Import(e)
    }
}

impl From<std::io::Error> for GltfError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// An indexed triangle mesh with per-vertex attributes.
///
/// Positions and normals are in the space the mesh was produced in; loaders
/// bake node transforms so loaded meshes arrive in model world space.
/// `colors`, when present, override `base_color` per vertex.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Mesh name from the source document (or a generated one).
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals, same length as `positions`.
    pub normals: Vec<Vec3>,
    /// Texture coordinates, used as a scatter weight attribute when present.
    pub uvs: Option<Vec<Vec2>>,
    /// Per-vertex colors overriding `base_color`.
    pub colors: Option<Vec<Vec3>>,
    /// Triangle list indices into the vertex arrays.
    pub indices: Vec<u32>,
    /// Uniform material base color (linear RGB).
    pub base_color: [f32; 3],
}

impl MeshData {
    /// Number of triangles in the index list.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The color of vertex `i`: the per-vertex override when present,
    /// otherwise the material base color.
    #[must_use]
    pub fn vertex_color(&self, i: usize) -> Vec3 {
        self.colors.as_ref().map_or_else(
            || Vec3::from_array(self.base_color),
            |colors| colors[i],
        )
    }

    /// Bake a transform into the vertex data.
    ///
    /// Positions go through the full matrix; normals through the
    /// inverse-transpose of its linear part and are renormalized, so
    /// non-uniform scale stays correct.
    pub fn bake_transform(&mut self, transform: &Mat4) {
        for p in &mut self.positions {
            *p = transform.transform_point3(*p);
        }
        let normal_matrix =
            Mat3::from_mat4(*transform).inverse().transpose();
        for n in &mut self.normals {
            *n = (normal_matrix * *n).normalize_or_zero();
        }
    }

    /// Recompute smooth per-vertex normals by area-weighted accumulation of
    /// face normals. Replaces whatever normals the mesh carried.
    pub fn compute_vertex_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) =
                (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            // Cross product length is proportional to triangle area, which
            // gives the area weighting for free.
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            accumulated[a] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }
        self.normals = accumulated
            .into_iter()
            .map(Vec3::normalize_or_zero)
            .collect();
    }

    /// Axis-aligned bounding box as (min, max). Zero boxes for empty meshes.
    #[must_use]
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }
        if self.positions.is_empty() {
            (Vec3::ZERO, Vec3::ZERO)
        } else {
            (min, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData {
            name: "quad".to_owned(),
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 4],
            uvs: None,
            colors: None,
            indices: vec![0, 1, 2, 0, 2, 3],
            base_color: [0.5, 0.5, 0.5],
        }
    }

    #[test]
    fn computed_normals_are_unit_and_face_aligned() {
        let mut mesh = quad();
        mesh.normals = vec![Vec3::ZERO; 4];
        mesh.compute_vertex_normals();
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(Vec3::Z) > 0.99, "normal should face +Z: {n}");
        }
    }

    #[test]
    fn bake_transform_moves_positions_and_keeps_normals_unit() {
        let mut mesh = quad();
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 1.0),
            glam::Quat::IDENTITY,
            Vec3::new(5.0, 0.0, 0.0),
        );
        mesh.bake_transform(&transform);
        assert_eq!(mesh.positions[1], Vec3::new(7.0, 0.0, 0.0));
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
        // Normals still face +Z under a scale with no rotation.
        assert!(mesh.normals[0].dot(Vec3::Z) > 0.99);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = quad();
        let (min, max) = mesh.bounds();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn vertex_color_prefers_override() {
        let mut mesh = quad();
        assert_eq!(mesh.vertex_color(0), Vec3::splat(0.5));
        mesh.colors = Some(vec![Vec3::X; 4]);
        assert_eq!(mesh.vertex_color(0), Vec3::X);
    }
}
