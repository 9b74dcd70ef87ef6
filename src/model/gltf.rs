//! glTF/GLB model import.
//!
//! Flattens the node hierarchy into a list of [`MeshData`] with node
//! transforms baked in, so downstream code only ever sees world-space
//! triangle meshes.

use std::path::Path;

use glam::{Mat4, Vec2, Vec3};
use rustc_hash::FxHashMap;

use super::{GltfError, MeshData};

/// All meshes from one model document, with name lookup.
pub struct ModelLibrary {
    meshes: Vec<MeshData>,
    by_name: FxHashMap<String, usize>,
}

impl ModelLibrary {
    /// Assemble a library from already-built meshes (the loader's output,
    /// or procedural geometry in tests and embedding code).
    #[must_use]
    pub fn from_meshes(meshes: Vec<MeshData>) -> Self {
        let mut by_name = FxHashMap::default();
        for (i, mesh) in meshes.iter().enumerate() {
            // First mesh wins when primitives share a mesh name.
            let _ = by_name.entry(mesh.name.clone()).or_insert(i);
        }
        Self { meshes, by_name }
    }

    /// All meshes in document order.
    #[must_use]
    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    /// Look up a mesh by its document name.
    #[must_use]
    pub fn mesh_named(&self, name: &str) -> Option<&MeshData> {
        self.by_name.get(name).map(|&i| &self.meshes[i])
    }

    /// The first mesh in document order.
    #[must_use]
    pub fn primary(&self) -> &MeshData {
        &self.meshes[0]
    }

    /// Number of meshes in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the library holds no meshes. Loaded libraries never are;
    /// this exists for hand-assembled ones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Load a glTF/GLB file into a [`ModelLibrary`].
///
/// Node transforms (including the full parent chain) are baked into vertex
/// data. Primitives without normals get smooth computed ones; missing
/// indices become a sequential triangle list.
///
/// # Errors
///
/// Returns [`GltfError`] if the file cannot be read or parsed, a primitive
/// has no positions, or the document contains no meshes.
pub fn load_model(path: &Path) -> Result<ModelLibrary, GltfError> {
    let (document, buffers, _images) = ::gltf::import(path)?;

    let mut meshes = Vec::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            collect_node(&node, &buffers, Mat4::IDENTITY, &mut meshes)?;
        }
    }

    if meshes.is_empty() {
        return Err(GltfError::NoMeshes(path.display().to_string()));
    }

    let triangles: usize = meshes.iter().map(MeshData::triangle_count).sum();
    log::info!(
        "loaded {}: {} meshes, {triangles} triangles",
        path.display(),
        meshes.len(),
    );

    Ok(ModelLibrary::from_meshes(meshes))
}

/// Recursively collect a node's primitives with the accumulated world
/// transform baked in.
fn collect_node(
    node: &::gltf::Node,
    buffers: &[::gltf::buffer::Data],
    parent: Mat4,
    out: &mut Vec<MeshData>,
) -> Result<(), GltfError> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;

    if let Some(mesh) = node.mesh() {
        let name = mesh.name().unwrap_or("unnamed").to_owned();
        for primitive in mesh.primitives() {
            let mut data = extract_primitive(&name, &primitive, buffers)?;
            data.bake_transform(&world);
            out.push(data);
        }
    }

    for child in node.children() {
        collect_node(&child, buffers, world, out)?;
    }

    Ok(())
}

/// Extract one primitive's vertex attributes and indices.
fn extract_primitive(
    name: &str,
    primitive: &::gltf::Primitive,
    buffers: &[::gltf::buffer::Data],
) -> Result<MeshData, GltfError> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .ok_or_else(|| GltfError::MissingPositions(name.to_owned()))?
        .map(Vec3::from_array)
        .collect();

    let indices: Vec<u32> = reader.read_indices().map_or_else(
        || (0..positions.len() as u32).collect(),
        |iter| iter.into_u32().collect(),
    );

    let uvs: Option<Vec<Vec2>> = reader
        .read_tex_coords(0)
        .map(|tc| tc.into_f32().map(Vec2::from_array).collect());

    let colors: Option<Vec<Vec3>> = reader
        .read_colors(0)
        .map(|c| c.into_rgb_f32().map(Vec3::from_array).collect());

    let base = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();

    let mut data = MeshData {
        name: name.to_owned(),
        positions,
        normals: Vec::new(),
        uvs,
        colors,
        indices,
        base_color: [base[0], base[1], base[2]],
    };

    if let Some(iter) = reader.read_normals() {
        data.normals = iter.map(Vec3::from_array).collect();
    } else {
        data.compute_vertex_normals();
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_mesh(name: &str) -> MeshData {
        MeshData {
            name: name.to_owned(),
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            uvs: None,
            colors: None,
            indices: vec![0, 1, 2],
            base_color: [1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn library_name_lookup_first_wins() {
        let library = ModelLibrary::from_meshes(vec![
            named_mesh("petal"),
            named_mesh("stem"),
            named_mesh("petal"),
        ]);
        assert_eq!(library.len(), 3);
        assert_eq!(library.primary().name, "petal");
        assert!(library.mesh_named("stem").is_some());
        assert!(library.mesh_named("root").is_none());
        // Duplicate names resolve to the first occurrence.
        let petal = library.mesh_named("petal").unwrap();
        assert!(std::ptr::eq(petal, library.primary()));
    }
}
