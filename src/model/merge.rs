//! Mesh merging: concatenate world-space meshes into one surface.

use glam::Vec2;

use super::MeshData;

/// Merge world-space meshes into a single mesh.
///
/// Indices are offset as vertex arrays are appended. Material base colors
/// are baked into per-vertex colors so the merged mesh renders identically
/// to drawing the parts one by one. When only some meshes carry a UV weight
/// attribute, the rest are padded with 1.0 so they scatter by plain area.
#[must_use]
pub fn merge_meshes(meshes: &[MeshData]) -> MeshData {
    let vertex_total: usize =
        meshes.iter().map(|m| m.positions.len()).sum();
    let index_total: usize = meshes.iter().map(|m| m.indices.len()).sum();
    let any_uvs = meshes.iter().any(|m| m.uvs.is_some());

    let mut positions = Vec::with_capacity(vertex_total);
    let mut normals = Vec::with_capacity(vertex_total);
    let mut colors = Vec::with_capacity(vertex_total);
    let mut uvs = if any_uvs {
        Some(Vec::with_capacity(vertex_total))
    } else {
        None
    };
    let mut indices = Vec::with_capacity(index_total);

    for mesh in meshes {
        let vertex_offset = positions.len() as u32;

        positions.extend_from_slice(&mesh.positions);
        normals.extend_from_slice(&mesh.normals);
        for i in 0..mesh.positions.len() {
            colors.push(mesh.vertex_color(i));
        }
        if let Some(ref mut all_uvs) = uvs {
            if let Some(mesh_uvs) = &mesh.uvs {
                all_uvs.extend_from_slice(mesh_uvs);
            } else {
                all_uvs.extend(std::iter::repeat_n(
                    Vec2::ONE,
                    mesh.positions.len(),
                ));
            }
        }
        for &idx in &mesh.indices {
            indices.push(idx + vertex_offset);
        }
    }

    MeshData {
        name: "merged".to_owned(),
        positions,
        normals,
        uvs,
        colors: Some(colors),
        indices,
        base_color: [1.0, 1.0, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn tri(origin: Vec3, color: [f32; 3]) -> MeshData {
        MeshData {
            name: "tri".to_owned(),
            positions: vec![origin, origin + Vec3::X, origin + Vec3::Y],
            normals: vec![Vec3::Z; 3],
            uvs: None,
            colors: None,
            indices: vec![0, 1, 2],
            base_color: color,
        }
    }

    #[test]
    fn merge_offsets_indices_and_sums_counts() {
        let a = tri(Vec3::ZERO, [1.0, 0.0, 0.0]);
        let b = tri(Vec3::new(5.0, 0.0, 0.0), [0.0, 1.0, 0.0]);
        let merged = merge_meshes(&[a, b]);

        assert_eq!(merged.positions.len(), 6);
        assert_eq!(merged.triangle_count(), 2);
        assert_eq!(&merged.indices[3..], &[3, 4, 5]);
        // Every index stays in bounds.
        assert!(merged
            .indices
            .iter()
            .all(|&i| (i as usize) < merged.positions.len()));
    }

    #[test]
    fn merge_bakes_base_colors_per_vertex() {
        let a = tri(Vec3::ZERO, [1.0, 0.0, 0.0]);
        let mut b = tri(Vec3::ZERO, [0.0, 1.0, 0.0]);
        b.colors = Some(vec![Vec3::Z; 3]);
        let merged = merge_meshes(&[a, b]);

        let colors = merged.colors.as_ref().unwrap();
        assert_eq!(colors[0], Vec3::X, "base color baked");
        assert_eq!(colors[3], Vec3::Z, "per-vertex override kept");
    }

    #[test]
    fn merge_pads_missing_uvs_with_full_weight() {
        let mut a = tri(Vec3::ZERO, [1.0, 1.0, 1.0]);
        a.uvs = Some(vec![Vec2::new(0.25, 0.0); 3]);
        let b = tri(Vec3::ZERO, [1.0, 1.0, 1.0]);
        let merged = merge_meshes(&[a, b]);

        let uvs = merged.uvs.as_ref().unwrap();
        assert_eq!(uvs.len(), 6);
        assert_eq!(uvs[0], Vec2::new(0.25, 0.0));
        assert_eq!(uvs[3], Vec2::ONE);
    }

    #[test]
    fn merge_without_uvs_stays_uvless() {
        let merged = merge_meshes(&[
            tri(Vec3::ZERO, [1.0, 1.0, 1.0]),
            tri(Vec3::X, [1.0, 1.0, 1.0]),
        ]);
        assert!(merged.uvs.is_none());
    }
}
