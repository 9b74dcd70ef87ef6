//! The vertex format shared by every pipeline in the crate.

use crate::model::MeshData;

/// Vertex format shared by the terrain and flower pipelines.
/// Must match the WGSL `VertexInput` struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in mesh space.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Linear RGB vertex color.
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    /// Vertex buffer layout for pipeline creation.
    #[must_use]
    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Flatten a mesh into GPU vertices, resolving per-vertex colors
    /// against the material base color.
    #[must_use]
    pub fn from_mesh(mesh: &MeshData) -> Vec<Self> {
        (0..mesh.positions.len())
            .map(|i| Self {
                position: mesh.positions[i].to_array(),
                normal: mesh.normals[i].to_array(),
                color: mesh.vertex_color(i).to_array(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn layout_stride_covers_all_attributes() {
        assert_eq!(Vertex::layout().array_stride, 36);
        assert_eq!(Vertex::layout().attributes.len(), 3);
    }

    #[test]
    fn from_mesh_resolves_colors() {
        let mut mesh = MeshData {
            name: "tri".to_owned(),
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            uvs: None,
            colors: None,
            indices: vec![0, 1, 2],
            base_color: [0.2, 0.4, 0.6],
        };

        let vertices = Vertex::from_mesh(&mesh);
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0].color, [0.2, 0.4, 0.6]);

        mesh.colors = Some(vec![Vec3::X, Vec3::Y, Vec3::Z]);
        let vertices = Vertex::from_mesh(&mesh);
        assert_eq!(vertices[1].color, [0.0, 1.0, 0.0]);
    }
}
