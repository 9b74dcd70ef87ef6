//! Draws the merged terrain mesh.
//!
//! The terrain is static: vertices and indices are uploaded once at
//! construction and only the camera moves it on screen.

use wgpu::util::DeviceExt;

use super::pipeline_util;
use super::vertex::Vertex;
use crate::error::FloretError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::model::MeshData;

/// Renderer for the static terrain surface.
pub struct TerrainRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl TerrainRenderer {
    /// Upload the terrain mesh and build its pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError::Shader`] if the terrain shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        mesh: &MeshData,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, FloretError> {
        let vertices = Vertex::from_mesh(mesh);

        let vertex_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Terrain Vertex Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });

        let index_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Terrain Index Buffer"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });

        let pipeline = pipeline_util::create_surface_pipeline(
            context,
            "Terrain Pipeline",
            include_str!("../../assets/shaders/terrain.wgsl"),
            "terrain.wgsl",
            Some(wgpu::Face::Back),
            &[camera_layout, lighting_layout],
            &[Vertex::layout()],
            shader_composer,
        )?;

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        })
    }

    /// Record the terrain draw. Caller opens the render pass.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera: &'a wgpu::BindGroup,
        lighting: &'a wgpu::BindGroup,
    ) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera, &[]);
        render_pass.set_bind_group(1, lighting, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass
            .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
