//! Draws every flower in one instanced call.
//!
//! The template mesh is uploaded once; per-instance model matrices stream
//! into a growable vertex buffer each simulation step. Culling is off so
//! thin petals read from both sides.

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::pipeline_util;
use super::vertex::Vertex;
use crate::error::FloretError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::model::MeshData;

/// Per-instance data for one flower.
/// Must match the WGSL `InstanceInput` struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlowerInstance {
    /// Column-major model matrix (locations 3..=6).
    pub model: [[f32; 4]; 4],
}

impl FlowerInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4
    ];

    /// Instance buffer layout for pipeline creation.
    #[must_use]
    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Convert world transforms into instance records.
fn instance_data(transforms: &[Mat4]) -> Vec<FlowerInstance> {
    transforms
        .iter()
        .map(|m| FlowerInstance {
            model: m.to_cols_array_2d(),
        })
        .collect()
}

/// Instanced renderer for the flower population.
pub struct FlowerRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instances: TypedBuffer<FlowerInstance>,
}

impl FlowerRenderer {
    /// Upload the flower template and build the instanced pipeline.
    ///
    /// `population` sizes the instance buffer up front so steady-state
    /// frames never reallocate.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError::Shader`] if the flower shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        template: &MeshData,
        population: usize,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, FloretError> {
        let vertices = Vertex::from_mesh(template);

        let vertex_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Flower Vertex Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });

        let index_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Flower Index Buffer"),
                    contents: bytemuck::cast_slice(&template.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });

        let instances = TypedBuffer::with_capacity(
            &context.device,
            "Flower Instance Buffer",
            population.max(1),
            wgpu::BufferUsages::VERTEX,
        );

        let pipeline = pipeline_util::create_surface_pipeline(
            context,
            "Flower Pipeline",
            include_str!("../../assets/shaders/flowers.wgsl"),
            "flowers.wgsl",
            None,
            &[camera_layout, lighting_layout],
            &[Vertex::layout(), FlowerInstance::layout()],
            shader_composer,
        )?;

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: template.indices.len() as u32,
            instances,
        })
    }

    /// Upload this frame's instance transforms.
    pub fn write_instances(&mut self, context: &RenderContext, transforms: &[Mat4]) {
        let data = instance_data(transforms);
        let _ = self
            .instances
            .write(&context.device, &context.queue, &data);
    }

    /// Record the instanced flower draw. Caller opens the render pass.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera: &'a wgpu::BindGroup,
        lighting: &'a wgpu::BindGroup,
    ) {
        if self.index_count == 0 || self.instances.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera, &[]);
        render_pass.set_bind_group(1, lighting, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        render_pass
            .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(
            0..self.index_count,
            0,
            0..self.instances.count() as u32,
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;

    #[test]
    fn instance_layout_is_one_mat4() {
        assert_eq!(FlowerInstance::layout().array_stride, 64);
        assert_eq!(FlowerInstance::layout().attributes.len(), 4);
    }

    #[test]
    fn translation_lands_in_the_last_column() {
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::splat(0.5),
            Quat::IDENTITY,
            Vec3::new(1.0, 2.0, 3.0),
        );
        let data = instance_data(&[transform]);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].model[3][0], 1.0);
        assert_eq!(data[0].model[3][1], 2.0);
        assert_eq!(data[0].model[3][2], 3.0);
        assert_eq!(data[0].model[0][0], 0.5);
    }
}
