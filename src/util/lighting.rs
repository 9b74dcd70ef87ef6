use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::LightingOptions;

/// Scene lighting shared by the terrain and flower shaders.
///
/// Mirrors the WGSL `LightingUniform` struct byte for byte: two direction
/// vectors padded out to 16 bytes each, five scalars, three trailing
/// pads, 64 bytes total. Field order must stay in sync with
/// `modules/lighting.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Sun direction, surface toward light (normalized)
    pub sun_dir: [f32; 3],
    _pad1: f32,
    /// Fill light direction (normalized)
    pub fill_dir: [f32; 3],
    _pad2: f32,
    /// Sun diffuse intensity
    pub sun_intensity: f32,
    /// Fill diffuse intensity
    pub fill_intensity: f32,
    /// Flat ambient term
    pub ambient: f32,
    /// Blinn-Phong specular intensity (sun only)
    pub specular_intensity: f32,
    /// Blinn-Phong exponent
    pub shininess: f32,
    _pad3: f32,
    _pad4: f32,
    _pad5: f32,
}

impl From<&LightingOptions> for LightingUniform {
    fn from(options: &LightingOptions) -> Self {
        Self {
            sun_dir: normalize(options.sun_direction),
            _pad1: 0.0,
            fill_dir: normalize(options.fill_direction),
            _pad2: 0.0,
            sun_intensity: options.sun_intensity,
            fill_intensity: options.fill_intensity,
            ambient: options.ambient,
            specular_intensity: options.specular_intensity,
            shininess: options.shininess,
            _pad3: 0.0,
            _pad4: 0.0,
            _pad5: 0.0,
        }
    }
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from(&LightingOptions::default())
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    glam::Vec3::from_array(v).normalize_or_zero().to_array()
}

/// Lighting uniform plus the GPU resources that expose it to shaders.
///
/// The lights are fixed in world space, so the buffer is written once at
/// construction and never updated.
pub struct Lighting {
    /// CPU copy of the uniform contents.
    pub uniform: LightingUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for pipeline creation.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing the buffer to fragment shaders.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Build the uniform from `options` and upload it.
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from(options);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Lighting Bind Group"),
            });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_wgsl() {
        assert_eq!(size_of::<LightingUniform>(), 64);
    }

    #[test]
    fn directions_are_normalized() {
        let uniform = LightingUniform::default();
        let sun = glam::Vec3::from_array(uniform.sun_dir);
        let fill = glam::Vec3::from_array(uniform.fill_dir);
        assert!((sun.length() - 1.0).abs() < 1e-6);
        assert!((fill.length() - 1.0).abs() < 1e-6);
        assert!(sun.y > 0.0, "sun comes from above");
    }
}
