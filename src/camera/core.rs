use glam::{Mat4, Vec3};

/// Perspective camera: a look-at pose plus projection parameters.
pub struct Camera {
    /// World-space eye position.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Width over height of the viewport.
    pub aspect: f32,
    /// Vertical field of view, degrees.
    pub fovy: f32,
    /// Near clip distance.
    pub znear: f32,
    /// Far clip distance.
    pub zfar: f32,
}

/// GPU uniform buffer holding the view-projection matrix and camera
/// position.
///
/// Layout mirrors `CameraUniform` in `assets/shaders/modules/camera.wgsl`:
/// a `mat4x4<f32>` followed by a `vec3<f32>` padded out to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Projection times view.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position, for specular shading.
    pub position: [f32; 3],
    _pad: f32,
}

impl Camera {
    /// Projection times view for the current pose.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Uniform with an identity matrix and the eye at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Refresh both fields from `camera`.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
    }
}
