use glam::{Quat, Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::RenderContext;
use crate::options::CameraOptions;

/// Default eye position: slightly above and behind the scene origin.
const INITIAL_EYE: Vec3 = Vec3::new(0.0, 2.0, 2.0);

/// Zoom distance limits for a scene a few units across.
const MIN_DISTANCE: f32 = 0.2;
const MAX_DISTANCE: f32 = 50.0;

/// Orbital state and the drag/zoom math, independent of any GPU
/// resources.
struct Orbit {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl Orbit {
    fn new(options: &CameraOptions) -> Self {
        Self {
            orientation: Quat::from_rotation_arc(
                Vec3::Z,
                INITIAL_EYE.normalize(),
            ),
            distance: INITIAL_EYE.length(),
            focus_point: Vec3::ZERO,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
        }
    }

    fn eye(&self) -> Vec3 {
        self.focus_point + self.orientation * Vec3::Z * self.distance
    }

    fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    fn rotate(&mut self, delta: Vec2) {
        // Horizontal rotation around the camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal =
            Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around the camera's right vector
        let right = self.orientation * Vec3::X;
        let vertical =
            Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = vertical * self.orientation;
    }

    fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;

        let translation = right * (-delta.x * self.pan_speed)
            + up * (delta.y * self.pan_speed);

        self.focus_point += translation;
    }

    fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn fit_to_positions(&mut self, positions: &[Vec3], fovy_deg: f32) {
        if positions.is_empty() {
            return;
        }

        let centroid: Vec3 = positions.iter().copied().sum::<Vec3>()
            / positions.len() as f32;

        // Bounding sphere radius from the centroid
        let radius = positions
            .iter()
            .map(|p| (*p - centroid).length())
            .fold(0.0f32, f32::max);

        self.focus_point = centroid;

        // Distance that fits the bounding sphere, with padding
        let fovy_rad = fovy_deg.to_radians();
        let fit_distance = radius / (fovy_rad / 2.0).tan();
        self.distance = (fit_distance * 1.5).max(MIN_DISTANCE);
    }
}

/// Orbital camera: a quaternion orientation and a distance around a focus
/// point, plus the GPU uniform resources for the camera bind group.
pub struct CameraController {
    orbit: Orbit,

    /// Current camera state derived from the orbit.
    pub camera: Camera,
    /// CPU copy of the camera uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for group 0 in every pipeline.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group wrapping the uniform buffer.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Controller looking at the origin from the default eye position,
    /// with projection and speeds taken from `options`.
    #[must_use]
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let orbit = Orbit::new(options);

        let camera = Camera {
            eye: orbit.eye(),
            target: orbit.focus_point,
            up: orbit.up(),
            aspect: context.aspect(),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            orbit,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    fn sync_camera(&mut self) {
        self.camera.eye = self.orbit.eye();
        self.camera.target = self.orbit.focus_point;
        self.camera.up = self.orbit.up();
    }

    /// Upload the current camera state to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Recompute the aspect ratio after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height.max(1) as f32;
    }

    /// Orbit by a mouse drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.orbit.rotate(delta);
        self.sync_camera();
    }

    /// Slide the focus point by a mouse drag delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.orbit.pan(delta);
        self.sync_camera();
    }

    /// Zoom multiplicatively (positive `delta` moves closer).
    pub fn zoom(&mut self, delta: f32) {
        self.orbit.zoom(delta);
        self.sync_camera();
    }

    /// Adjust the orbit to fit the given positions, centering on their
    /// centroid and setting distance so all points are visible.
    pub fn fit_to_positions(&mut self, positions: &[Vec3]) {
        self.orbit.fit_to_positions(positions, self.camera.fovy);
        self.sync_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit() -> Orbit {
        Orbit::new(&CameraOptions::default())
    }

    #[test]
    fn initial_orbit_matches_default_eye() {
        let orbit = orbit();
        assert!((orbit.eye() - INITIAL_EYE).length() < 1e-5);
        assert_eq!(orbit.focus_point, Vec3::ZERO);
    }

    #[test]
    fn rotation_preserves_distance_to_focus() {
        let mut orbit = orbit();
        let initial = orbit.distance;
        for delta in
            [Vec2::new(40.0, 0.0), Vec2::new(-15.0, 80.0), Vec2::splat(7.0)]
        {
            orbit.rotate(delta);
            let measured = (orbit.eye() - orbit.focus_point).length();
            assert!((measured - initial).abs() < 1e-4);
        }
    }

    #[test]
    fn pan_moves_focus_perpendicular_to_view() {
        let mut orbit = orbit();
        let forward = (orbit.focus_point - orbit.eye()).normalize();
        let before = orbit.focus_point;

        orbit.pan(Vec2::new(120.0, -45.0));

        let moved = orbit.focus_point - before;
        assert!(moved.length() > 0.0);
        assert!(moved.normalize().dot(forward).abs() < 1e-4);
        // The eye follows the focus, keeping the same distance.
        let measured = (orbit.eye() - orbit.focus_point).length();
        assert!((measured - orbit.distance).abs() < 1e-4);
    }

    #[test]
    fn zoom_clamps_at_both_limits() {
        let mut orbit = orbit();
        for _ in 0..100 {
            orbit.zoom(10.0);
        }
        assert_eq!(orbit.distance, MIN_DISTANCE);

        for _ in 0..100 {
            orbit.zoom(-10.0);
        }
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }

    #[test]
    fn zoom_direction_moves_closer_then_farther() {
        let mut orbit = orbit();
        let start = orbit.distance;
        orbit.zoom(1.0);
        assert!(orbit.distance < start);
        let closer = orbit.distance;
        orbit.zoom(-1.0);
        assert!(orbit.distance > closer);
    }

    #[test]
    fn fit_centers_on_centroid_and_covers_the_sphere() {
        let mut orbit = orbit();
        let positions = vec![
            Vec3::new(1.0, 0.0, 3.0),
            Vec3::new(3.0, 0.0, 3.0),
            Vec3::new(1.0, 2.0, 5.0),
            Vec3::new(3.0, 2.0, 5.0),
        ];
        let centroid = Vec3::new(2.0, 1.0, 4.0);
        let radius = positions
            .iter()
            .map(|p| (*p - centroid).length())
            .fold(0.0f32, f32::max);

        orbit.fit_to_positions(&positions, 70.0);

        assert!((orbit.focus_point - centroid).length() < 1e-5);
        let min_fit = radius / (70.0f32.to_radians() / 2.0).tan();
        assert!(orbit.distance >= min_fit);
    }

    #[test]
    fn fit_with_no_positions_is_a_no_op() {
        let mut orbit = orbit();
        let eye = orbit.eye();
        orbit.fit_to_positions(&[], 70.0);
        assert_eq!(orbit.eye(), eye);
    }
}
