//! Screen-space ray construction and triangle-mesh intersection.
//!
//! Clicks are converted to world-space rays by unprojecting through the
//! inverse view-projection matrix, then cast against the merged surface
//! with a front-face-only nearest-hit query.

use glam::{Mat4, Vec3, Vec4};

use crate::model::MeshData;

/// Intersection tolerance. Hits closer than this along the ray, and
/// determinants smaller than this, are rejected.
const EPSILON: f32 = 1e-7;

/// A world-space ray with unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray start point.
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

/// Nearest intersection between a [`Ray`] and a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit position.
    pub point: Vec3,
    /// Distance along the ray.
    pub distance: f32,
    /// Index of the hit triangle.
    pub triangle: usize,
}

impl Ray {
    /// Build a ray from screen coordinates through the scene.
    ///
    /// Converts to NDC (y flipped for screen coordinates), unprojects the
    /// near and far plane points through the inverse view-projection
    /// matrix (0..1 depth range), and aims from near toward far.
    #[must_use]
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
        view_proj: Mat4,
    ) -> Self {
        let ndc_x = (screen_x / screen_width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen_y / screen_height) * 2.0;

        let inv_view_proj = view_proj.inverse();

        let world_near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let world_far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        // Perspective divide
        let origin = world_near.truncate() / world_near.w;
        let far = world_far.truncate() / world_far.w;

        Self {
            origin,
            dir: (far - origin).normalize(),
        }
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Cast against every triangle of `mesh` and return the nearest
    /// front-face hit, if any. Back faces never register.
    #[must_use]
    pub fn cast(&self, mesh: &MeshData) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;

        for tri in 0..mesh.triangle_count() {
            let i0 = mesh.indices[tri * 3] as usize;
            let i1 = mesh.indices[tri * 3 + 1] as usize;
            let i2 = mesh.indices[tri * 3 + 2] as usize;
            let Some(t) = self.intersect_triangle(
                mesh.positions[i0],
                mesh.positions[i1],
                mesh.positions[i2],
            ) else {
                continue;
            };
            if nearest.is_none_or(|hit| t < hit.distance) {
                nearest = Some(RayHit {
                    point: self.at(t),
                    distance: t,
                    triangle: tri,
                });
            }
        }

        nearest
    }

    /// Moller-Trumbore intersection, front faces only.
    ///
    /// A positive determinant means the ray approaches the triangle from
    /// its CCW front side; back faces and edge-on triangles return `None`.
    fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;

        let pvec = self.dir.cross(edge2);
        let det = edge1.dot(pvec);
        if det < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = self.origin - a;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = self.dir.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;
        (t > EPSILON).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One CCW triangle in the z=`height` plane, facing +z.
    fn facing_triangle(height: f32) -> MeshData {
        MeshData {
            name: "tri".to_owned(),
            positions: vec![
                Vec3::new(-1.0, -1.0, height),
                Vec3::new(1.0, -1.0, height),
                Vec3::new(0.0, 1.0, height),
            ],
            normals: vec![Vec3::Z; 3],
            uvs: None,
            colors: None,
            indices: vec![0, 1, 2],
            base_color: [1.0, 1.0, 1.0],
        }
    }

    fn down_ray(x: f32, y: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, y, 5.0),
            dir: -Vec3::Z,
        }
    }

    #[test]
    fn hits_a_facing_triangle() {
        let mesh = facing_triangle(1.0);
        let hit = down_ray(0.0, 0.0).cast(&mesh).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert_eq!(hit.triangle, 0);
    }

    #[test]
    fn back_faces_are_culled() {
        let mesh = facing_triangle(1.0);
        let from_below = Ray {
            origin: Vec3::new(0.0, 0.0, -5.0),
            dir: Vec3::Z,
        };
        assert!(from_below.cast(&mesh).is_none());
    }

    #[test]
    fn misses_outside_the_triangle() {
        let mesh = facing_triangle(1.0);
        assert!(down_ray(5.0, 5.0).cast(&mesh).is_none());
    }

    #[test]
    fn ignores_triangles_behind_the_origin() {
        let mesh = facing_triangle(10.0);
        assert!(down_ray(0.0, 0.0).cast(&mesh).is_none());
    }

    #[test]
    fn nearest_of_two_stacked_triangles_wins() {
        let near = facing_triangle(2.0);
        let far = facing_triangle(1.0);
        let mut mesh = near;
        let base = mesh.positions.len() as u32;
        mesh.positions.extend(&far.positions);
        mesh.normals.extend(&far.normals);
        mesh.indices.extend(far.indices.iter().map(|i| i + base));

        let hit = down_ray(0.0, 0.0).cast(&mesh).unwrap();
        assert!((hit.point.z - 2.0).abs() < 1e-5);
        assert_eq!(hit.triangle, 0);
    }

    #[test]
    fn screen_center_ray_points_at_the_look_target() {
        let eye = Vec3::new(0.0, 2.0, 2.0);
        let view_proj = Mat4::perspective_rh(
            70.0_f32.to_radians(),
            16.0 / 9.0,
            0.001,
            1000.0,
        ) * Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);

        let ray = Ray::from_screen(960.0, 540.0, 1920.0, 1080.0, view_proj);
        let expected = (Vec3::ZERO - eye).normalize();
        assert!(ray.dir.dot(expected) > 0.999);
        // Origin sits on the near plane, next to the eye.
        assert!((ray.origin - eye).length() < 0.01);
    }

    #[test]
    fn screen_corners_diverge() {
        let view_proj = Mat4::perspective_rh(
            70.0_f32.to_radians(),
            1.0,
            0.001,
            1000.0,
        ) * Mat4::look_at_rh(Vec3::new(0.0, 2.0, 2.0), Vec3::ZERO, Vec3::Y);

        let top_left = Ray::from_screen(0.0, 0.0, 800.0, 800.0, view_proj);
        let bottom_right =
            Ray::from_screen(800.0, 800.0, 800.0, 800.0, view_proj);
        assert!(top_left.dir.dot(bottom_right.dir) < 0.9);
    }

    #[test]
    fn clicked_ray_lands_on_a_mound() {
        let mound = crate::model::procedural::terrain_mound();
        let eye = Vec3::new(0.0, 2.0, 2.0);
        let view_proj =
            Mat4::perspective_rh(70.0_f32.to_radians(), 1.0, 0.001, 1000.0)
                * Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);

        // The screen center looks straight at the origin, which the mound
        // covers from above.
        let ray = Ray::from_screen(400.0, 400.0, 800.0, 800.0, view_proj);
        let hit = ray.cast(&mound).unwrap();
        assert!(hit.point.y >= 0.0);
        let ground_radius =
            Vec3::new(hit.point.x, 0.0, hit.point.z).length();
        assert!(ground_radius < 2.0);
    }
}
