//! Weighted surface sampling over a triangle mesh.
//!
//! Builds a cumulative distribution over triangles (area times summed
//! vertex weight, where a vertex's weight is the first UV component) and
//! draws uniformly distributed points from it. Meshes without UVs fall
//! back to pure area weighting.

use glam::Vec3;
use rand::Rng;

use crate::error::FloretError;
use crate::model::MeshData;

/// A sampled point on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// World-space position on the triangle.
    pub position: Vec3,
    /// Unit face normal of the sampled triangle.
    pub normal: Vec3,
}

/// Draws weighted-random points from a mesh surface.
///
/// Borrows the mesh for its whole lifetime; build once, sample many.
pub struct SurfaceSampler<'a> {
    mesh: &'a MeshData,
    /// Cumulative triangle weights. Last entry is the total.
    cdf: Vec<f32>,
}

impl<'a> SurfaceSampler<'a> {
    /// Build the triangle distribution for `mesh`.
    ///
    /// Triangle weight is area times the sum of the three corner weights
    /// (first UV component). If every weighted triangle vanishes the
    /// distribution falls back to pure area.
    ///
    /// # Errors
    ///
    /// Returns [`FloretError::SceneBuild`] when the mesh has no triangles
    /// or every triangle has zero area.
    pub fn build(mesh: &'a MeshData) -> Result<Self, FloretError> {
        if mesh.triangle_count() == 0 {
            return Err(FloretError::SceneBuild(
                "surface has no triangles to sample".to_owned(),
            ));
        }

        let areas: Vec<f32> = (0..mesh.triangle_count())
            .map(|tri| {
                let (a, b, c) = triangle_corners(mesh, tri);
                (b - a).cross(c - a).length() * 0.5
            })
            .collect();

        let mut cdf = cumulative(mesh, &areas, true);
        if total(&cdf) <= 0.0 {
            // All vertex weights were zero; distribute by area alone.
            cdf = cumulative(mesh, &areas, false);
        }
        if total(&cdf) <= 0.0 {
            return Err(FloretError::SceneBuild(
                "surface is degenerate: every triangle has zero area"
                    .to_owned(),
            ));
        }

        Ok(Self { mesh, cdf })
    }

    /// Draw one uniformly distributed point from the weighted surface.
    pub fn sample(&self, rng: &mut impl Rng) -> SurfacePoint {
        let tri = self.sample_triangle_index(rng);
        let (a, b, c) = triangle_corners(self.mesh, tri);

        // Fold the unit square across its diagonal for uniform barycentrics.
        let mut u = rng.random::<f32>();
        let mut v = rng.random::<f32>();
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }

        let position = a * u + b * v + c * (1.0 - u - v);
        let normal = (c - b).cross(a - b).normalize_or_zero();
        SurfacePoint { position, normal }
    }

    /// Pick a triangle index by binary search over the cumulative weights.
    fn sample_triangle_index(&self, rng: &mut impl Rng) -> usize {
        let x = rng.random::<f32>() * total(&self.cdf);
        self.cdf
            .partition_point(|&cum| cum < x)
            .min(self.cdf.len() - 1)
    }

    /// Number of triangles in the distribution.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.cdf.len()
    }
}

/// Total weight of a cumulative distribution.
fn total(cdf: &[f32]) -> f32 {
    cdf.last().copied().unwrap_or(0.0)
}

/// Cumulative per-triangle weights: area, optionally scaled by the summed
/// corner weights. Negative vertex weights clamp to zero so they cannot
/// corrupt the distribution.
fn cumulative(mesh: &MeshData, areas: &[f32], weighted: bool) -> Vec<f32> {
    let mut running = 0.0;
    areas
        .iter()
        .enumerate()
        .map(|(tri, &area)| {
            let w = if weighted {
                corner_weight_sum(mesh, tri)
            } else {
                1.0
            };
            running += area * w.max(0.0);
            running
        })
        .collect()
}

/// Sum of the first UV component over a triangle's corners, or 1.0 per
/// corner when the mesh carries no UVs.
fn corner_weight_sum(mesh: &MeshData, tri: usize) -> f32 {
    let Some(uvs) = &mesh.uvs else {
        return 3.0;
    };
    (0..3)
        .map(|corner| {
            let vi = mesh.indices[tri * 3 + corner] as usize;
            uvs[vi].x
        })
        .sum()
}

/// Corner positions of triangle `tri`.
fn triangle_corners(mesh: &MeshData, tri: usize) -> (Vec3, Vec3, Vec3) {
    let i0 = mesh.indices[tri * 3] as usize;
    let i1 = mesh.indices[tri * 3 + 1] as usize;
    let i2 = mesh.indices[tri * 3 + 2] as usize;
    (mesh.positions[i0], mesh.positions[i1], mesh.positions[i2])
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// A quad on [0,1]x[0,1] plus a disjoint triangle on [1,2]x[0,1], all
    /// in the z=0 plane, with per-vertex weights carried in uv.x. The two
    /// regions share no vertices so their weights stay independent.
    fn weighted_quad(left_weight: f32, right_weight: f32) -> MeshData {
        let mut mesh = MeshData {
            name: "quad".to_owned(),
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 1.0, 0.0),
            ],
            normals: Vec::new(),
            uvs: Some(vec![
                Vec2::new(left_weight, 0.0),
                Vec2::new(left_weight, 0.0),
                Vec2::new(left_weight, 0.0),
                Vec2::new(left_weight, 0.0),
                Vec2::new(right_weight, 0.0),
                Vec2::new(right_weight, 0.0),
                Vec2::new(right_weight, 0.0),
            ]),
            colors: None,
            indices: vec![0, 1, 2, 0, 2, 3, 4, 5, 6],
            base_color: [1.0, 1.0, 1.0],
        };
        mesh.compute_vertex_normals();
        mesh
    }

    #[test]
    fn samples_lie_on_surface() {
        let mesh = weighted_quad(1.0, 1.0);
        let sampler = SurfaceSampler::build(&mesh).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let p = sampler.sample(&mut rng);
            assert!(p.position.z.abs() < 1e-6);
            assert!((0.0..=2.0).contains(&p.position.x));
            assert!((0.0..=1.0).contains(&p.position.y));
        }
    }

    #[test]
    fn face_normal_matches_winding() {
        let mesh = weighted_quad(1.0, 1.0);
        let sampler = SurfaceSampler::build(&mesh).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        // CCW winding in the z=0 plane faces +z.
        for _ in 0..20 {
            let p = sampler.sample(&mut rng);
            assert!((p.normal - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn zero_weight_triangles_are_never_sampled() {
        let mesh = weighted_quad(1.0, 0.0);
        let sampler = SurfaceSampler::build(&mesh).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        // The right triangle (x > 1) carries weight zero at every corner.
        for _ in 0..500 {
            let p = sampler.sample(&mut rng);
            assert!(p.position.x <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn weights_bias_the_distribution() {
        let mesh = weighted_quad(1.0, 6.0);
        let sampler = SurfaceSampler::build(&mesh).unwrap();
        let mut rng = StdRng::seed_from_u64(17);

        // Quad: area 1.0, corner sum 3 per triangle. Triangle: area 0.5,
        // corner sum 18. Expected right share = 9 / (9 + 3) = 0.75.
        let n = 2000;
        let right = (0..n)
            .filter(|_| sampler.sample(&mut rng).position.x > 1.0)
            .count();
        let share = right as f32 / n as f32;
        assert!((0.65..0.85).contains(&share), "right share {share}");
    }

    #[test]
    fn all_zero_weights_fall_back_to_area() {
        let mesh = weighted_quad(0.0, 0.0);
        let sampler = SurfaceSampler::build(&mesh).unwrap();
        let mut rng = StdRng::seed_from_u64(23);

        let n = 1000;
        let right = (0..n)
            .filter(|_| sampler.sample(&mut rng).position.x > 1.0)
            .count();
        // Area split is 2:1, so roughly a third lands on the right.
        let share = right as f32 / n as f32;
        assert!((0.2..0.45).contains(&share), "right share {share}");
    }

    #[test]
    fn uvless_mesh_samples_by_area() {
        let mut mesh = weighted_quad(0.0, 0.0);
        mesh.uvs = None;
        let sampler = SurfaceSampler::build(&mesh).unwrap();
        let mut rng = StdRng::seed_from_u64(29);
        let p = sampler.sample(&mut rng);
        assert!(p.position.z.abs() < 1e-6);
    }

    #[test]
    fn degenerate_surface_is_an_error() {
        let mesh = MeshData {
            name: "line".to_owned(),
            positions: vec![
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
            normals: vec![Vec3::Z; 3],
            uvs: None,
            colors: None,
            indices: vec![0, 1, 2],
            base_color: [1.0, 1.0, 1.0],
        };
        assert!(SurfaceSampler::build(&mesh).is_err());
    }

    #[test]
    fn empty_mesh_is_an_error() {
        let mesh = MeshData {
            name: "empty".to_owned(),
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: None,
            colors: None,
            indices: Vec::new(),
            base_color: [1.0, 1.0, 1.0],
        };
        assert!(SurfaceSampler::build(&mesh).is_err());
    }

    #[test]
    fn seeded_sampling_is_deterministic() {
        let mesh = weighted_quad(1.0, 2.0);
        let sampler = SurfaceSampler::build(&mesh).unwrap();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }
}
