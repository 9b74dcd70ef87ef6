//! Built-in procedural geometry used when no model files are given.
//!
//! A low dome of soil for the terrain and a small Z-up flower sprig for the
//! instanced template. Both are deterministic closed-form surfaces so the
//! zero-argument binary always opens the same scene.

use std::f32::consts::TAU;

use glam::Vec3;

use super::MeshData;

const MOUND_RADIUS: f32 = 1.6;
const MOUND_HEIGHT: f32 = 0.55;
const MOUND_RINGS: usize = 24;
const MOUND_SEGMENTS: usize = 48;

const SOIL_COLOR: Vec3 = Vec3::new(0.33, 0.24, 0.16);
const MOSS_COLOR: Vec3 = Vec3::new(0.23, 0.35, 0.14);

/// Dome height at radial fraction `t` (0 at apex, 1 at rim) and angle.
///
/// The angular ripple fades at both the apex and the rim so the apex stays
/// a single point and the rim lands exactly on y = 0.
fn mound_height(t: f32, angle: f32) -> f32 {
    let dome = MOUND_HEIGHT * (1.0 - t * t).powi(2);
    let ripple = 0.03 * (4.0 * angle).sin() * t * (1.0 - t);
    dome + ripple
}

/// A radially symmetric soil mound with a closed underside.
#[must_use]
pub fn terrain_mound() -> MeshData {
    let mut positions = Vec::new();
    let mut colors = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // Apex, then concentric rings from apex to rim.
    positions.push(Vec3::new(0.0, MOUND_HEIGHT, 0.0));
    colors.push(SOIL_COLOR);
    for ring in 1..=MOUND_RINGS {
        let t = ring as f32 / MOUND_RINGS as f32;
        let r = MOUND_RADIUS * t;
        for seg in 0..MOUND_SEGMENTS {
            let angle = TAU * seg as f32 / MOUND_SEGMENTS as f32;
            let y = mound_height(t, angle);
            positions.push(Vec3::new(r * angle.cos(), y, r * angle.sin()));
            colors.push(SOIL_COLOR.lerp(MOSS_COLOR, t));
        }
    }

    // Vertex index of `seg` on 1-based `ring`.
    let ring_vertex = |ring: usize, seg: usize| -> u32 {
        (1 + (ring - 1) * MOUND_SEGMENTS + seg % MOUND_SEGMENTS) as u32
    };

    // Fan from the apex to the first ring.
    for seg in 0..MOUND_SEGMENTS {
        indices.extend([0, ring_vertex(1, seg + 1), ring_vertex(1, seg)]);
    }
    // Quad bands between consecutive rings.
    for ring in 1..MOUND_RINGS {
        for seg in 0..MOUND_SEGMENTS {
            let cur = ring_vertex(ring, seg);
            let nxt = ring_vertex(ring, seg + 1);
            let cur_out = ring_vertex(ring + 1, seg);
            let nxt_out = ring_vertex(ring + 1, seg + 1);
            indices.extend([cur, nxt, nxt_out]);
            indices.extend([cur, nxt_out, cur_out]);
        }
    }

    // Closed underside: its own rim ring so the silhouette edge stays crisp.
    let base_center = positions.len() as u32;
    positions.push(Vec3::ZERO);
    colors.push(SOIL_COLOR);
    let base_ring = positions.len() as u32;
    for seg in 0..MOUND_SEGMENTS {
        let angle = TAU * seg as f32 / MOUND_SEGMENTS as f32;
        positions.push(Vec3::new(
            MOUND_RADIUS * angle.cos(),
            0.0,
            MOUND_RADIUS * angle.sin(),
        ));
        colors.push(SOIL_COLOR);
    }
    for seg in 0..MOUND_SEGMENTS as u32 {
        let next = (seg + 1) % MOUND_SEGMENTS as u32;
        indices.extend([base_center, base_ring + seg, base_ring + next]);
    }

    let mut mesh = MeshData {
        name: "mound".to_owned(),
        positions,
        normals: Vec::new(),
        uvs: None,
        colors: Some(colors),
        indices,
        base_color: SOIL_COLOR.to_array(),
    };
    mesh.compute_vertex_normals();
    mesh
}

const STEM_RADIUS: f32 = 0.006;
const STEM_HEIGHT: f32 = 0.1;
const STEM_SIDES: usize = 6;
const PETAL_INNER: f32 = 0.012;
const PETAL_OUTER: f32 = 0.045;
const PETAL_DROOP: f32 = 0.012;
const PETAL_SEGMENTS: usize = 8;
const HEART_RADIUS: f32 = 0.016;

const STEM_COLOR: Vec3 = Vec3::new(0.18, 0.42, 0.16);
const PETAL_COLOR: Vec3 = Vec3::new(0.97, 0.84, 0.30);
const HEART_COLOR: Vec3 = Vec3::new(0.55, 0.33, 0.08);

/// A small flower sprig: stem, petal ring, and heart disc.
///
/// Built with +Z as the height axis so an instance oriented along a surface
/// normal stands upright on the surface. Roughly 0.1 units tall at full
/// scale.
#[must_use]
pub fn flower_sprig() -> MeshData {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut colors = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // Stem: open hexagonal tube along +Z with exact radial normals.
    for &z in &[0.0, STEM_HEIGHT] {
        for side in 0..STEM_SIDES {
            let angle = TAU * side as f32 / STEM_SIDES as f32;
            let radial = Vec3::new(angle.cos(), angle.sin(), 0.0);
            positions.push(radial * STEM_RADIUS + Vec3::new(0.0, 0.0, z));
            normals.push(radial);
            colors.push(STEM_COLOR);
        }
    }
    for side in 0..STEM_SIDES as u32 {
        let next = (side + 1) % STEM_SIDES as u32;
        let top = STEM_SIDES as u32;
        indices.extend([side, next, top + next]);
        indices.extend([side, top + next, top + side]);
    }

    // Petal ring: an annulus at the stem tip, drooping toward its rim.
    let petal_base = positions.len() as u32;
    for seg in 0..PETAL_SEGMENTS {
        let angle = TAU * seg as f32 / PETAL_SEGMENTS as f32;
        let dir = Vec3::new(angle.cos(), angle.sin(), 0.0);
        positions.push(dir * PETAL_INNER + Vec3::new(0.0, 0.0, STEM_HEIGHT));
        positions.push(
            dir * PETAL_OUTER
                + Vec3::new(0.0, 0.0, STEM_HEIGHT - PETAL_DROOP),
        );
        normals.push(Vec3::Z);
        normals.push(Vec3::Z);
        colors.push(PETAL_COLOR);
        colors.push(PETAL_COLOR);
    }
    for seg in 0..PETAL_SEGMENTS as u32 {
        let next = (seg + 1) % PETAL_SEGMENTS as u32;
        let (inner, outer) = (petal_base + seg * 2, petal_base + seg * 2 + 1);
        let (inner_n, outer_n) =
            (petal_base + next * 2, petal_base + next * 2 + 1);
        indices.extend([inner, outer, outer_n]);
        indices.extend([inner, outer_n, inner_n]);
    }

    // Heart disc floating just above the petals.
    let heart_center = positions.len() as u32;
    positions.push(Vec3::new(0.0, 0.0, STEM_HEIGHT + 0.004));
    normals.push(Vec3::Z);
    colors.push(HEART_COLOR);
    let heart_ring = positions.len() as u32;
    for seg in 0..PETAL_SEGMENTS {
        let angle = TAU * seg as f32 / PETAL_SEGMENTS as f32;
        positions.push(Vec3::new(
            HEART_RADIUS * angle.cos(),
            HEART_RADIUS * angle.sin(),
            STEM_HEIGHT + 0.004,
        ));
        normals.push(Vec3::Z);
        colors.push(HEART_COLOR);
    }
    for seg in 0..PETAL_SEGMENTS as u32 {
        let next = (seg + 1) % PETAL_SEGMENTS as u32;
        indices.extend([heart_center, heart_ring + seg, heart_ring + next]);
    }

    MeshData {
        name: "sprig".to_owned(),
        positions,
        normals,
        uvs: None,
        colors: Some(colors),
        indices,
        base_color: PETAL_COLOR.to_array(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(mesh: &MeshData) {
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(
            mesh.positions.len(),
            mesh.colors.as_ref().map_or(0, Vec::len)
        );
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.positions.len()));
        for n in &mesh.normals {
            assert!(
                (n.length() - 1.0).abs() < 1e-3,
                "normal not unit length: {n}"
            );
        }
    }

    #[test]
    fn mound_is_well_formed() {
        let mound = terrain_mound();
        assert_well_formed(&mound);
        // Expected topology: apex fan + quad bands + base fan.
        let expected = MOUND_SEGMENTS
            + (MOUND_RINGS - 1) * MOUND_SEGMENTS * 2
            + MOUND_SEGMENTS;
        assert_eq!(mound.triangle_count(), expected);
    }

    #[test]
    fn mound_stays_inside_its_radius_and_rim_meets_ground() {
        let mound = terrain_mound();
        for p in &mound.positions {
            let radial = p.x.hypot(p.z);
            assert!(radial <= MOUND_RADIUS + 1e-4);
            assert!((-1e-4..=MOUND_HEIGHT + 0.04).contains(&p.y));
        }
        // Rim vertices of the dome sit exactly on the ground plane.
        let rim_start = 1 + (MOUND_RINGS - 1) * MOUND_SEGMENTS;
        for p in &mound.positions[rim_start..rim_start + MOUND_SEGMENTS] {
            assert!(p.y.abs() < 1e-5, "rim vertex off the ground: {p}");
        }
    }

    #[test]
    fn sprig_is_well_formed_and_z_up() {
        let sprig = flower_sprig();
        assert_well_formed(&sprig);
        let (min, max) = sprig.bounds();
        assert!(min.z >= -1e-6, "sprig should not dip below its root");
        assert!(max.z > STEM_HEIGHT, "head sits above the stem tip");
        assert!(max.x <= PETAL_OUTER + 1e-6);
        assert!(max.y <= PETAL_OUTER + 1e-6);
    }
}
