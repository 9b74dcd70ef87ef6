//! Per-instance growth state and the once-per-frame update that drives
//! flowers toward full size near the clicked target point.
//!
//! Each instance carries a scale in [0, 1] and a growth rate. Instances
//! within the near radius of the shared target accelerate; everyone else
//! has its rate decay geometrically toward zero. Scale accumulates the
//! rate and saturates at full size, never shrinking back. The resulting
//! transforms feed the instanced flower renderer directly.

use glam::{Mat4, Quat, Vec3};

use crate::options::GrowthOptions;
use crate::scene::SurfacePoint;

/// Tuning constants for the growth update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthParams {
    /// Instances closer to the target than this accelerate.
    pub near_radius: f32,
    /// Rate gained per step while near the target.
    pub acceleration: f32,
    /// Rate multiplier per step while away from the target.
    pub decay: f32,
    /// Scale ceiling; growth saturates here.
    pub max_scale: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            near_radius: 0.1,
            acceleration: 0.001,
            decay: 0.9,
            max_scale: 1.0,
        }
    }
}

impl From<&GrowthOptions> for GrowthParams {
    fn from(options: &GrowthOptions) -> Self {
        Self {
            near_radius: options.near_radius,
            acceleration: options.acceleration,
            decay: options.decay,
            max_scale: 1.0,
        }
    }
}

/// Growth state for the whole instance population.
///
/// Anchors and orientations are fixed at scatter time; only scales and
/// rates evolve. Instance 0 keeps its initial zero-scale transform and is
/// skipped by [`step`](Self::step).
pub struct GrowthField {
    params: GrowthParams,
    /// Anchor position on the surface, per instance.
    positions: Vec<Vec3>,
    /// Rotation taking +Z to the anchor's outward normal, per instance.
    orientations: Vec<Quat>,
    scales: Vec<f32>,
    rates: Vec<f32>,
    /// Shared point everything grows toward. Updated by clicks.
    target: Vec3,
    /// Instance transforms consumed by the renderer.
    transforms: Vec<Mat4>,
}

impl GrowthField {
    /// Build the field from scattered surface anchors. All scales and
    /// rates start at zero, the target starts at the origin, and every
    /// transform is written once so untouched instances stay collapsed.
    #[must_use]
    pub fn new(points: &[SurfacePoint], params: GrowthParams) -> Self {
        let positions: Vec<Vec3> =
            points.iter().map(|p| p.position).collect();
        let orientations: Vec<Quat> = points
            .iter()
            .map(|p| Quat::from_rotation_arc(Vec3::Z, p.normal))
            .collect();

        let transforms: Vec<Mat4> = positions
            .iter()
            .zip(&orientations)
            .map(|(&position, &orientation)| {
                compose(0.0, orientation, position)
            })
            .collect();

        Self {
            params,
            positions,
            orientations,
            scales: vec![0.0; points.len()],
            rates: vec![0.0; points.len()],
            target: Vec3::ZERO,
            transforms,
        }
    }

    /// Advance every instance except index 0 by one step.
    ///
    /// Near the target the rate climbs by the acceleration constant;
    /// elsewhere it decays by the decay factor. Scale then accumulates
    /// the rate and clamps at the ceiling, so it never decreases and
    /// sticks once saturated.
    pub fn step(&mut self) {
        for i in 1..self.positions.len() {
            let d = self.positions[i].distance(self.target);
            if d < self.params.near_radius {
                self.rates[i] += self.params.acceleration;
            } else {
                self.rates[i] *= self.params.decay;
            }
            self.scales[i] =
                (self.scales[i] + self.rates[i]).min(self.params.max_scale);
            self.transforms[i] = compose(
                self.scales[i],
                self.orientations[i],
                self.positions[i],
            );
        }
    }

    /// Move the shared target point.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// The shared target point.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Per-instance transforms, ready for the instance buffer.
    #[must_use]
    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the field has no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current scale of instance `i`.
    #[must_use]
    pub fn scale(&self, i: usize) -> f32 {
        self.scales[i]
    }

    /// Current growth rate of instance `i`.
    #[must_use]
    pub fn rate(&self, i: usize) -> f32 {
        self.rates[i]
    }
}

/// Uniform scale, then orientation, then translation to the anchor.
fn compose(scale: f32, orientation: Quat, position: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        orientation,
        position,
    )
}
