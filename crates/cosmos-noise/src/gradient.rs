//! Seeded 3D simplex gradient noise.
//!
//! Every [`GradientNoise`] owns its own permutation table, derived from the
//! seed it was built with. There is no shared random stream, so contexts for
//! different planets can be created and used from any thread in any order.

use glam::Vec3;
use noise::{NoiseFn, Simplex};

/// A deterministic 3D gradient noise context bound to one seed.
#[derive(Clone, Copy, Debug)]
pub struct GradientNoise {
    seed: i32,
    simplex: Simplex,
}

impl GradientNoise {
    /// Build the permutation table for `seed`.
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            // Bit-cast so negative seeds stay distinct from each other.
            simplex: Simplex::new(seed as u32),
        }
    }

    /// The seed this context was built with.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Sample the noise field at `point`.
    ///
    /// Returns a continuous value in `[-1, 1]`. Fractional coordinates are
    /// expected; callers scale the point by their octave frequency first.
    #[inline]
    pub fn evaluate(&self, point: Vec3) -> f32 {
        let raw = self
            .simplex
            .get([f64::from(point.x), f64::from(point.y), f64::from(point.z)]);
        (raw as f32).clamp(-1.0, 1.0)
    }
}

/// One-shot evaluation with a freshly seeded context.
///
/// Prefer holding a [`GradientNoise`] when sampling many points with the same
/// seed; building the table is cheap but not free.
pub fn gradient_noise(point: Vec3, seed: i32) -> f32 {
    GradientNoise::new(seed).evaluate(point)
}
