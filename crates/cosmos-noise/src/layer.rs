//! Layered octave noise: the building block of planet elevation.
//!
//! A [`NoiseLayer`] composes several octaves of [`GradientNoise`] into one
//! terrain-height contribution. Two octave shapes are supported:
//!
//! - **Simple**: each octave is remapped from `[-1, 1]` to `[0, 1]` and summed.
//! - **Ridged**: each octave is folded with `(1 - |n|)^2` and scaled by a
//!   weight fed back from the previous octave, producing sharp crests.
//!
//! After the loop the sum is floored at `min_value` (sea level) and scaled by
//! `strength`.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{GradientNoise, NoiseLayerError};

/// Smallest accepted octave count.
pub const MIN_OCTAVES: u8 = 1;
/// Largest accepted octave count.
pub const MAX_OCTAVES: u8 = 8;

/// Octave shape used by a [`NoiseLayer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseKind {
    /// Smooth rolling terrain.
    #[default]
    Simple,
    /// Mountain ridges with decaying self-similarity.
    Ridged,
}

/// Parameters for one stack of noise octaves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseLayer {
    /// Disabled layers add nothing to the elevation.
    pub enabled: bool,
    /// Multiply this layer by the first layer's value (ignored on the first layer).
    pub use_first_layer_as_mask: bool,
    /// Octave shape.
    pub kind: NoiseKind,
    /// Final multiplier applied after the sea-level floor.
    pub strength: f32,
    /// Frequency of the first octave.
    pub base_roughness: f32,
    /// Frequency multiplier between octaves.
    pub roughness: f32,
    /// Amplitude multiplier between octaves.
    pub persistence: f32,
    /// Number of octaves, `1..=8`.
    pub octaves: u8,
    /// Offset added to every sample position.
    pub center: Vec3,
    /// Sea-level floor; sums below it flatten to zero.
    pub min_value: f32,
}

impl Default for NoiseLayer {
    fn default() -> Self {
        Self {
            enabled: true,
            use_first_layer_as_mask: true,
            kind: NoiseKind::Simple,
            strength: 0.01,
            base_roughness: 1.0,
            roughness: 3.0,
            persistence: 0.5,
            octaves: 6,
            center: Vec3::ZERO,
            min_value: 0.75,
        }
    }
}

/// One step of the octave loop, as seen after it has been accumulated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctaveSample {
    /// Frequency the point was scaled by.
    pub frequency: f32,
    /// Amplitude applied to this octave.
    pub amplitude: f32,
    /// Gradient noise sample in `[-1, 1]`.
    pub raw: f32,
    /// Ridge weight after this octave (always 1 for simple layers).
    pub weight: f32,
    /// Amount added to the running sum.
    pub contribution: f32,
}

/// Iterator over the octaves of a [`NoiseLayer`] at one point.
pub struct Octaves<'a> {
    layer: &'a NoiseLayer,
    noise: &'a GradientNoise,
    point: Vec3,
    remaining: u8,
    frequency: f32,
    amplitude: f32,
    weight: f32,
}

impl Iterator for Octaves<'_> {
    type Item = OctaveSample;

    fn next(&mut self) -> Option<OctaveSample> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let raw = self
            .noise
            .evaluate(self.point * self.frequency + self.layer.center);

        let contribution = match self.layer.kind {
            NoiseKind::Simple => (raw + 1.0) * 0.5 * self.amplitude,
            NoiseKind::Ridged => {
                let mut v = 1.0 - raw.abs();
                v *= v;
                v *= self.weight;
                self.weight = v.clamp(0.0, 1.0);
                v * self.amplitude
            }
        };

        let sample = OctaveSample {
            frequency: self.frequency,
            amplitude: self.amplitude,
            raw,
            weight: self.weight,
            contribution,
        };

        self.frequency *= self.layer.roughness;
        self.amplitude *= self.layer.persistence;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.remaining);
        (n, Some(n))
    }
}

impl NoiseLayer {
    /// A layer with the given shape parameters, centered at the origin and enabled.
    pub fn new(
        kind: NoiseKind,
        strength: f32,
        base_roughness: f32,
        roughness: f32,
        persistence: f32,
        octaves: u8,
        min_value: f32,
    ) -> Self {
        Self {
            kind,
            strength,
            base_roughness,
            roughness,
            persistence,
            octaves,
            min_value,
            ..Default::default()
        }
    }

    /// Check the octave count.
    pub fn validate(&self) -> Result<(), NoiseLayerError> {
        if !(MIN_OCTAVES..=MAX_OCTAVES).contains(&self.octaves) {
            return Err(NoiseLayerError::OctavesOutOfRange(self.octaves));
        }
        Ok(())
    }

    /// Walk the octave loop at `point`.
    pub fn octaves<'a>(&'a self, point: Vec3, noise: &'a GradientNoise) -> Octaves<'a> {
        Octaves {
            layer: self,
            noise,
            point,
            remaining: self.octaves,
            frequency: self.base_roughness,
            amplitude: 1.0,
            weight: 1.0,
        }
    }

    /// The octave sum before the sea-level floor and strength are applied.
    pub fn raw_value(&self, point: Vec3, noise: &GradientNoise) -> f32 {
        self.octaves(point, noise).map(|o| o.contribution).sum()
    }

    /// Evaluate the layer at `point`.
    ///
    /// Returns `max(0, sum - min_value) * strength`.
    pub fn evaluate(&self, point: Vec3, noise: &GradientNoise) -> f32 {
        let value = self.raw_value(point, noise);
        (value - self.min_value).max(0.0) * self.strength
    }

    /// Evaluate with a context seeded on the spot.
    pub fn evaluate_seeded(&self, point: Vec3, seed: i32) -> f32 {
        self.evaluate(point, &GradientNoise::new(seed))
    }

    /// Upper bound of [`raw_value`](Self::raw_value): every octave contributes
    /// at most its amplitude in either mode.
    pub fn max_amplitude(&self) -> f32 {
        let mut sum = 0.0;
        let mut amp = 1.0_f32;
        for _ in 0..self.octaves {
            sum += amp.abs();
            amp *= self.persistence;
        }
        sum
    }

    /// Upper bound of [`evaluate`](Self::evaluate).
    pub fn max_value(&self) -> f32 {
        (self.max_amplitude() - self.min_value).max(0.0) * self.strength.abs()
    }

    /// Draw every numeric parameter uniformly between `min` and `max`.
    ///
    /// The kind is taken from `min`; `enabled`, masking and `center` are kept.
    /// The octave upper bound is exclusive, like the authored ranges it was
    /// tuned against.
    pub fn randomize_between<R: Rng + ?Sized>(
        &mut self,
        min: &NoiseLayer,
        max: &NoiseLayer,
        rng: &mut R,
    ) {
        self.kind = min.kind;
        self.strength = range_f32(rng, min.strength, max.strength);
        self.base_roughness = range_f32(rng, min.base_roughness, max.base_roughness);
        self.roughness = range_f32(rng, min.roughness, max.roughness);
        self.persistence = range_f32(rng, min.persistence, max.persistence);
        self.octaves = if min.octaves < max.octaves {
            rng.random_range(min.octaves..max.octaves)
        } else {
            min.octaves
        };
        self.min_value = range_f32(rng, min.min_value, max.min_value);
    }
}

fn range_f32<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.random_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_points(count: usize) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                )
                .try_normalize()
                .unwrap_or(Vec3::Y)
            })
            .collect()
    }

    fn simple_layer() -> NoiseLayer {
        NoiseLayer::new(NoiseKind::Simple, 1.0, 1.0, 2.0, 0.5, 3, 0.0)
    }

    #[test]
    fn test_default_layer_is_valid() {
        assert!(NoiseLayer::default().validate().is_ok());
    }

    #[test]
    fn test_octave_bounds_rejected() {
        let mut layer = simple_layer();
        layer.octaves = 0;
        assert_eq!(layer.validate(), Err(NoiseLayerError::OctavesOutOfRange(0)));
        layer.octaves = 9;
        assert_eq!(layer.validate(), Err(NoiseLayerError::OctavesOutOfRange(9)));
        layer.octaves = 8;
        assert!(layer.validate().is_ok());
    }

    #[test]
    fn test_octave_trace_frequencies_and_amplitudes() {
        let layer = simple_layer();
        let noise = GradientNoise::new(1);
        let trace: Vec<_> = layer.octaves(Vec3::X, &noise).collect();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0].frequency, 1.0);
        assert_eq!(trace[1].frequency, 2.0);
        assert_eq!(trace[2].frequency, 4.0);
        assert_eq!(trace[0].amplitude, 1.0);
        assert_eq!(trace[1].amplitude, 0.5);
        assert_eq!(trace[2].amplitude, 0.25);
        for o in &trace {
            assert_eq!(o.weight, 1.0, "simple layers never change the weight");
            assert_eq!(o.contribution, (o.raw + 1.0) * 0.5 * o.amplitude);
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let layer = NoiseLayer::new(NoiseKind::Ridged, 0.7, 1.3, 2.2, 0.6, 5, 0.1);
        for p in sample_points(200) {
            let a = layer.evaluate_seeded(p, 12345);
            let b = layer.evaluate_seeded(p, 12345);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_ridged_weights_never_increase() {
        let layer = NoiseLayer::new(NoiseKind::Ridged, 1.0, 1.0, 2.5, 0.8, 8, 0.0);
        let noise = GradientNoise::new(2024);
        for p in sample_points(500) {
            let weights: Vec<f32> = layer.octaves(p, &noise).map(|o| o.weight).collect();
            for pair in weights.windows(2) {
                assert!(
                    pair[1] <= pair[0],
                    "ridge weight rose from {} to {} at {p:?}",
                    pair[0],
                    pair[1]
                );
            }
            assert!(weights.iter().all(|w| (0.0..=1.0).contains(w)));
        }
    }

    #[test]
    fn test_ridged_contribution_uses_previous_weight() {
        let layer = NoiseLayer::new(NoiseKind::Ridged, 1.0, 1.0, 2.0, 0.5, 4, 0.0);
        let noise = GradientNoise::new(9);
        let p = Vec3::new(0.3, 0.8, -0.52).normalize();
        let mut previous_weight = 1.0;
        for o in layer.octaves(p, &noise) {
            let mut folded = 1.0 - o.raw.abs();
            folded *= folded;
            folded *= previous_weight;
            assert!((o.contribution - folded * o.amplitude).abs() < 1e-6);
            assert_eq!(o.weight, folded.clamp(0.0, 1.0));
            previous_weight = o.weight;
        }
    }

    #[test]
    fn test_sea_level_floor_flattens_to_zero() {
        let mut layer = simple_layer();
        layer.octaves = 1;
        layer.min_value = 0.5;
        layer.strength = 3.0;
        let noise = GradientNoise::new(77);

        let mut flattened = 0;
        for p in sample_points(1_000) {
            let raw = layer.raw_value(p, &noise);
            let value = layer.evaluate(p, &noise);
            if raw <= 0.5 {
                assert_eq!(value, 0.0, "raw {raw} below sea level produced {value}");
                flattened += 1;
            } else {
                assert!((value - (raw - 0.5) * 3.0).abs() < 1e-5);
            }
        }
        assert!(flattened > 0, "no sample fell below sea level");
    }

    #[test]
    fn test_values_within_max_value() {
        for kind in [NoiseKind::Simple, NoiseKind::Ridged] {
            let layer = NoiseLayer::new(kind, 1.5, 1.0, 2.0, 0.5, 6, 0.2);
            let noise = GradientNoise::new(5);
            let bound = layer.max_value();
            for p in sample_points(500) {
                let v = layer.evaluate(p, &noise);
                assert!(v >= 0.0 && v <= bound + 1e-5, "{kind:?}: {v} outside [0, {bound}]");
            }
        }
    }

    #[test]
    fn test_max_amplitude_geometric_sum() {
        let layer = simple_layer();
        assert!((layer.max_amplitude() - 1.75).abs() < 1e-6);
    }

    #[test]
    fn test_randomize_between_stays_in_bounds() {
        let min = NoiseLayer::new(NoiseKind::Ridged, 0.5, 0.8, 1.5, 0.4, 2, 0.1);
        let max = NoiseLayer::new(NoiseKind::Simple, 2.0, 1.6, 3.0, 0.6, 6, 0.9);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let mut layer = NoiseLayer::default();
            layer.enabled = false;
            layer.randomize_between(&min, &max, &mut rng);
            assert_eq!(layer.kind, NoiseKind::Ridged);
            assert!(!layer.enabled, "randomizing must not toggle the layer");
            assert!((0.5..=2.0).contains(&layer.strength));
            assert!((0.8..=1.6).contains(&layer.base_roughness));
            assert!((1.5..=3.0).contains(&layer.roughness));
            assert!((0.4..=0.6).contains(&layer.persistence));
            assert!((2..6).contains(&layer.octaves));
            assert!((0.1..=0.9).contains(&layer.min_value));
        }
    }

    #[test]
    fn test_layer_ron_defaults_fill_missing_fields() {
        let layer: NoiseLayer = ron::from_str("(kind: Ridged, octaves: 4)").unwrap();
        assert_eq!(layer.kind, NoiseKind::Ridged);
        assert_eq!(layer.octaves, 4);
        assert_eq!(layer.min_value, NoiseLayer::default().min_value);
    }
}
