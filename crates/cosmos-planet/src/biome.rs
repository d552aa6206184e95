//! Biome band classification.
//!
//! A point's "height percent" is its `y` coordinate remapped to `[0, 1]`,
//! wobbled by the biome noise so band edges are not straight lines. Biomes are
//! walked in ascending start-height order, each blending a running index
//! towards its own. The result, divided by the last index, is the horizontal
//! texture coordinate into the color ramp.

use cosmos_noise::GradientNoise;
use glam::Vec3;

use crate::settings::PlanetConfig;

/// Added to half the blend amount so the blend range is never empty.
const MIN_BLEND_RANGE: f32 = 0.001;

/// Maps unit-sphere points to a blended biome coordinate.
#[derive(Clone, Copy, Debug)]
pub struct BiomeClassifier<'a> {
    config: &'a PlanetConfig,
    noise: GradientNoise,
}

impl<'a> BiomeClassifier<'a> {
    /// Seed the boundary noise for `config`.
    pub fn new(config: &'a PlanetConfig) -> Self {
        Self {
            config,
            noise: GradientNoise::new(config.seed),
        }
    }

    /// Height percent of a point after boundary noise is applied.
    pub fn height_percent(&self, point_on_unit_sphere: Vec3) -> f32 {
        let config = self.config;
        let base = (point_on_unit_sphere.y + 1.0) / 2.0;
        let wobble = config.biome_noise.evaluate(point_on_unit_sphere, &self.noise);
        base + (wobble - config.biome_noise_offset) * config.biome_noise_strength
    }

    /// Blended biome coordinate in `[0, 1]`.
    pub fn biome_percent(&self, point_on_unit_sphere: Vec3) -> f32 {
        let height_percent = self.height_percent(point_on_unit_sphere);
        let blend_range = self.config.biome_blend_amount / 2.0 + MIN_BLEND_RANGE;

        let mut biome_index = 0.0_f32;
        for (i, biome) in self.config.biomes.iter().enumerate() {
            let distance_from_start = height_percent - biome.start_height;
            let weight = inverse_lerp(-blend_range, blend_range, distance_from_start);
            biome_index *= 1.0 - weight;
            biome_index += i as f32 * weight;
        }

        let last = self.config.biomes.len().saturating_sub(1).max(1);
        biome_index / last as f32
    }
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`; 0 when `a == b`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::ColorGradient;
    use crate::settings::Biome;

    fn banded(starts: &[f32], blend: f32, noise_strength: f32) -> PlanetConfig {
        PlanetConfig {
            biomes: starts
                .iter()
                .map(|&start_height| Biome {
                    start_height,
                    gradient: ColorGradient::default(),
                })
                .collect(),
            biome_blend_amount: blend,
            biome_noise_strength: noise_strength,
            ..Default::default()
        }
    }

    /// A unit-sphere point whose height percent is `h` (for `h` in `[0, 1]`).
    fn at_height(h: f32) -> Vec3 {
        let y = h * 2.0 - 1.0;
        Vec3::new((1.0 - y * y).max(0.0).sqrt(), y, 0.0)
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(0.0, 2.0, 1.0), 0.5);
        assert_eq!(inverse_lerp(0.0, 2.0, -1.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 2.0, 5.0), 1.0);
        assert_eq!(inverse_lerp(1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_height_percent_without_noise_is_y_remap() {
        let config = banded(&[0.0], 0.0, 0.0);
        let classifier = BiomeClassifier::new(&config);
        assert_eq!(classifier.height_percent(Vec3::Y), 1.0);
        assert_eq!(classifier.height_percent(Vec3::NEG_Y), 0.0);
        assert_eq!(classifier.height_percent(Vec3::X), 0.5);
    }

    #[test]
    fn test_equal_blend_exactly_on_boundary() {
        let config = banded(&[0.0, 0.5], 0.0, 0.0);
        let classifier = BiomeClassifier::new(&config);
        let at_boundary = classifier.biome_percent(Vec3::X);
        assert!((at_boundary - 0.5).abs() < 1e-6, "got {at_boundary}");
    }

    #[test]
    fn test_hard_bands_away_from_boundary() {
        let config = banded(&[0.0, 0.5], 0.0, 0.0);
        let classifier = BiomeClassifier::new(&config);
        assert_eq!(classifier.biome_percent(at_height(0.25)), 0.0);
        assert_eq!(classifier.biome_percent(at_height(0.75)), 1.0);
    }

    #[test]
    fn test_wide_blend_cross_fades_smoothly() {
        let config = banded(&[0.0, 0.5], 1.0, 0.0);
        let classifier = BiomeClassifier::new(&config);
        let mut previous = classifier.biome_percent(at_height(0.0));
        for i in 1..=100 {
            let v = classifier.biome_percent(at_height(i as f32 / 100.0));
            assert!(v + 1e-6 >= previous, "blend not monotonic at step {i}");
            assert!(v - previous < 0.05, "blend jumps by {} at step {i}", v - previous);
            previous = v;
        }
    }

    #[test]
    fn test_single_biome_always_zero() {
        let config = banded(&[0.0], 0.5, 1.0);
        let classifier = BiomeClassifier::new(&config);
        for h in [0.0, 0.3, 0.9, 1.0] {
            assert_eq!(classifier.biome_percent(at_height(h)), 0.0);
        }
    }

    #[test]
    fn test_percent_in_unit_range_with_noise() {
        let config = banded(&[0.0, 0.25, 0.5, 0.75], 0.4, 0.6);
        let classifier = BiomeClassifier::new(&config);
        for i in 0..500 {
            let t = i as f32 * 0.173;
            let p = Vec3::new(t.cos(), (t * 0.31).sin(), t.sin()).normalize();
            let v = classifier.biome_percent(p);
            assert!((0.0..=1.0).contains(&v), "biome percent {v} at {p:?}");
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let config = banded(&[0.0, 0.3, 0.6], 0.5, 0.5);
        let a = BiomeClassifier::new(&config);
        let b = BiomeClassifier::new(&config);
        let p = Vec3::new(0.2, -0.4, 0.9).normalize();
        assert_eq!(a.biome_percent(p).to_bits(), b.biome_percent(p).to_bits());
    }
}
