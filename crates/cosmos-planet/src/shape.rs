//! Planet height function: stacks the noise layers into a displaced radius.
//!
//! The first layer is the landmass. It is always evaluated, even when
//! disabled, because later layers may use it as a mask: a masked layer is
//! multiplied by the landmass value so mountains do not rise out of the
//! ocean floor. Layers after the first sample noise seeded with `seed + 1`.

use cosmos_noise::GradientNoise;
use glam::Vec3;

use crate::elevation::ElevationMinMax;
use crate::settings::PlanetConfig;

/// Evaluates surface elevation for one planet.
///
/// Holds only shared references and seeded noise contexts, so one instance
/// can serve every face worker at once.
#[derive(Clone, Copy, Debug)]
pub struct ShapeGenerator<'a> {
    config: &'a PlanetConfig,
    landmass_noise: GradientNoise,
    detail_noise: GradientNoise,
}

impl<'a> ShapeGenerator<'a> {
    /// Seed the noise contexts for `config`.
    pub fn new(config: &'a PlanetConfig) -> Self {
        Self {
            config,
            landmass_noise: GradientNoise::new(config.seed),
            detail_noise: GradientNoise::new(config.seed.wrapping_add(1)),
        }
    }

    /// Unscaled elevation at a unit-sphere point (0 means base radius).
    pub fn elevation(&self, point_on_unit_sphere: Vec3) -> f32 {
        let layers = &self.config.noise_layers;
        let Some((first, rest)) = layers.split_first() else {
            return 0.0;
        };

        let first_layer_value = first.evaluate(point_on_unit_sphere, &self.landmass_noise);
        let mut elevation = if first.enabled {
            first_layer_value
        } else {
            0.0
        };

        for layer in rest.iter().filter(|layer| layer.enabled) {
            let mask = if layer.use_first_layer_as_mask {
                first_layer_value
            } else {
                1.0
            };
            elevation += layer.evaluate(point_on_unit_sphere, &self.detail_noise) * mask;
        }
        elevation
    }

    /// Distance from the planet center at `point_on_unit_sphere`.
    pub fn scaled_radius(&self, point_on_unit_sphere: Vec3) -> f32 {
        self.config.radius * (1.0 + self.elevation(point_on_unit_sphere))
    }

    /// Displace a unit-sphere point onto the planet surface and record its
    /// radius in `tracker`.
    pub fn calculate_point_on_planet(
        &self,
        point_on_unit_sphere: Vec3,
        tracker: &mut ElevationMinMax,
    ) -> Vec3 {
        let radius = self.scaled_radius(point_on_unit_sphere);
        tracker.add(radius);
        point_on_unit_sphere * radius
    }
}
