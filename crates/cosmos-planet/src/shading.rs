//! Values handed from generation to the surface and atmosphere shaders.

use serde::{Deserialize, Serialize};

use crate::elevation::ElevationMinMax;
use crate::settings::{PlanetConfig, PlanetType};

/// Shader inputs derived from a finished mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadingParams {
    /// Lowest and highest displaced radius, `[min, max]`.
    pub elevation_min_max: [f32; 2],
    /// Shade low terrain as liquid.
    pub has_ocean: bool,
    /// Outer radius of the atmosphere shell. Rocky planets only.
    pub atmosphere_scale: Option<f32>,
}

impl ShadingParams {
    /// Derive shading inputs from the elevation range of a rebuild.
    pub fn derive(config: &PlanetConfig, elevation: &ElevationMinMax) -> Self {
        let (min, max) = (elevation.min(), elevation.max());
        let atmosphere_scale = match config.planet_type {
            PlanetType::Rocky => Some(atmosphere_scale(min, max)),
            PlanetType::GasGiant | PlanetType::Asteroid => None,
        };
        Self {
            elevation_min_max: [min, max],
            has_ocean: config.has_liquid_ocean,
            atmosphere_scale,
        }
    }
}

/// `max * 2 - (max - min) / 4 + 1`
pub fn atmosphere_scale(min: f32, max: f32) -> f32 {
    max * 2.0 - (max - min) / 4.0 + 1.0
}
