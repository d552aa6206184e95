//! Planet settings: everything needed to rebuild a planet's surface.
//!
//! A [`PlanetConfig`] is either produced by the randomizer or authored by hand
//! and stored as RON. It is read-only while a mesh is being built.

use std::path::Path;

use cosmos_noise::NoiseLayer;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, SettingsError};
use crate::gradient::{ColorGradient, Rgba, WHITE};

/// Broad planet category; drives randomization and shading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    /// Solid surface with landmass and mountain layers.
    #[default]
    Rocky,
    /// Banded atmosphere only, no terrain relief.
    GasGiant,
    /// Small irregular body.
    Asteroid,
}

/// A height band of the surface with its own color gradient.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Biome {
    /// Where the band begins, in `[0, 1]` of the height percent.
    pub start_height: f32,
    /// Colors sampled across the band.
    pub gradient: ColorGradient,
}

/// Cloud and haze parameters handed to the atmosphere shader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereSettings {
    /// Use the dense two-color atmosphere instead of thin haze.
    pub thick: bool,
    /// Secondary noise scale of the cloud layer.
    pub cloud_thickness: f32,
    /// Tint of the atmosphere.
    pub color: Rgba,
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            thick: false,
            cloud_thickness: 0.5,
            color: WHITE,
        }
    }
}

/// Complete description of one planet's surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Display name.
    pub name: String,
    /// Seed for every noise evaluation on this planet.
    pub seed: i32,
    /// Base sphere radius before displacement.
    pub radius: f32,
    /// Terrain layers; the first one is the landmass and may mask the rest.
    pub noise_layers: Vec<NoiseLayer>,
    /// Noise that wobbles the biome band boundaries.
    pub biome_noise: NoiseLayer,
    /// Subtracted from the biome noise before scaling.
    pub biome_noise_offset: f32,
    /// Scale of the biome boundary wobble.
    pub biome_noise_strength: f32,
    /// Width of the cross-fade between bands, `0..=1`.
    pub biome_blend_amount: f32,
    /// Bands ordered by ascending `start_height`.
    pub biomes: Vec<Biome>,
    /// Shade low terrain as liquid.
    pub has_liquid_ocean: bool,
    /// Whether vegetation colors were used.
    pub has_life: bool,
    /// Planet category.
    pub planet_type: PlanetType,
    /// Atmosphere shading parameters.
    pub atmosphere: AtmosphereSettings,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            name: "Planet X".to_string(),
            seed: 12345,
            radius: 2.0,
            noise_layers: vec![NoiseLayer::default()],
            biome_noise: NoiseLayer::default(),
            biome_noise_offset: 0.0,
            biome_noise_strength: 1.0,
            biome_blend_amount: 0.5,
            biomes: vec![Biome::default()],
            has_liquid_ocean: false,
            has_life: false,
            planet_type: PlanetType::Rocky,
            atmosphere: AtmosphereSettings::default(),
        }
    }
}

impl PlanetConfig {
    /// Reject settings that cannot produce sensible geometry.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigurationError::NonPositiveRadius(self.radius));
        }
        if self.biomes.is_empty() {
            return Err(ConfigurationError::EmptyBiomes);
        }
        if let Some((index, biome)) = self
            .biomes
            .iter()
            .enumerate()
            .find(|(_, b)| !(0.0..=1.0).contains(&b.start_height))
        {
            return Err(ConfigurationError::StartHeightOutOfRange {
                index,
                value: biome.start_height,
            });
        }
        if let Some(index) = self
            .biomes
            .windows(2)
            .position(|pair| pair[1].start_height < pair[0].start_height)
        {
            return Err(ConfigurationError::BiomesOutOfOrder { index: index + 1 });
        }
        if !(0.0..=1.0).contains(&self.biome_blend_amount) {
            return Err(ConfigurationError::BlendAmountOutOfRange(
                self.biome_blend_amount,
            ));
        }
        for (layer, noise) in self.noise_layers.iter().enumerate() {
            noise
                .validate()
                .map_err(|source| ConfigurationError::NoiseLayer { layer, source })?;
        }
        self.biome_noise
            .validate()
            .map_err(ConfigurationError::BiomeNoise)?;
        Ok(())
    }

    /// Parse and validate RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        let config: PlanetConfig = ron::from_str(text).map_err(SettingsError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty RON text for this planet.
    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty).map_err(SettingsError::Serialize)
    }

    /// Load and validate a planet from a RON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(SettingsError::Read)?;
        let config = Self::from_ron_str(&contents)?;
        tracing::info!("Loaded planet '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Write this planet to `path` as RON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SettingsError::Write)?;
        }
        let serialized = self.to_ron_string()?;
        std::fs::write(path, serialized).map_err(SettingsError::Write)?;
        Ok(())
    }
}
