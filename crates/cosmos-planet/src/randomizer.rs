//! Procedural planet settings from a seed and an orbit.
//!
//! The planet type, size, terrain noise, ocean, life, biome colors and
//! atmosphere are all drawn from one [`ChaCha8Rng`] seeded with the planet
//! seed, so a seed and orbit always reproduce the same [`PlanetConfig`].

use std::path::Path;

use cosmos_noise::{NoiseKind, NoiseLayer};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigurationError, SettingsError};
use crate::gradient::{ColorGradient, ColorKey, Rgba, WHITE};
use crate::names::generate_name;
use crate::settings::{AtmosphereSettings, Biome, PlanetConfig, PlanetType};

/// Keys in every randomized biome gradient.
const BIOME_COLOR_KEYS: usize = 5;
/// Chance that a planet outside the habitable zone is still rocky.
const ROCKY_OUTSIDE_ZONE_CHANCE: f32 = 0.4;
/// Atmosphere gas draws are `0..MAX_ATMOSPHERE_GASES`.
const MAX_ATMOSPHERE_GASES: usize = 12;

/// A named color with a selection weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Element or material the color stands for.
    pub name: String,
    /// Linear RGBA.
    pub color: Rgba,
    /// Relative selection weight.
    pub weight: f32,
}

impl PaletteColor {
    fn new(name: &str, rgb: [u8; 3], weight: f32) -> Self {
        Self {
            name: name.to_string(),
            color: [
                f32::from(rgb[0]) / 255.0,
                f32::from(rgb[1]) / 255.0,
                f32::from(rgb[2]) / 255.0,
                1.0,
            ],
            weight,
        }
    }
}

/// Pick a palette entry with probability proportional to its weight.
///
/// Returns white for an empty or weightless palette.
pub fn pick_weighted<R: Rng + ?Sized>(palette: &[PaletteColor], rng: &mut R) -> Rgba {
    let total: f32 = palette.iter().map(|p| p.weight.max(0.0)).sum();
    if !total.is_finite() || total <= 0.0 {
        return WHITE;
    }
    let mut roll = rng.random_range(0.0..total);
    for entry in palette {
        let weight = entry.weight.max(0.0);
        if roll < weight {
            return entry.color;
        }
        roll -= weight;
    }
    palette.last().map_or(WHITE, |p| p.color)
}

/// Tunables for [`randomize_planet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizerSettings {
    /// Smallest rocky radius.
    pub rocky_min_size: f32,
    /// Largest rocky radius.
    pub rocky_max_size: f32,
    /// Lower bound for the landmass layer.
    pub rocky_landmass_min_noise: NoiseLayer,
    /// Upper bound for the landmass layer.
    pub rocky_landmass_max_noise: NoiseLayer,
    /// Lower bound for the mountain layer.
    pub rocky_mountains_min_noise: NoiseLayer,
    /// Upper bound for the mountain layer.
    pub rocky_mountains_max_noise: NoiseLayer,
    /// Chance that an ocean planet has life.
    pub chance_of_life: f32,
    /// Ocean colors, sampled at a random position.
    pub ocean_colors: ColorGradient,
    /// Vegetation colors, sampled at a random position.
    pub vegetation_colors: ColorGradient,
    /// Chance of a thick atmosphere on rocky planets.
    pub chance_of_thick_atmosphere: f32,
    /// Smallest cloud thickness.
    pub min_cloud_thickness: f32,
    /// Largest cloud thickness.
    pub max_cloud_thickness: f32,
    /// Smallest gas giant radius.
    pub gas_giant_min_size: f32,
    /// Largest gas giant radius.
    pub gas_giant_max_size: f32,
    /// Smallest biome boundary wobble on gas giants.
    pub gas_giant_biome_noise_strength_min: f32,
    /// Largest biome boundary wobble on gas giants.
    pub gas_giant_biome_noise_strength_max: f32,
    /// Landmass sea level for rocky planets without an ocean.
    pub non_ocean_floor_level: f32,
    /// Surface materials.
    pub solid_palette: Vec<PaletteColor>,
    /// Atmosphere and gas giant band materials.
    pub gas_palette: Vec<PaletteColor>,
}

impl Default for RandomizerSettings {
    fn default() -> Self {
        Self {
            rocky_min_size: 10.0,
            rocky_max_size: 40.0,
            rocky_landmass_min_noise: NoiseLayer::new(NoiseKind::Simple, 0.05, 0.8, 2.0, 0.45, 3, 0.9),
            rocky_landmass_max_noise: NoiseLayer::new(NoiseKind::Simple, 0.2, 1.4, 2.6, 0.55, 7, 1.1),
            rocky_mountains_min_noise: NoiseLayer::new(NoiseKind::Ridged, 0.5, 1.5, 2.0, 0.45, 3, 0.0),
            rocky_mountains_max_noise: NoiseLayer::new(NoiseKind::Ridged, 2.0, 2.5, 2.6, 0.55, 7, 0.4),
            chance_of_life: 0.1,
            ocean_colors: ColorGradient::new(vec![
                ColorKey::new(0.0, [0.02, 0.09, 0.35, 1.0]),
                ColorKey::new(0.5, [0.05, 0.28, 0.62, 1.0]),
                ColorKey::new(1.0, [0.10, 0.55, 0.60, 1.0]),
            ]),
            vegetation_colors: ColorGradient::new(vec![
                ColorKey::new(0.0, [0.07, 0.25, 0.06, 1.0]),
                ColorKey::new(0.6, [0.22, 0.48, 0.13, 1.0]),
                ColorKey::new(1.0, [0.55, 0.62, 0.20, 1.0]),
            ]),
            chance_of_thick_atmosphere: 0.1,
            min_cloud_thickness: 0.1,
            max_cloud_thickness: 0.8,
            gas_giant_min_size: 50.0,
            gas_giant_max_size: 80.0,
            gas_giant_biome_noise_strength_min: 0.5,
            gas_giant_biome_noise_strength_max: 30.0,
            non_ocean_floor_level: 0.5,
            solid_palette: vec![
                PaletteColor::new("Iron", [140, 72, 40], 5.0),
                PaletteColor::new("Silicon", [120, 118, 110], 6.0),
                PaletteColor::new("Carbon", [45, 42, 40], 3.0),
                PaletteColor::new("Sulfur", [200, 180, 60], 1.5),
                PaletteColor::new("Copper", [170, 100, 60], 1.0),
                PaletteColor::new("Calcium", [225, 220, 205], 2.0),
                PaletteColor::new("Magnesium", [160, 150, 140], 2.0),
                PaletteColor::new("Nickel", [110, 100, 85], 1.0),
            ],
            gas_palette: vec![
                PaletteColor::new("Hydrogen", [215, 190, 160], 6.0),
                PaletteColor::new("Helium", [235, 225, 200], 4.0),
                PaletteColor::new("Methane", [110, 170, 200], 2.0),
                PaletteColor::new("Ammonia", [190, 150, 110], 1.5),
                PaletteColor::new("Nitrogen", [150, 170, 230], 2.5),
                PaletteColor::new("Oxygen", [120, 160, 255], 1.5),
                PaletteColor::new("Chlorine", [180, 200, 90], 0.5),
                PaletteColor::new("Neon", [230, 110, 90], 0.5),
            ],
        }
    }
}

impl RandomizerSettings {
    /// Load randomizer tunables from a RON file and validate them.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(SettingsError::Read)?;
        let settings: Self = ron::from_str(&contents).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject ranges the randomizer cannot draw from.
    ///
    /// Scalar ranges must be finite with `min <= max`. Noise layer pairs only
    /// need finite parameters since each one is drawn between its two bounds
    /// in either order.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let ranges = [
            ("rocky size", self.rocky_min_size, self.rocky_max_size),
            ("gas giant size", self.gas_giant_min_size, self.gas_giant_max_size),
            (
                "gas giant biome noise strength",
                self.gas_giant_biome_noise_strength_min,
                self.gas_giant_biome_noise_strength_max,
            ),
            ("cloud thickness", self.min_cloud_thickness, self.max_cloud_thickness),
        ];
        for (field, min, max) in ranges {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(ConfigurationError::InvalidRandomizerRange { field, min, max });
            }
        }

        let layers = [
            ("landmass noise", &self.rocky_landmass_min_noise, &self.rocky_landmass_max_noise),
            ("mountain noise", &self.rocky_mountains_min_noise, &self.rocky_mountains_max_noise),
        ];
        for (field, min, max) in layers {
            let pairs = [
                (min.strength, max.strength),
                (min.base_roughness, max.base_roughness),
                (min.roughness, max.roughness),
                (min.persistence, max.persistence),
                (min.min_value, max.min_value),
            ];
            if let Some(&(min, max)) = pairs
                .iter()
                .find(|(a, b)| !(a.is_finite() && b.is_finite()))
            {
                return Err(ConfigurationError::InvalidRandomizerRange { field, min, max });
            }
        }
        Ok(())
    }
}

/// Orbit band where rocky planets hold liquid water.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HabitableZone {
    /// Inner edge, inclusive.
    pub start: f32,
    /// Outer edge, exclusive.
    pub end: f32,
}

impl Default for HabitableZone {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 50.0,
        }
    }
}

impl HabitableZone {
    /// Scene magnitude a star of average size maps to.
    const MAGNITUDE_EQUIVALENT: f32 = 250.0;
    /// Scene units per astronomical unit.
    const AU: f32 = 600.0;
    /// Inner edge of the Sun's habitable zone in AU.
    const SOL_START: f32 = 0.723;
    /// Outer edge of the Sun's habitable zone in AU.
    const SOL_END: f32 = 1.523;

    /// Habitable zone of a star whose size lies in `min_size..max_size`.
    pub fn for_star(min_size: f32, max_size: f32) -> Self {
        let magnitude = min_size + (max_size - min_size) / 2.0;
        let modifier = Self::MAGNITUDE_EQUIVALENT / magnitude;
        Self {
            start: Self::SOL_START * modifier * Self::AU + 10.0,
            end: Self::SOL_END * modifier * Self::AU,
        }
    }

    /// Whether `orbit_distance` lies inside the zone.
    pub fn contains(&self, orbit_distance: f32) -> bool {
        orbit_distance >= self.start && orbit_distance < self.end
    }
}

/// Draw a complete planet for `seed` orbiting at `orbit_distance`.
///
/// Fails only when `settings` holds a range that cannot be sampled.
pub fn randomize_planet(
    seed: i32,
    orbit_distance: f32,
    zone: &HabitableZone,
    settings: &RandomizerSettings,
) -> Result<PlanetConfig, ConfigurationError> {
    settings.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed as u32));

    let is_rocky = orbit_distance < zone.end || rng.random::<f32>() < ROCKY_OUTSIDE_ZONE_CHANCE;

    let mut config = PlanetConfig {
        name: generate_name(seed),
        seed,
        noise_layers: vec![NoiseLayer::default(), NoiseLayer::default()],
        biome_noise: NoiseLayer::default(),
        ..Default::default()
    };

    let biome_count = if is_rocky {
        config.planet_type = PlanetType::Rocky;
        config.has_liquid_ocean = zone.contains(orbit_distance);
        config.radius = rng.random_range(settings.rocky_min_size..=settings.rocky_max_size);

        config.noise_layers[0].randomize_between(
            &settings.rocky_landmass_min_noise,
            &settings.rocky_landmass_max_noise,
            &mut rng,
        );
        config.noise_layers[1].randomize_between(
            &settings.rocky_mountains_min_noise,
            &settings.rocky_mountains_max_noise,
            &mut rng,
        );

        if config.has_liquid_ocean {
            config.has_life = rng.random::<f32>() < settings.chance_of_life;
        } else {
            config.noise_layers[0].min_value = settings.non_ocean_floor_level;
        }

        config.biome_noise.strength = rng.random_range(0.3..0.6);
        config.biome_noise_strength = rng.random_range(0.3..0.6);
        rng.random_range(3..5)
    } else {
        config.planet_type = PlanetType::GasGiant;
        config.radius = rng.random_range(settings.gas_giant_min_size..=settings.gas_giant_max_size);

        for layer in &mut config.noise_layers {
            layer.enabled = false;
        }

        config.biome_noise_strength = rng.random_range(
            settings.gas_giant_biome_noise_strength_min..=settings.gas_giant_biome_noise_strength_max,
        );
        config.biome_noise.strength = rng.random_range(0.1..0.4);
        rng.random_range(1..20)
    };

    config.biomes = (0..biome_count)
        .map(|i| Biome {
            start_height: i as f32 / biome_count as f32,
            gradient: biome_gradient(&config, settings, &mut rng),
        })
        .collect();

    if is_rocky {
        config.atmosphere = rocky_atmosphere(settings, &mut rng);
    }

    debug!(
        "Randomized planet '{}' (seed {}): {:?}, radius {:.2}, {} biomes, ocean {}, life {}",
        config.name,
        seed,
        config.planet_type,
        config.radius,
        config.biomes.len(),
        config.has_liquid_ocean,
        config.has_life
    );
    Ok(config)
}

fn biome_gradient(
    config: &PlanetConfig,
    settings: &RandomizerSettings,
    rng: &mut ChaCha8Rng,
) -> ColorGradient {
    let mut keys = Vec::with_capacity(BIOME_COLOR_KEYS);

    if config.has_liquid_ocean && config.planet_type == PlanetType::Rocky {
        let ocean = settings.ocean_colors.evaluate(rng.random::<f32>());
        keys.push(ColorKey::new(0.01, ocean));
        keys.push(ColorKey::new(0.02, pick_weighted(&settings.solid_palette, rng)));
    }

    if config.has_life {
        keys.push(ColorKey::new(0.30, settings.vegetation_colors.evaluate(rng.random::<f32>())));
        keys.push(ColorKey::new(0.60, settings.vegetation_colors.evaluate(rng.random::<f32>())));
    }

    let palette = match config.planet_type {
        PlanetType::Rocky => &settings.solid_palette,
        PlanetType::GasGiant | PlanetType::Asteroid => &settings.gas_palette,
    };
    for c in keys.len()..BIOME_COLOR_KEYS {
        let time = c as f32 / BIOME_COLOR_KEYS as f32;
        keys.push(ColorKey::new(time, pick_weighted(palette, rng)));
    }

    ColorGradient::new(keys)
}

fn rocky_atmosphere(settings: &RandomizerSettings, rng: &mut ChaCha8Rng) -> AtmosphereSettings {
    let gases = rng.random_range(0..MAX_ATMOSPHERE_GASES);
    let mut color = WHITE;
    for i in 0..gases {
        let gas = pick_weighted(&settings.gas_palette, rng);
        if i == 0 {
            color = gas;
        }
    }

    AtmosphereSettings {
        thick: rng.random::<f32>() < settings.chance_of_thick_atmosphere,
        cloud_thickness: rng
            .random_range(settings.min_cloud_thickness..=settings.max_cloud_thickness),
        color,
    }
}
