//! Generator settings with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// What to generate and how.
    pub generation: GenerationConfig,
    /// Where results go.
    pub output: OutputConfig,
    /// Logging and diagnostics.
    pub debug: DebugConfig,
}

/// Planet generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid points per face edge, `2..=255`.
    pub resolution: u32,
    /// Build the six faces on worker threads when more than one core is available.
    pub parallel_faces: bool,
    /// Seed for randomized planets.
    pub seed: i32,
    /// Orbit distance used to pick the planet type, ocean and life.
    pub orbit_distance: f32,
    /// Size range of the host star; `None` uses the default habitable zone.
    pub star_size: Option<(f32, f32)>,
    /// Optional RON file with randomizer tunables.
    pub randomizer_settings: Option<PathBuf>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives the exported files.
    pub directory: PathBuf,
    /// Write the mesh as Wavefront OBJ.
    pub write_mesh: bool,
    /// Write the biome color ramp as PNG.
    pub write_color_ramp: bool,
    /// Write the planet settings as RON.
    pub write_settings: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory.
    pub log_to_file: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            resolution: 50,
            parallel_faces: true,
            seed: 12345,
            orbit_distance: 0.0,
            star_size: None,
            randomizer_settings: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./planet_out"),
            write_mesh: true,
            write_color_ramp: true,
            write_settings: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

/// `<platform config dir>/cosmos`, falling back to `./config`.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("cosmos"))
        .unwrap_or_else(|| PathBuf::from("./config"))
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        let path = config_dir.join(CONFIG_FILE);
        std::fs::write(&path, serialized).map_err(|source| ConfigError::Write { path, source })
    }

    /// Re-read `config.ron`; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &new_config == self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(new_config))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
