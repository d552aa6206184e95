//! Planet configuration, persistence and generation errors.

use cosmos_cubesphere::{CubeFace, FaceGridError};
use cosmos_noise::NoiseLayerError;

/// A planet configuration that cannot produce sensible geometry.
///
/// These are data errors caught before generation starts; they are never
/// retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// At least one biome is required to build the color ramp.
    #[error("planet has no biomes")]
    EmptyBiomes,

    /// Mesh resolution outside `2..=255`.
    #[error("mesh resolution {0} is outside 2..=255")]
    ResolutionOutOfRange(u32),

    /// A terrain noise layer is malformed.
    #[error("noise layer {layer} is invalid: {source}")]
    NoiseLayer {
        /// Index into the planet's noise layers.
        layer: usize,
        /// What is wrong with it.
        #[source]
        source: NoiseLayerError,
    },

    /// The biome boundary noise is malformed.
    #[error("biome noise is invalid: {0}")]
    BiomeNoise(#[source] NoiseLayerError),

    /// Radius must be a positive, finite number.
    #[error("planet radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    /// Biomes must be listed by ascending start height.
    #[error("biome {index} starts below the biome before it")]
    BiomesOutOfOrder {
        /// Index of the first biome that breaks the ordering.
        index: usize,
    },

    /// A biome start height that is not a finite value in `0..=1`.
    #[error("biome {index} start height {value} is outside 0..=1")]
    StartHeightOutOfRange {
        /// Index of the offending biome.
        index: usize,
        /// The rejected start height.
        value: f32,
    },

    /// A randomizer range with non-finite or inverted bounds.
    #[error("randomizer range '{field}' has invalid bounds {min}..={max}")]
    InvalidRandomizerRange {
        /// Which tunable the range belongs to.
        field: &'static str,
        /// Lower bound as configured.
        min: f32,
        /// Upper bound as configured.
        max: f32,
    },

    /// Blend amount outside `0..=1`.
    #[error("biome blend amount {0} is outside 0..=1")]
    BlendAmountOutOfRange(f32),
}

impl From<FaceGridError> for ConfigurationError {
    fn from(err: FaceGridError) -> Self {
        match err {
            FaceGridError::ResolutionOutOfRange(res) => ConfigurationError::ResolutionOutOfRange(res),
        }
    }
}

/// Errors raised while building a whole planet mesh.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The configuration was rejected.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A face worker thread could not be started.
    #[error("failed to spawn worker for face {face:?}: {source}")]
    WorkerSpawn {
        /// Face the worker was meant to build.
        face: CubeFace,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A face worker thread panicked.
    #[error("worker for face {0:?} panicked")]
    WorkerPanicked(CubeFace),
}

/// Errors that can occur when loading or saving planet data files.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Failed to read a file from disk.
    #[error("failed to read planet settings: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write a file to disk.
    #[error("failed to write planet settings: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse planet settings: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize to RON.
    #[error("failed to serialize planet settings: {0}")]
    Serialize(#[source] ron::Error),

    /// Failed to encode or write an image.
    #[error("failed to write image: {0}")]
    Image(#[source] image::ImageError),

    /// The loaded settings do not describe a valid planet.
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}
