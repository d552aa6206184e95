//! Planet surfaces: settings, the height function, biome classification,
//! six-face mesh generation, color ramps and the seeded planet randomizer.

mod biome;
mod color_ramp;
mod elevation;
mod error;
mod generator;
mod gradient;
mod mesh;
mod names;
mod randomizer;
mod settings;
mod shading;
mod shape;
mod terrain_face;

pub use biome::{BiomeClassifier, inverse_lerp};
pub use color_ramp::ColorRamp;
pub use elevation::ElevationMinMax;
pub use error::{ConfigurationError, GenerationError, SettingsError};
pub use generator::{FaceExecution, PlanetGenerator};
pub use gradient::{ColorGradient, ColorKey, Rgba, WHITE, to_rgba8};
pub use mesh::{PackedVertex, PlanetFace, PlanetMesh};
pub use names::generate_name;
pub use randomizer::{
    HabitableZone, PaletteColor, RandomizerSettings, pick_weighted, randomize_planet,
};
pub use settings::{AtmosphereSettings, Biome, PlanetConfig, PlanetType};
pub use shading::{ShadingParams, atmosphere_scale};
pub use shape::ShapeGenerator;
pub use terrain_face::{FaceMesh, Vertex, build_face};
