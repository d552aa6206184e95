//! Seeded gradient noise and layered octave profiles for planet terrain.

mod error;
mod gradient;
mod layer;

pub use error::NoiseLayerError;
pub use gradient::{GradientNoise, gradient_noise};
pub use layer::{MAX_OCTAVES, MIN_OCTAVES, NoiseKind, NoiseLayer, OctaveSample, Octaves};
