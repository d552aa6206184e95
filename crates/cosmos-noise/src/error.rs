//! Noise layer validation errors.

/// Errors reported when a [`NoiseLayer`](crate::NoiseLayer) is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NoiseLayerError {
    /// The octave count lies outside `1..=8`.
    #[error("octave count {0} is outside 1..=8")]
    OctavesOutOfRange(u8),
}
