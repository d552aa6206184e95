//! Face grid construction errors.

/// Errors that can occur when building a [`FaceGrid`](crate::FaceGrid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FaceGridError {
    /// Resolution must lie in `2..=255` so indices fit a 16-bit-friendly mesh.
    #[error("face resolution {0} is outside 2..=255")]
    ResolutionOutOfRange(u32),
}
