//! Cube-sphere geometry: the six cube faces, their tangent frames, and the
//! regular grid each face is sampled on before projection onto the sphere.

mod cube_face;
mod error;
mod face_grid;

pub use cube_face::CubeFace;
pub use error::FaceGridError;
pub use face_grid::{FaceGrid, MAX_RESOLUTION, MIN_RESOLUTION, tangent_axes};
