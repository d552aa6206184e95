//! The six faces of a cube-sphere and their local-up axes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The six faces of the cube that is inflated into the planet sphere.
///
/// Each variant's outward normal ("local up") points along the named
/// direction, with +Y up and +Z forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum CubeFace {
    /// +Y face
    Up = 0,
    /// −Y face
    Down = 1,
    /// −X face
    Left = 2,
    /// +X face
    Right = 3,
    /// +Z face
    Forward = 4,
    /// −Z face
    Back = 5,
}

impl CubeFace {
    /// All six faces in generation order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Up,
        CubeFace::Down,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Forward,
        CubeFace::Back,
    ];

    /// The opposite face (e.g., `Up` → `Down`).
    #[must_use]
    pub fn opposite(self) -> CubeFace {
        match self {
            CubeFace::Up => CubeFace::Down,
            CubeFace::Down => CubeFace::Up,
            CubeFace::Left => CubeFace::Right,
            CubeFace::Right => CubeFace::Left,
            CubeFace::Forward => CubeFace::Back,
            CubeFace::Back => CubeFace::Forward,
        }
    }

    /// Outward-pointing unit normal for this face.
    #[must_use]
    pub fn local_up(self) -> Vec3 {
        match self {
            CubeFace::Up => Vec3::Y,
            CubeFace::Down => Vec3::NEG_Y,
            CubeFace::Left => Vec3::NEG_X,
            CubeFace::Right => Vec3::X,
            CubeFace::Forward => Vec3::Z,
            CubeFace::Back => Vec3::NEG_Z,
        }
    }

    /// Position of this face in [`CubeFace::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}
