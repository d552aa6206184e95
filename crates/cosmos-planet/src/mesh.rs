//! Finished planet mesh and its GPU-ready packing.
//!
//! [`PackedVertex`] is a 32-byte interleaved vertex with full-precision
//! position, normal and biome UV, laid out for direct buffer upload.

use cosmos_cubesphere::CubeFace;

use crate::color_ramp::ColorRamp;
use crate::elevation::ElevationMinMax;
use crate::shading::ShadingParams;
use crate::terrain_face::{FaceMesh, Vertex};

/// An interleaved vertex for upload.
///
/// Layout (32 bytes total):
///   - `[0..12]`  position `[f32; 3]`, displaced
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..32]` uv `[f32; 2]`, `x` is the biome coordinate
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedVertex {
    /// Displaced position.
    pub position: [f32; 3],
    /// Smoothed normal.
    pub normal: [f32; 3],
    /// Color ramp coordinates.
    pub uv: [f32; 2],
}

impl From<&Vertex> for PackedVertex {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.displaced_position.to_array(),
            normal: v.normal.to_array(),
            uv: v.uv.to_array(),
        }
    }
}

/// One cube face of a built planet.
#[derive(Clone, Debug)]
pub struct PlanetFace {
    /// Which face.
    pub face: CubeFace,
    /// Its mesh.
    pub mesh: FaceMesh,
}

/// Output of a full rebuild.
#[derive(Clone, Debug)]
pub struct PlanetMesh {
    /// The six faces, in [`CubeFace::ALL`] order.
    pub faces: Vec<PlanetFace>,
    /// Displaced radius range over every face.
    pub elevation: ElevationMinMax,
    /// Biome color ramp sampled by the vertex UVs.
    pub color_ramp: ColorRamp,
    /// Shader inputs derived from the elevation range.
    pub shading: ShadingParams,
    /// Grid resolution each face was built at.
    pub resolution: u32,
}

impl PlanetMesh {
    /// Vertices across all faces.
    pub fn vertex_count(&self) -> usize {
        self.faces.iter().map(|f| f.mesh.vertices.len()).sum()
    }

    /// Triangles across all faces.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.mesh.triangle_count()).sum()
    }

    /// Every vertex of every face, packed in face order.
    pub fn packed_vertices(&self) -> Vec<PackedVertex> {
        self.faces
            .iter()
            .flat_map(|f| f.mesh.vertices.iter())
            .map(PackedVertex::from)
            .collect()
    }

    /// Triangle indices into [`packed_vertices`](Self::packed_vertices).
    pub fn packed_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.triangle_count() * 3);
        let mut base = 0u32;
        for face in &self.faces {
            indices.extend(face.mesh.indices.iter().map(|&i| i + base));
            base += face.mesh.vertices.len() as u32;
        }
        indices
    }
}
