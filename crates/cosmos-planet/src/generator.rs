//! Six-face planet generation.
//!
//! Each cube face is built independently from the shared, read-only
//! [`ShapeGenerator`]. In parallel mode every face gets its own named scoped
//! thread with a private [`ElevationMinMax`]; trackers are merged after all
//! workers have joined, so the result does not depend on scheduling.

use std::time::Instant;

use cosmos_cubesphere::{CubeFace, FaceGrid};
use glam::Vec2;
use tracing::{debug, info};

use crate::biome::BiomeClassifier;
use crate::color_ramp::ColorRamp;
use crate::elevation::ElevationMinMax;
use crate::error::{ConfigurationError, GenerationError};
use crate::mesh::{PlanetFace, PlanetMesh};
use crate::settings::PlanetConfig;
use crate::shading::ShadingParams;
use crate::shape::ShapeGenerator;
use crate::terrain_face::{FaceMesh, build_face};

/// How the six faces are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaceExecution {
    /// One face after another on the calling thread.
    Sequential,
    /// One worker thread per face.
    #[default]
    Parallel,
}

/// Builds planet meshes from a validated configuration.
#[derive(Clone, Copy, Debug)]
pub struct PlanetGenerator<'a> {
    config: &'a PlanetConfig,
    shape: ShapeGenerator<'a>,
    biomes: BiomeClassifier<'a>,
}

impl<'a> PlanetGenerator<'a> {
    /// Validate `config` and seed its noise contexts.
    pub fn new(config: &'a PlanetConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            shape: ShapeGenerator::new(config),
            biomes: BiomeClassifier::new(config),
        })
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &'a PlanetConfig {
        self.config
    }

    /// The height function.
    pub fn shape(&self) -> &ShapeGenerator<'a> {
        &self.shape
    }

    /// Rebuild all six faces at `resolution`.
    pub fn generate(
        &self,
        resolution: u32,
        execution: FaceExecution,
    ) -> Result<PlanetMesh, GenerationError> {
        // Reject bad resolutions before any worker starts.
        FaceGrid::new(resolution, CubeFace::Up.local_up()).map_err(ConfigurationError::from)?;

        let start = Instant::now();
        let built = match execution {
            FaceExecution::Sequential => CubeFace::ALL
                .iter()
                .map(|&face| self.build_planet_face(face, resolution))
                .collect::<Result<Vec<_>, _>>()?,
            FaceExecution::Parallel => self.build_faces_parallel(resolution)?,
        };

        let mut elevation = ElevationMinMax::new();
        let mut faces = Vec::with_capacity(built.len());
        for (face, tracker) in built {
            elevation.merge(&tracker);
            faces.push(face);
        }

        let color_ramp = ColorRamp::build(&self.config.biomes, resolution);
        let shading = ShadingParams::derive(self.config, &elevation);
        let mesh = PlanetMesh {
            faces,
            elevation,
            color_ramp,
            shading,
            resolution,
        };

        info!(
            "Generated planet '{}': {} vertices, {} triangles, radius {:.3}..{:.3} in {:.2?} ({:?})",
            self.config.name,
            mesh.vertex_count(),
            mesh.triangle_count(),
            elevation.min(),
            elevation.max(),
            start.elapsed(),
            execution,
        );
        Ok(mesh)
    }

    /// Re-classify biome UVs and rebuild the color ramp without touching
    /// geometry. Used after a color-only settings change.
    pub fn update_uvs(&self, mesh: &mut PlanetMesh) {
        for face in &mut mesh.faces {
            self.assign_uvs(&mut face.mesh);
        }
        mesh.color_ramp = ColorRamp::build(&self.config.biomes, mesh.resolution);
        mesh.shading = ShadingParams::derive(self.config, &mesh.elevation);
        debug!("Updated biome UVs for planet '{}'", self.config.name);
    }

    fn build_faces_parallel(
        &self,
        resolution: u32,
    ) -> Result<Vec<(PlanetFace, ElevationMinMax)>, GenerationError> {
        std::thread::scope(|scope| -> Result<Vec<_>, GenerationError> {
            let mut handles = Vec::with_capacity(CubeFace::ALL.len());
            for face in CubeFace::ALL {
                let handle = std::thread::Builder::new()
                    .name(format!("planet-face-{face:?}"))
                    .spawn_scoped(scope, move || self.build_planet_face(face, resolution))
                    .map_err(|source| GenerationError::WorkerSpawn { face, source })?;
                handles.push((face, handle));
            }

            handles
                .into_iter()
                .map(|(face, handle)| -> Result<_, GenerationError> {
                    let built = handle
                        .join()
                        .map_err(|_| GenerationError::WorkerPanicked(face))??;
                    Ok(built)
                })
                .collect()
        })
    }

    fn build_planet_face(
        &self,
        face: CubeFace,
        resolution: u32,
    ) -> Result<(PlanetFace, ElevationMinMax), ConfigurationError> {
        let mut tracker = ElevationMinMax::new();
        let mut mesh = build_face(resolution, face.local_up(), |p| {
            self.shape.calculate_point_on_planet(p, &mut tracker)
        })?;
        self.assign_uvs(&mut mesh);

        debug!(
            "Built face {:?}: {} vertices, radius {:.3}..{:.3}",
            face,
            mesh.vertices.len(),
            tracker.min(),
            tracker.max()
        );
        Ok((PlanetFace { face, mesh }, tracker))
    }

    fn assign_uvs(&self, mesh: &mut FaceMesh) {
        for vertex in &mut mesh.vertices {
            vertex.uv = Vec2::new(self.biomes.biome_percent(vertex.position_on_unit_sphere), 0.0);
        }
    }
}
