//! Triangle mesh for one cube face of the planet.

use cosmos_cubesphere::FaceGrid;
use glam::{Vec2, Vec3};

use crate::error::ConfigurationError;

/// One surface vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    /// Undisplaced direction from the planet center.
    pub position_on_unit_sphere: Vec3,
    /// Final position after the height function.
    pub displaced_position: Vec3,
    /// Smoothed normal, averaged over adjacent triangles of the same face.
    pub normal: Vec3,
    /// `x` is the biome coordinate into the color ramp, `y` is unused.
    pub uv: Vec2,
}

/// Vertices and triangle indices for one face.
#[derive(Clone, Debug)]
pub struct FaceMesh {
    /// Grid the mesh was sampled from.
    pub grid: FaceGrid,
    /// `resolution²` vertices, row-major with `x` fastest.
    pub vertices: Vec<Vertex>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl FaceMesh {
    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build the mesh of one face.
///
/// `height_fn` maps each unit-sphere point to its displaced position. UVs are
/// left at zero; the biome classifier fills them in afterwards.
pub fn build_face<F>(
    resolution: u32,
    local_up: Vec3,
    mut height_fn: F,
) -> Result<FaceMesh, ConfigurationError>
where
    F: FnMut(Vec3) -> Vec3,
{
    let grid = FaceGrid::new(resolution, local_up)?;

    let mut vertices: Vec<Vertex> = grid
        .coords()
        .map(|(x, y)| {
            let position_on_unit_sphere = grid.point_on_unit_sphere(x, y);
            Vertex {
                position_on_unit_sphere,
                displaced_position: height_fn(position_on_unit_sphere),
                ..Default::default()
            }
        })
        .collect();

    let indices = grid.triangle_indices();
    recalculate_normals(&mut vertices, &indices);

    Ok(FaceMesh {
        grid,
        vertices,
        indices,
    })
}

/// Area-weighted smooth normals from the displaced positions.
fn recalculate_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut sums = vec![Vec3::ZERO; vertices.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let pa = vertices[a].displaced_position;
        let face_normal = (vertices[b].displaced_position - pa)
            .cross(vertices[c].displaced_position - pa);
        sums[a] += face_normal;
        sums[b] += face_normal;
        sums[c] += face_normal;
    }
    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = sum.normalize_or_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmos_cubesphere::CubeFace;

    fn bumpy(p: Vec3) -> Vec3 {
        p * (1.0 + 0.1 * (p.x * 5.0).sin() * (p.z * 3.0).cos())
    }

    #[test]
    fn test_counts_for_resolution_ten() {
        let mesh = build_face(10, Vec3::Y, |p| p).unwrap();
        assert_eq!(mesh.vertices.len(), 100);
        assert_eq!(mesh.indices.len(), 486);
        assert_eq!(mesh.triangle_count(), 162);
    }

    #[test]
    fn test_minimum_resolution() {
        let mesh = build_face(2, Vec3::X, |p| p).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn test_resolution_out_of_range_rejected() {
        for res in [0, 1, 256] {
            assert_eq!(
                build_face(res, Vec3::Y, |p| p).unwrap_err(),
                ConfigurationError::ResolutionOutOfRange(res)
            );
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = build_face(7, Vec3::NEG_Z, bumpy).unwrap();
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_normals_point_outward_on_every_face() {
        for face in CubeFace::ALL {
            let mesh = build_face(8, face.local_up(), |p| p * 3.0).unwrap();
            for v in &mesh.vertices {
                assert!((v.normal.length() - 1.0).abs() < 1e-4);
                assert!(
                    v.normal.dot(v.position_on_unit_sphere) > 0.5,
                    "{face:?}: inward normal {:?} at {:?}",
                    v.normal,
                    v.position_on_unit_sphere
                );
            }
        }
    }

    #[test]
    fn test_height_fn_sees_unit_sphere_points() {
        let mut seen = Vec::new();
        let mesh = build_face(5, Vec3::NEG_X, |p| {
            seen.push(p);
            p * 2.0
        })
        .unwrap();
        assert_eq!(seen.len(), 25);
        for (v, p) in mesh.vertices.iter().zip(&seen) {
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.position_on_unit_sphere, *p);
            assert_eq!(v.displaced_position, *p * 2.0);
            assert_eq!(v.uv, Vec2::ZERO);
        }
    }

    #[test]
    fn test_displaced_seams_coincide() {
        let meshes: Vec<FaceMesh> = CubeFace::ALL
            .iter()
            .map(|face| build_face(9, face.local_up(), bumpy).unwrap())
            .collect();

        for (i, mesh) in meshes.iter().enumerate() {
            for (x, y) in mesh.grid.coords().filter(|&(x, y)| mesh.grid.is_edge(x, y)) {
                let p = mesh.vertices[mesh.grid.vertex_index(x, y)].displaced_position;
                let matched = meshes
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .flat_map(|(_, other)| other.vertices.iter())
                    .any(|v| v.displaced_position.distance(p) < 1e-4);
                assert!(matched, "face {i} edge vertex ({x}, {y}) has no twin");
            }
        }
    }
}
