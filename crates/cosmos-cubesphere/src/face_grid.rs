//! Regular sample grid on one cube face and its projection onto the unit sphere.
//!
//! Grid point `(x, y)` sits at `percent = (x, y) / (resolution - 1)` across the
//! face. The cube point is `local_up + (2 * percent.x - 1) * axis_a +
//! (2 * percent.y - 1) * axis_b`, and normalizing it lands on the sphere.
//! Neighbouring faces sample their shared edge at the same parameters, so
//! edge vertices coincide once projected.

use glam::{Vec2, Vec3};

use crate::FaceGridError;

/// Smallest accepted grid resolution.
pub const MIN_RESOLUTION: u32 = 2;
/// Largest accepted grid resolution.
pub const MAX_RESOLUTION: u32 = 255;

/// Derive the two tangent axes of a face from its local-up axis.
///
/// `axis_a` is `local_up` with its components rotated `(y, z, x)`;
/// `axis_b = local_up × axis_a`.
#[inline]
#[must_use]
pub fn tangent_axes(local_up: Vec3) -> (Vec3, Vec3) {
    let axis_a = Vec3::new(local_up.y, local_up.z, local_up.x);
    let axis_b = local_up.cross(axis_a);
    (axis_a, axis_b)
}

/// Working set for building one face: resolution plus the face's frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGrid {
    resolution: u32,
    local_up: Vec3,
    axis_a: Vec3,
    axis_b: Vec3,
}

impl FaceGrid {
    /// Build a grid of `resolution × resolution` points on the face whose
    /// outward axis is `local_up`.
    pub fn new(resolution: u32, local_up: Vec3) -> Result<Self, FaceGridError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(FaceGridError::ResolutionOutOfRange(resolution));
        }
        let (axis_a, axis_b) = tangent_axes(local_up);
        Ok(Self {
            resolution,
            local_up,
            axis_a,
            axis_b,
        })
    }

    /// Points per edge.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Outward axis of the face.
    pub fn local_up(&self) -> Vec3 {
        self.local_up
    }

    /// Direction of increasing `x`.
    pub fn axis_a(&self) -> Vec3 {
        self.axis_a
    }

    /// Direction of increasing `y`.
    pub fn axis_b(&self) -> Vec3 {
        self.axis_b
    }

    /// `resolution²`.
    pub fn vertex_count(&self) -> usize {
        let n = self.resolution as usize;
        n * n
    }

    /// `(resolution - 1)² * 6`.
    pub fn index_count(&self) -> usize {
        let cells = (self.resolution - 1) as usize;
        cells * cells * 6
    }

    /// Row-major vertex index of grid point `(x, y)`.
    #[inline]
    pub fn vertex_index(&self, x: u32, y: u32) -> usize {
        (x + y * self.resolution) as usize
    }

    /// Fraction of the way across the face, each component in `[0, 1]`.
    #[inline]
    pub fn percent(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(x as f32, y as f32) / (self.resolution - 1) as f32
    }

    /// Grid point `(x, y)` on the surface of the `[-1, 1]` cube.
    #[inline]
    pub fn point_on_unit_cube(&self, x: u32, y: u32) -> Vec3 {
        let percent = self.percent(x, y);
        self.local_up
            + (percent.x - 0.5) * 2.0 * self.axis_a
            + (percent.y - 0.5) * 2.0 * self.axis_b
    }

    /// Grid point `(x, y)` projected onto the unit sphere.
    #[inline]
    pub fn point_on_unit_sphere(&self, x: u32, y: u32) -> Vec3 {
        self.point_on_unit_cube(x, y).normalize()
    }

    /// Every grid coordinate in vertex-index order (`x` fastest).
    pub fn coords(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let n = self.resolution;
        (0..n).flat_map(move |y| (0..n).map(move |x| (x, y)))
    }

    /// Whether `(x, y)` lies on the border of the face.
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        let last = self.resolution - 1;
        x == 0 || y == 0 || x == last || y == last
    }

    /// Two triangles per interior cell, wound so that their normals face
    /// away from the sphere center.
    ///
    /// For vertex `v` at the cell's first corner the triangles are
    /// `(v, v + n + 1, v + n)` and `(v, v + 1, v + n + 1)`.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let n = self.resolution;
        let mut indices = Vec::with_capacity(self.index_count());
        for y in 0..n - 1 {
            for x in 0..n - 1 {
                let v = x + y * n;
                indices.extend_from_slice(&[v, v + n + 1, v + n]);
                indices.extend_from_slice(&[v, v + 1, v + n + 1]);
            }
        }
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CubeFace;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_resolution_bounds() {
        assert_eq!(
            FaceGrid::new(1, Vec3::Y),
            Err(FaceGridError::ResolutionOutOfRange(1))
        );
        assert_eq!(
            FaceGrid::new(256, Vec3::Y),
            Err(FaceGridError::ResolutionOutOfRange(256))
        );
        assert!(FaceGrid::new(2, Vec3::Y).is_ok());
        assert!(FaceGrid::new(255, Vec3::Y).is_ok());
    }

    #[test]
    fn test_counts() {
        let grid = FaceGrid::new(10, Vec3::X).unwrap();
        assert_eq!(grid.vertex_count(), 100);
        assert_eq!(grid.index_count(), 486);
        assert_eq!(grid.triangle_indices().len(), 486);
        assert_eq!(grid.coords().count(), 100);
    }

    #[test]
    fn test_coords_match_vertex_index() {
        let grid = FaceGrid::new(7, Vec3::Z).unwrap();
        for (i, (x, y)) in grid.coords().enumerate() {
            assert_eq!(grid.vertex_index(x, y), i);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let grid = FaceGrid::new(12, Vec3::NEG_Y).unwrap();
        let n = grid.vertex_count() as u32;
        assert!(grid.triangle_indices().iter().all(|&i| i < n));
    }

    #[test]
    fn test_face_center_maps_to_local_up() {
        for face in CubeFace::ALL {
            let grid = FaceGrid::new(5, face.local_up()).unwrap();
            let center = grid.point_on_unit_sphere(2, 2);
            assert!(
                (center - face.local_up()).length() < EPSILON,
                "center of {face:?} maps to {center:?}"
            );
        }
    }

    #[test]
    fn test_corners_on_cube_and_sphere() {
        for face in CubeFace::ALL {
            let grid = FaceGrid::new(9, face.local_up()).unwrap();
            for (x, y) in [(0, 0), (8, 0), (0, 8), (8, 8)] {
                let cube = grid.point_on_unit_cube(x, y);
                assert!(
                    (cube.abs().max_element() - 1.0).abs() < EPSILON,
                    "cube corner of {face:?} not on the cube: {cube:?}"
                );
                assert!((cube.abs() - Vec3::ONE).length() < EPSILON);
                let sphere = grid.point_on_unit_sphere(x, y);
                assert!((sphere.length() - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        for face in CubeFace::ALL {
            let grid = FaceGrid::new(6, face.local_up()).unwrap();
            let points: Vec<Vec3> = grid
                .coords()
                .map(|(x, y)| grid.point_on_unit_sphere(x, y))
                .collect();
            for tri in grid.triangle_indices().chunks_exact(3) {
                let (a, b, c) = (
                    points[tri[0] as usize],
                    points[tri[1] as usize],
                    points[tri[2] as usize],
                );
                let normal = (b - a).cross(c - a);
                let centroid = (a + b + c) / 3.0;
                assert!(
                    normal.dot(centroid) > 0.0,
                    "triangle {tri:?} on {face:?} faces inward"
                );
            }
        }
    }

    #[test]
    fn test_edges_shared_between_faces() {
        let res = 11;
        let edges: Vec<(CubeFace, Vec3)> = CubeFace::ALL
            .iter()
            .flat_map(|&face| {
                let grid = FaceGrid::new(res, face.local_up()).unwrap();
                grid.coords()
                    .filter(|&(x, y)| grid.is_edge(x, y))
                    .map(|(x, y)| (face, grid.point_on_unit_sphere(x, y)))
                    .collect::<Vec<_>>()
            })
            .collect();

        for &(face, p) in &edges {
            let nearest = edges
                .iter()
                .filter(|(other, _)| *other != face)
                .map(|(_, q)| (p - *q).length())
                .fold(f32::INFINITY, f32::min);
            assert!(
                nearest < 1e-4,
                "edge point {p:?} of {face:?} has no partner (nearest {nearest})"
            );
        }
    }
}
