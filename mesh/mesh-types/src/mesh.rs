//! Indexed triangle meshes.

use crate::{Aabb, MeshBounds, MeshTopology, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Triangle mesh stored as a vertex array plus index triples.
///
/// Every pipeline stage reads one of these and returns a new one. Loaders
/// hand over raw data: faces may repeat, collapse to a line or point, or
/// refer to non-finite vertices, and indices are not range-checked until a
/// cleanup pass runs.
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology};
///
/// let tri = IndexedMesh::from_raw(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]);
/// assert_eq!((tri.vertex_count(), tri.face_count()), (3, 1));
/// assert_eq!(tri.first_invalid_index(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertices, in file order unless a pass has compacted them.
    pub vertices: Vec<Vertex>,
    /// Triangles as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// An empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// An empty mesh with room for the given element counts.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self::from_parts(
            Vec::with_capacity(vertex_count),
            Vec::with_capacity(face_count),
        )
    }

    /// Assemble a mesh from existing arrays.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Build a mesh from flat `[x, y, z, ...]` positions and `[a, b, c, ...]` indices.
    ///
    /// Yields an empty mesh when either slice is not a multiple of three long.
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }
        Self::from_parts(
            positions
                .chunks_exact(3)
                .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
                .collect(),
            indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
        )
    }

    /// Shift every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.vertices
            .iter_mut()
            .for_each(|v| v.position += offset);
    }

    /// True when the mesh has vertices and each one has a normal.
    #[must_use]
    pub fn has_vertex_normals(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.normal().is_some())
    }

    /// First face index, in face order, that points past the vertex array.
    #[must_use]
    pub fn first_invalid_index(&self) -> Option<u32> {
        let limit = self.vertices.len();
        self.faces
            .iter()
            .flatten()
            .copied()
            .find(|&i| i as usize >= limit)
    }

    /// Append `other`, shifting its face indices past this mesh's vertices.
    ///
    /// Used to flatten multi-solid STL files into one mesh.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: indices are u32, meshes past 4B vertices are not supported
    pub fn merge(&mut self, other: &Self) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|&f| f.map(|i| i + offset)));
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// Unit cube on `[0, 1]³`: 8 shared corners, 12 outward-wound triangles.
///
/// A convenient clean fixture for cleanup and export tests.
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    const CORNERS: [[f64; 3]; 8] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    #[rustfmt::skip]
    const FACES: [[u32; 3]; 12] = [
        [0, 2, 1], [0, 3, 2], // z = 0
        [4, 5, 6], [4, 6, 7], // z = 1
        [0, 1, 5], [0, 5, 4], // y = 0
        [3, 7, 6], [3, 6, 2], // y = 1
        [0, 4, 7], [0, 7, 3], // x = 0
        [1, 2, 6], [1, 6, 5], // x = 1
    ];

    IndexedMesh::from_parts(
        CORNERS.iter().map(|&c| Vertex::from(c)).collect(),
        FACES.to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn triangle_at(x: f64) -> IndexedMesh {
        IndexedMesh::from_raw(&[x, 0.0, 0.0, x + 1.0, 0.0, 0.0, x, 1.0, 0.0], &[0, 1, 2])
    }

    #[test]
    fn emptiness_needs_both_arrays() {
        let mut mesh = IndexedMesh::new();
        assert!(mesh.is_empty());

        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        assert!(mesh.is_empty());

        mesh.faces.push([0, 0, 0]);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn ragged_raw_input_gives_empty_mesh() {
        let mesh = IndexedMesh::from_raw(&[0.0, 1.0], &[0, 1, 2]);
        assert_eq!(mesh, IndexedMesh::new());
    }

    #[test]
    fn bounds_of_cube_and_empty_mesh() {
        let cube = unit_cube();
        let b = cube.bounds_opt().unwrap_or_default();
        assert_eq!(b.min, Point3::origin());
        assert_eq!(b.max, Point3::new(1.0, 1.0, 1.0));
        assert!(IndexedMesh::new().bounds_opt().is_none());
    }

    #[test]
    fn merge_offsets_indices() {
        let mut mesh = triangle_at(0.0);
        mesh.merge(&triangle_at(2.0));
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.vertices[3].position.x, 2.0);
    }

    #[test]
    fn invalid_index_is_found() {
        let mut mesh = unit_cube();
        assert_eq!(mesh.first_invalid_index(), None);

        mesh.faces.push([0, 1, 42]);
        assert_eq!(mesh.first_invalid_index(), Some(42));
    }

    #[test]
    fn normals_presence() {
        let mut mesh = unit_cube();
        assert!(!mesh.has_vertex_normals());

        mesh.vertices
            .iter_mut()
            .for_each(|v| v.attributes.normal = Some(Vector3::z()));
        assert!(mesh.has_vertex_normals());

        assert!(!IndexedMesh::new().has_vertex_normals());
    }

    #[test]
    fn translate_moves_every_vertex() {
        let mut mesh = unit_cube();
        mesh.translate(Vector3::new(1.0, 2.0, 3.0));
        let b = mesh.bounds();
        assert_eq!(b.min, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(b.max, Point3::new(2.0, 3.0, 4.0));
    }
}
