//! Read-only views shared by mesh consumers.

use crate::Aabb;

/// Element counts of a triangle mesh.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangles.
    fn face_count(&self) -> usize;

    /// A mesh with no vertices or no faces has nothing to export.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }
}

/// Bounding box of a mesh's vertex positions.
pub trait MeshBounds {
    /// Box around every vertex; [`Aabb::empty`] when there are none.
    fn bounds(&self) -> Aabb;

    /// Like [`MeshBounds::bounds`], with `None` in place of an empty box.
    fn bounds_opt(&self) -> Option<Aabb> {
        Some(self.bounds()).filter(|b| !b.is_empty())
    }
}
