//! Vertex/face counts and bounding metrics.

use std::fmt;

use mesh_types::{Aabb, IndexedMesh, MeshBounds, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::format::{format_count, format_point, format_vector};

/// Read-only snapshot of a mesh's size.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_measure::MeshStats;
///
/// let stats = MeshStats::of(&unit_cube());
/// assert_eq!(stats.vertex_count, 8);
/// assert_eq!(stats.face_count, 12);
/// assert_eq!(stats.extents().unwrap().x, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MeshStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of faces.
    pub face_count: usize,
    /// Axis-aligned bounding box; `None` when the mesh has no vertices.
    pub bounds: Option<Aabb>,
}

impl MeshStats {
    /// Compute stats for a mesh.
    #[must_use]
    pub fn of(mesh: &IndexedMesh) -> Self {
        Self {
            vertex_count: mesh.vertices.len(),
            face_count: mesh.faces.len(),
            bounds: mesh.bounds_opt(),
        }
    }

    /// Bounding box minimum corner.
    #[must_use]
    pub fn min(&self) -> Option<Point3<f64>> {
        self.bounds.map(|b| b.min)
    }

    /// Bounding box maximum corner.
    #[must_use]
    pub fn max(&self) -> Option<Point3<f64>> {
        self.bounds.map(|b| b.max)
    }

    /// Per-axis extents (`max - min`).
    #[must_use]
    pub fn extents(&self) -> Option<Vector3<f64>> {
        self.bounds.map(|b| b.size())
    }
}

/// Compute stats for a mesh.
///
/// Equivalent to [`MeshStats::of`].
#[must_use]
pub fn mesh_stats(mesh: &IndexedMesh) -> MeshStats {
    MeshStats::of(mesh)
}

/// Renders the multi-line log block:
///
/// ```text
///   Verts: 1,234 | Faces: 2,464
///   Bounds min: (0.00, 0.00, 0.00)
///   Bounds max: (10.00, 5.00, 2.50)
///   Extents:   (10.00, 5.00, 2.50)
/// ```
///
/// Bounds and extents read `n/a` for a mesh without vertices.
impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  Verts: {} | Faces: {}",
            format_count(self.vertex_count),
            format_count(self.face_count)
        )?;
        match self.bounds {
            Some(b) => {
                writeln!(f, "  Bounds min: {}", format_point(&b.min))?;
                writeln!(f, "  Bounds max: {}", format_point(&b.max))?;
                write!(f, "  Extents:   {}", format_vector(&b.size()))
            }
            None => {
                writeln!(f, "  Bounds min: n/a")?;
                writeln!(f, "  Bounds max: n/a")?;
                write!(f, "  Extents:   n/a")
            }
        }
    }
}
