//! The cleanup pass interface and strategy selection.
//!
//! Every pass exists twice: once in [`crate::indexed`], built on hash sets and
//! in-place `retain`, and once in [`crate::explicit`], built on boolean masks
//! and prefix-sum remap tables. Both produce identical meshes; the strategy
//! is picked once when a [`MeshCleaner`](crate::MeshCleaner) is constructed.

use mesh_types::{IndexedMesh, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::RepairResult;
use crate::{explicit, indexed};

/// Pass name of the finite-value filter.
pub const FINITE_FILTER: &str = "finite-filter";
/// Pass name of degenerate-face removal.
pub const DEGENERATE_FACES: &str = "degenerate-faces";
/// Pass name of duplicate-face removal.
pub const DUPLICATE_FACES: &str = "duplicate-faces";
/// Pass name of unreferenced-vertex removal.
pub const UNREFERENCED_VERTICES: &str = "unreferenced-vertices";
/// Pass name of vertex normal recomputation.
pub const VERTEX_NORMALS: &str = "vertex-normals";

/// Result of running a single pass.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// The mesh after the pass.
    pub mesh: IndexedMesh,
    /// Whether the pass ran to completion.
    ///
    /// A pass that was skipped because it failed reports `false` and hands
    /// back its input unchanged.
    pub applied: bool,
    /// Number of elements removed (vertices or faces, depending on the pass).
    pub removed: usize,
}

impl PassOutcome {
    /// Outcome of a pass that completed.
    #[must_use]
    pub const fn applied(mesh: IndexedMesh, removed: usize) -> Self {
        Self {
            mesh,
            applied: true,
            removed,
        }
    }

    /// Outcome of a pass that was skipped; the mesh is passed through.
    #[must_use]
    pub const fn skipped(mesh: IndexedMesh) -> Self {
        Self {
            mesh,
            applied: false,
            removed: 0,
        }
    }
}

/// One step of the cleanup sequence.
///
/// A pass never mutates its input. It either returns a new mesh wrapped in a
/// [`PassOutcome`] or an error, in which case the cleaner decides whether to
/// skip it or fail.
pub trait CleanupPass: Send + Sync {
    /// Stable, kebab-case name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Run the pass on `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pass cannot operate on this mesh, for example
    /// when a face index is out of range.
    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome>;
}

/// Which family of pass implementations a cleaner uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "kebab-case"))]
pub enum PassStrategy {
    /// Hash-set and in-place strategies.
    #[default]
    Indexed,
    /// Mask and remap-table strategies.
    Explicit,
}

impl PassStrategy {
    /// Build the fixed pass sequence for this strategy.
    ///
    /// Order: finite filter, degenerate faces, duplicate faces, unreferenced
    /// vertices, vertex normals.
    #[must_use]
    pub fn passes(self) -> Vec<Box<dyn CleanupPass>> {
        match self {
            Self::Indexed => vec![
                Box::new(indexed::FiniteFilter),
                Box::new(indexed::DegenerateFaces),
                Box::new(indexed::DuplicateFaces),
                Box::new(indexed::UnreferencedVertices),
                Box::new(indexed::VertexNormals),
            ],
            Self::Explicit => vec![
                Box::new(explicit::FiniteFilter),
                Box::new(explicit::DegenerateFaces),
                Box::new(explicit::DuplicateFaces),
                Box::new(explicit::UnreferencedVertices),
                Box::new(explicit::VertexNormals),
            ],
        }
    }
}

/// Canonical form of a face for duplicate detection: indices sorted ascending.
#[inline]
pub(crate) fn canonical_face(face: [u32; 3]) -> [u32; 3] {
    let mut sorted = face;
    sorted.sort_unstable();
    sorted
}

/// Whether the three indices of a face are pairwise distinct.
#[inline]
pub(crate) fn is_proper_face([a, b, c]: [u32; 3]) -> bool {
    a != b && b != c && a != c
}

/// Twice-area normal of a face; summing these gives area-weighted normals.
#[inline]
pub(crate) fn area_vector(mesh: &IndexedMesh, [a, b, c]: [u32; 3]) -> Vector3<f64> {
    let v0 = &mesh.vertices[a as usize].position;
    let v1 = &mesh.vertices[b as usize].position;
    let v2 = &mesh.vertices[c as usize].position;
    (v1 - v0).cross(&(v2 - v0))
}

/// Unit-length normal, or the zero vector when the accumulated normal vanishes.
#[inline]
pub(crate) fn unit_or_zero(n: Vector3<f64>) -> Vector3<f64> {
    n.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}
