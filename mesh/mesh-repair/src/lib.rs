//! Mesh cleanup for the STL → OBJ converter.
//!
//! This crate provides:
//! - A fixed, best-effort cleanup sequence ([`MeshCleaner`])
//!   - Finite-value filter
//!   - Degenerate face removal
//!   - Duplicate face removal (winding-insensitive)
//!   - Unreferenced vertex removal
//!   - Area-weighted vertex normal recomputation
//! - Vertex merging by spatial hashing ([`merge_vertices`])
//!
//! The `serde` feature derives `Serialize`/`Deserialize` on [`PassStrategy`]
//! and [`CleanupPolicy`] (kebab-case).
//!
//! Each pass is available in two interchangeable implementations selected by
//! [`PassStrategy`]: [`indexed`] (hash sets, in-place `retain`) and
//! [`explicit`] (masks and remap tables). Both produce identical meshes.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Vertex};
//! use mesh_repair::{merge_vertices, MeshCleaner, DEFAULT_MERGE_TOLERANCE};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0)); // Duplicate of vertex 1
//! mesh.faces.push([0, 1, 2]);
//! mesh.faces.push([0, 3, 2]);
//!
//! let (merged, removed) = merge_vertices(&mesh, DEFAULT_MERGE_TOLERANCE);
//! assert_eq!(removed, 1);
//!
//! let (clean, report) = MeshCleaner::default().clean(&merged).unwrap();
//! assert_eq!(clean.faces.len(), 1);
//! println!("{report}");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cleaner;
mod error;
pub mod explicit;
pub mod indexed;
mod pass;
mod weld;

pub use cleaner::{CleanupPolicy, CleanupReport, MeshCleaner, PassRecord};
pub use error::{RepairError, RepairResult};
pub use pass::{
    CleanupPass, PassOutcome, PassStrategy, DEGENERATE_FACES, DUPLICATE_FACES, FINITE_FILTER,
    UNREFERENCED_VERTICES, VERTEX_NORMALS,
};
pub use weld::{merge_vertices, DEFAULT_MERGE_TOLERANCE};
