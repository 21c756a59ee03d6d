//! Mesh statistics for the STL → OBJ converter.
//!
//! [`MeshStats`] captures vertex and face counts plus the axis-aligned
//! bounding box and its extents. Its `Display` form is the per-file log
//! block: thousands separators on counts, two decimals on coordinates.
//!
//! # Example
//!
//! ```
//! use mesh_types::IndexedMesh;
//! use mesh_measure::mesh_stats;
//!
//! let mesh = IndexedMesh::from_raw(&[0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 5.0, 5.0, 0.0], &[0, 1, 2]);
//! let stats = mesh_stats(&mesh);
//! println!("{stats}");
//! ```
//!
//! # Features
//!
//! - `serde`: derive `Serialize` on [`MeshStats`] for JSON output.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod format;
mod stats;

pub use format::{format_count, format_point, format_triple, format_vector};
pub use stats::{mesh_stats, MeshStats};
