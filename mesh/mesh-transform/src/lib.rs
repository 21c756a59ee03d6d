//! Geometric normalization for the STL → OBJ converter.
//!
//! [`TransformPipeline`] applies, in this fixed order:
//! 1. Y/Z axis swap
//! 2. Per-axis sign flips
//! 3. Uniform scale
//! 4. Centering of the bounding box midpoint on the origin
//!
//! # Example
//!
//! ```
//! use mesh_transform::{NormalizeParams, TransformPipeline};
//! use mesh_types::{IndexedMesh, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(10.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 10.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! // Millimetres to metres, Z up
//! let params = NormalizeParams::default().with_swap_yz(true).with_scale(0.001);
//! let pipeline = TransformPipeline::new(params).unwrap();
//! let transformed = pipeline.apply(&mesh);
//! assert!((transformed.vertices[2].position.z - 0.01).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod pipeline;

pub use error::{TransformError, TransformResult};
pub use pipeline::{NormalizeParams, TransformPipeline};
