//! Mesh data model shared by every stage of the STL → OBJ pipeline.
//!
//! - [`IndexedMesh`] - vertex array plus `u32` index triples
//! - [`Vertex`] - `f64` position with an optional normal
//! - [`Aabb`] - axis-aligned bounds, used for centering and statistics
//!
//! Coordinates carry no units; STL has none. Unit conversion is a plain scale
//! factor applied by `mesh-transform`.
//!
//! A loaded mesh makes no promises about its contents. Once a `mesh-repair`
//! cleanup pass has run, every face index is in range.
//!
//! ```
//! use mesh_types::{unit_cube, MeshBounds, MeshTopology};
//!
//! let cube = unit_cube();
//! assert_eq!(cube.vertex_count(), 8);
//! assert_eq!(cube.face_count(), 12);
//! assert_eq!(cube.bounds().max_extent(), 1.0);
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod traits;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{unit_cube, IndexedMesh};
pub use traits::{MeshBounds, MeshTopology};
pub use vertex::{Vertex, VertexAttributes};

pub use nalgebra::{Point3, Vector3};
