//! STL input and Wavefront OBJ output for [`mesh_types::IndexedMesh`].
//!
//! Reading accepts binary and ASCII STL, including ASCII files with several
//! `solid … endsolid` blocks; [`load_stl`] flattens those into one mesh and
//! [`load_scene`] keeps them apart. Writing produces plain OBJ text with
//! 1-based face indices and, when every vertex has one, `vn` normals.
//!
//! ```no_run
//! use mesh_io::{load_stl, save_obj};
//!
//! let mesh = load_stl("bracket.stl")?;
//! save_obj(&mesh, "out/bracket.obj")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod obj;
mod stl;

pub use error::{ExportError, ExportResult, LoadError, LoadResult};
pub use obj::{save_obj, write_obj};
pub use stl::{load_scene, load_stl, read_stl, StlScene, StlSolid};

use std::path::Path;

/// Whether `path` names an STL file by extension, ignoring case.
///
/// Only the name is inspected; the file need not exist.
#[must_use]
pub fn is_stl_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"))
}
