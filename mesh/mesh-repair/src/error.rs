//! Error types for mesh cleanup operations.

use thiserror::Error;

/// Result type for cleanup operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur during mesh cleanup.
#[derive(Debug, Error)]
pub enum RepairError {
    /// Mesh has no faces, so there is nothing for the pass to work on.
    #[error("mesh has no faces")]
    NoFaces,

    /// Mesh has invalid indices.
    #[error("invalid vertex index {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// The invalid index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A cleanup pass failed while running under the strict policy.
    #[error("cleanup pass '{pass}' failed: {source}")]
    PassFailed {
        /// Name of the pass that failed.
        pass: &'static str,
        /// What went wrong inside the pass.
        #[source]
        source: Box<RepairError>,
    },
}

impl RepairError {
    /// Wrap a pass error with the name of the pass that raised it.
    #[must_use]
    pub fn pass_failed(pass: &'static str, source: Self) -> Self {
        Self::PassFailed {
            pass,
            source: Box::new(source),
        }
    }
}

/// Fail with [`RepairError::InvalidIndex`] if any face points past the vertex array.
pub(crate) fn check_indices(mesh: &mesh_types::IndexedMesh) -> RepairResult<()> {
    match mesh.first_invalid_index() {
        Some(index) => Err(RepairError::InvalidIndex {
            index,
            vertex_count: mesh.vertices.len(),
        }),
        None => Ok(()),
    }
}
