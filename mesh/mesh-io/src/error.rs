//! Load and export errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for mesh export.
pub type ExportResult<T> = Result<T, ExportError>;

/// Why an STL file could not be turned into a mesh.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing exists at the given path.
    #[error("STL file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The bytes are not STL, or an ASCII record is malformed.
    #[error("malformed STL: {message}")]
    InvalidContent {
        /// What was wrong, with a line number where one is known.
        message: String,
    },

    /// A binary file ends before its 80-byte header and triangle count.
    #[error("binary STL header truncated: need {expected} bytes, file has {got}")]
    InvalidHeader {
        /// Bytes required for header plus count.
        expected: usize,
        /// Bytes present.
        got: usize,
    },

    /// The binary triangle count promises more triangles than the file holds.
    #[error("binary STL declares {expected} triangles but contains {got}")]
    InvalidFaceCount {
        /// Count from the header.
        expected: u32,
        /// Complete 50-byte records actually present.
        got: u32,
    },

    /// The file parsed as a multi-solid scene with no solids in it.
    #[error("STL loaded as a scene but contains no geometry")]
    NoGeometry,

    /// Every solid in the file is empty, so there is no triangle mesh to return.
    #[error("no mesh geometry found in the loaded file")]
    NotAMesh,

    /// Reading the file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An ASCII coordinate is not a number.
    #[error("bad STL coordinate: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl LoadError {
    /// Shorthand for [`LoadError::InvalidContent`].
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}

/// Errors that can occur while writing a mesh file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination's parent directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the output file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Create a `Write` error for the given destination.
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
