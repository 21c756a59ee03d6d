//! Error types for conversion, naming and configuration.

use std::path::PathBuf;

use mesh_io::{ExportError, LoadError};
use mesh_repair::RepairError;
use mesh_transform::TransformError;
use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while computing output paths.
#[derive(Debug, Error)]
pub enum NamingError {
    /// Custom naming was selected with a blank name.
    #[error("custom name selected but no name provided")]
    EmptyCustomName,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Scale factor is zero, negative, or not finite.
    #[error("invalid scale factor {factor}: must be positive and finite")]
    InvalidScale {
        /// The rejected factor.
        factor: f64,
    },

    /// Merge tolerance is negative or not finite.
    #[error("invalid merge tolerance {tolerance}: must be finite and non-negative")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },

    /// Unknown scale preset name.
    #[error("unknown scale preset '{name}' (expected mm-to-m, cm-to-m, m-to-mm or inch-to-mm)")]
    UnknownPreset {
        /// The name that did not match.
        name: String,
    },
}

/// Any failure while converting one job.
///
/// Messages are passed through from the wrapped error unchanged.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Loading the STL failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Writing the OBJ failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Output naming failed.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// A cleanup pass failed under the strict policy.
    #[error(transparent)]
    Repair(#[from] RepairError),

    /// The transform could not be built.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The options are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The job panicked; the payload text is kept when it is a string.
    #[error("conversion panicked: {message}")]
    Panicked {
        /// Panic payload text.
        message: String,
    },
}
