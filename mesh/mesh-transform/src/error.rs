//! Error types for mesh transformation operations.

use thiserror::Error;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur while building a transform pipeline.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Scale factor is zero, negative, or not finite.
    #[error("invalid scale factor {factor}: must be positive and finite")]
    InvalidScale {
        /// The rejected factor.
        factor: f64,
    },
}
