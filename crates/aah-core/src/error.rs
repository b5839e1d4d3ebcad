//! Error types for aah-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AahError {
    #[error("Invalid lattice dimensions {lx}x{ly}: both must be positive")]
    InvalidDimension { lx: usize, ly: usize },

    #[error("Non-finite matrix entry at ({row}, {col})")]
    NonFiniteMatrix { row: usize, col: usize },

    #[error("Symmetric eigendecomposition of a {dim}x{dim} matrix did not converge")]
    EigenDecomposition { dim: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AahError>;
