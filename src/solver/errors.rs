use super::directsolvers::FactorizationError;
use super::SettingsError;
use thiserror::Error;

/// Error type returned by [`LinearSystem`](crate::solver::LinearSystem) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SystemError {
    #[error("Index ({row}, {col}) is out of bounds for a {dim}x{dim} system")]
    IndexOutOfBounds { row: usize, col: usize, dim: usize },
    #[error("Index {index} is out of bounds for a system of size {dim}")]
    RhsIndexOutOfBounds { index: usize, dim: usize },
    #[error("Output buffer of length {len} is too small for a system of size {dim}")]
    OutputBufferTooSmall { len: usize, dim: usize },
    #[error("Factorization failed: {0}")]
    Factorization(#[from] FactorizationError),
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
}
