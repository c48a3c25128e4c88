//! Direct factorization backends for symmetric positive definite systems.
//!
//! Every backend implements [`DirectSolver`](DirectSolver) and declares which
//! triangle of the symmetric matrix it expects through
//! `required_matrix_shape`.  Backends are constructed by name from the
//! `direct_solve_method` field of [`SystemSettings`](crate::solver::SystemSettings).

#![allow(non_snake_case)]

use crate::algebra::*;
use crate::ldl::LdlError;
use thiserror::Error;

pub(crate) mod auto;
pub(crate) mod config;
pub mod ldl;

#[cfg(feature = "faer-sparse")]
pub mod dense;
#[cfg(feature = "faer-sparse")]
pub mod faer_llt;

#[cfg(any(feature = "pardiso-panua", feature = "pardiso-mkl"))]
pub mod pardiso;

pub use ldl::LdlDirectSolver;

#[cfg(feature = "faer-sparse")]
pub use dense::DenseDirectSolver;
#[cfg(feature = "faer-sparse")]
pub use faer_llt::FaerDirectSolver;

/// Error type returned by direct solver factorizations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactorizationError {
    /// pivot failure.  `column` is the failing column of the unpermuted matrix
    /// when the backend reports it.
    #[error("Matrix is not positive definite{}", column_suffix(.column))]
    NotPositiveDefinite { column: Option<usize> },
    #[error("Matrix dimension fields are incompatible")]
    IncompatibleDimension,
    #[error("Matrix is not in the triangular form required by the solver")]
    NotTriangular,
    #[error("Fill reducing ordering failed")]
    Ordering,
    #[error("Linear solver backend failure: {0}")]
    Backend(String),
}

fn column_suffix(column: &Option<usize>) -> String {
    match column {
        Some(c) => format!(" (non-positive pivot in column {c})"),
        None => String::new(),
    }
}

impl From<LdlError> for FactorizationError {
    fn from(e: LdlError) -> Self {
        match e {
            LdlError::NotPositiveDefinite { column } => Self::NotPositiveDefinite {
                column: Some(column),
            },
            LdlError::IncompatibleDimension => Self::IncompatibleDimension,
            LdlError::NotUpperTriangular => Self::NotTriangular,
            LdlError::InvalidPermutation | LdlError::OrderingFailed => Self::Ordering,
        }
    }
}

/// Summary of the linear solver used for a solve
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LinearSolverInfo {
    /// backend name, as accepted by `direct_solve_method`
    pub name: String,
    /// number of threads reported by the backend (0 if unknown)
    pub threads: usize,
    /// always true for the backends in this crate
    pub direct: bool,
    /// nonzeros in the factored triangle
    pub nnzA: usize,
    /// nonzeros in the factor (0 if not reported)
    pub nnzL: usize,
}

/// A direct factorization of a symmetric positive definite matrix
pub trait DirectSolver<T: FloatT> {
    /// Factor `A`, which holds one triangle of the symmetric matrix
    /// in the shape given by `required_matrix_shape`.
    fn factor(&mut self, A: &CscMatrix<T>) -> Result<(), FactorizationError>;

    /// Solve `Ax = b` using the most recent factorization
    fn solve(&mut self, x: &mut [T], b: &[T]) -> Result<(), FactorizationError>;

    fn linear_solver_info(&self) -> LinearSolverInfo;

    fn required_matrix_shape() -> MatrixTriangle
    where
        Self: Sized;
}

pub type BoxedDirectSolver<T> = Box<dyn DirectSolver<T>>;

// sanity check that a matrix handed to a backend is square and
// holds only the triangle the backend asked for
pub(crate) fn check_matrix_shape<T: FloatT>(
    A: &CscMatrix<T>,
    shape: MatrixTriangle,
) -> Result<(), FactorizationError> {
    if !A.is_square() {
        return Err(FactorizationError::IncompatibleDimension);
    }
    let ok = match shape {
        MatrixTriangle::Triu => A.is_triu(),
        MatrixTriangle::Tril => A.is_tril(),
    };
    if !ok {
        return Err(FactorizationError::NotTriangular);
    }
    Ok(())
}
