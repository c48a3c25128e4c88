#![allow(non_snake_case)]

use faer::linalg::solvers::Solve;
use faer::sparse::linalg::solvers::{Llt, SymbolicLlt};
use faer::sparse::linalg::LltError;
use faer::sparse::{SparseColMatRef, SymbolicSparseColMatRef};
use faer::{Mat, Side};

use super::{check_matrix_shape, DirectSolver, FactorizationError, LinearSolverInfo};
use crate::algebra::*;

/// Direct solver using the sparse Cholesky (LLᵀ) factorization from faer.
/// faer chooses between simplicial and supernodal factorization and
/// computes its own fill-reducing ordering.  Supports f64 only.
#[derive(Default)]
pub struct FaerDirectSolver {
    llt: Option<Llt<usize, f64>>,
    nnzA: usize,
}

impl FaerDirectSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DirectSolver<f64> for FaerDirectSolver {
    fn factor(&mut self, A: &CscMatrix<f64>) -> Result<(), FactorizationError> {
        check_matrix_shape(A, Self::required_matrix_shape())?;

        self.llt = None;
        self.nnzA = A.nnz();

        let symbA = SymbolicSparseColMatRef::new_checked(A.n, A.n, &A.colptr, None, &A.rowval);
        let matA = SparseColMatRef::new(symbA, &A.nzval);

        let symbolic = SymbolicLlt::try_new(symbA, Side::Lower)
            .map_err(|e| FactorizationError::Backend(format!("faer symbolic analysis: {e:?}")))?;

        let llt = Llt::try_new_with_symbolic(symbolic, matA, Side::Lower).map_err(|e| match e {
            LltError::Numeric(_) => FactorizationError::NotPositiveDefinite { column: None },
            _ => FactorizationError::Backend(format!("faer numeric factorization: {e:?}")),
        })?;

        self.llt = Some(llt);
        Ok(())
    }

    fn solve(&mut self, x: &mut [f64], b: &[f64]) -> Result<(), FactorizationError> {
        let Some(llt) = self.llt.as_ref() else {
            return Err(FactorizationError::Backend(
                "solve called without a factorization".to_string(),
            ));
        };
        let rhs = Mat::from_fn(b.len(), 1, |i, _| b[i]);
        let sol = llt.solve(&rhs);
        for (i, xi) in x.iter_mut().enumerate() {
            *xi = sol[(i, 0)];
        }
        Ok(())
    }

    fn linear_solver_info(&self) -> LinearSolverInfo {
        LinearSolverInfo {
            name: "faer".to_string(),
            threads: 0,
            direct: true,
            nnzA: self.nnzA,
            nnzL: 0,
        }
    }

    fn required_matrix_shape() -> MatrixTriangle {
        MatrixTriangle::Tril
    }
}
