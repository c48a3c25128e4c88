#![allow(non_snake_case)]

use faer::linalg::solvers::{Llt, Solve};
use faer::{Mat, Side};

use super::{check_matrix_shape, DirectSolver, FactorizationError, LinearSolverInfo};
use crate::algebra::*;

/// Direct solver using the dense Cholesky (LLᵀ) factorization from faer.
/// Intended for small systems and as a reference for the sparse
/// backends.  Supports f64 only.
#[derive(Default)]
pub struct DenseDirectSolver {
    llt: Option<Llt<f64>>,
    n: usize,
    nnzA: usize,
}

impl DenseDirectSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DirectSolver<f64> for DenseDirectSolver {
    fn factor(&mut self, A: &CscMatrix<f64>) -> Result<(), FactorizationError> {
        check_matrix_shape(A, Self::required_matrix_shape())?;

        self.llt = None;
        self.n = A.n;
        self.nnzA = A.nnz();

        // scatter the lower triangle into a dense matrix.  Only the
        // lower triangle is read by the factorization.
        let mut M = Mat::<f64>::zeros(A.n, A.n);
        for col in 0..A.n {
            for p in A.colptr[col]..A.colptr[col + 1] {
                M[(A.rowval[p], col)] = A.nzval[p];
            }
        }

        // dense LLᵀ only fails on a non-positive pivot
        let llt = Llt::new(M.as_ref(), Side::Lower)
            .map_err(|_| FactorizationError::NotPositiveDefinite { column: None })?;

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
            name: "dense".to_string(),
            threads: 0,
            direct: true,
            nnzA: self.nnzA,
            nnzL: self.llt.as_ref().map_or(0, |_| self.n * (self.n + 1) / 2),
        }
    }

    fn required_matrix_shape() -> MatrixTriangle {
        MatrixTriangle::Tril
    }
}
