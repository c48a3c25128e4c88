#![allow(non_snake_case)]
use super::{check_matrix_shape, DirectSolver, FactorizationError, LinearSolverInfo};
use crate::algebra::*;
use crate::ldl::*;
use crate::solver::SystemSettings;

/// Direct solver using the in-crate simplicial LDLᵀ factorization
pub struct LdlDirectSolver<T: FloatT> {
    opts: LdlSettings<T>,
    factors: Option<LdlFactorisation<T>>,
    nnzA: usize,
}

impl<T> LdlDirectSolver<T>
where
    T: FloatT,
{
    /// `perm` is an optional precomputed fill-reducing ordering.  AMD
    /// is used at factor time if none is given.
    pub fn new(settings: &SystemSettings<T>, perm: Option<Vec<usize>>) -> Self {
        let opts = LdlSettings {
            amd_dense_scale: settings.amd_dense_scale,
            perm,
            pivot_tol: settings.pivot_tol,
        };
        Self {
            opts,
            factors: None,
            nnzA: 0,
        }
    }
}

impl<T> DirectSolver<T> for LdlDirectSolver<T>
where
    T: FloatT,
{
    fn factor(&mut self, A: &CscMatrix<T>) -> Result<(), FactorizationError> {
        check_matrix_shape(A, Self::required_matrix_shape())?;

        // drop any old factors first, so that a failure leaves nothing behind
        self.factors = None;
        self.nnzA = A.nnz();
        self.factors = Some(LdlFactorisation::new(A, Some(self.opts.clone()))?);
        Ok(())
    }

    fn solve(&mut self, x: &mut [T], b: &[T]) -> Result<(), FactorizationError> {
        let Some(factors) = self.factors.as_mut() else {
            return Err(FactorizationError::Backend(
                "solve called without a factorization".to_string(),
            ));
        };
        // NB: LDL solves in place
        x.copy_from_slice(b);
        factors.solve(x);
        Ok(())
    }

    fn linear_solver_info(&self) -> LinearSolverInfo {
        LinearSolverInfo {
            name: "ldl".to_string(),
            threads: 1,
            direct: true,
            nnzA: self.nnzA,
            nnzL: self.factors.as_ref().map_or(0, |f| f.nnz_l()),
        }
    }

    fn required_matrix_shape() -> MatrixTriangle {
        MatrixTriangle::Triu
    }
}
