//! Simplicial LDLᵀ factorization of sparse symmetric positive definite matrices.
//!
//! The factorization is computed with an up-looking algorithm on the
//! upper triangle of a symmetrically permuted matrix `PAPᵀ`.  The
//! permutation is a fill-reducing approximate minimum degree ordering
//! from the [`amd`] crate unless one is supplied by the caller.
//!
//! Every pivot `D[k]` is required to exceed a tolerance (zero by default),
//! so a successful factorization certifies that the matrix is positive
//! definite and the factors are equivalent to a Cholesky factorization
//! `A = (L√D)(L√D)ᵀ`.  No dynamic regularization is applied.

#![allow(non_snake_case)]

use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

mod factor;
mod ordering;
use factor::*;
pub(crate) use ordering::*;

/// Error codes returnable from [`LdlFactorisation`](LdlFactorisation) factor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LdlError {
    #[error("Matrix dimension fields are incompatible")]
    IncompatibleDimension,
    #[error("Matrix is not upper triangular")]
    NotUpperTriangular,
    /// pivot failure, reported against the column index of the unpermuted matrix
    #[error("Matrix is not positive definite (non-positive pivot in column {column})")]
    NotPositiveDefinite { column: usize },
    #[error("Invalid permutation vector")]
    InvalidPermutation,
    #[error("AMD ordering failed")]
    OrderingFailed,
}

/// Settings for [`LdlFactorisation`](LdlFactorisation)
#[derive(Builder, Debug, Clone)]
pub struct LdlSettings<T: FloatT> {
    /// scaling of the AMD dense row threshold
    #[builder(default = "1.5")]
    pub amd_dense_scale: f64,
    /// user supplied fill-reducing permutation.  AMD is used if `None`.
    #[builder(default = "None", setter(strip_option))]
    pub perm: Option<Vec<usize>>,
    /// pivots must be strictly larger than this value
    #[builder(default = "T::zero()")]
    pub pivot_tol: T,
}

impl<T> Default for LdlSettings<T>
where
    T: FloatT,
{
    fn default() -> LdlSettings<T> {
        LdlSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Performs $LDL^T$ factorization of a symmetric positive definite matrix
#[derive(Debug)]
pub struct LdlFactorisation<T = f64> {
    /// permutation vector
    pub perm: Vec<usize>,
    /// strictly lower triangular factor (unit diagonal implied)
    pub L: CscMatrix<T>,
    /// D and its inverse for PAPᵀ = LDLᵀ
    pub D: Vec<T>,
    pub Dinv: Vec<T>,
    // permuted rhs workspace for solves
    fwork: Vec<T>,
}

impl<T> LdlFactorisation<T>
where
    T: FloatT,
{
    /// Factor the upper triangular matrix `A`, which holds the upper
    /// triangle of a symmetric matrix.
    pub fn new(A: &CscMatrix<T>, opts: Option<LdlSettings<T>>) -> Result<Self, LdlError> {
        check_structure(A)?;
        check_diagonal(A)?;
        let opts = opts.unwrap_or_default();
        let n = A.nrows();

        let (perm, iperm) = match opts.perm {
            Some(perm) => {
                let iperm = invperm(&perm)?;
                (perm, iperm)
            }
            None if n == 0 => (Vec::new(), Vec::new()),
            None => {
                let (perm, iperm, _info) = amd_order(A, opts.amd_dense_scale)?;
                (perm, iperm)
            }
        };

        let PAPt = permute_symmetric(A, &iperm);

        let mut etree = vec![NO_PARENT; n];
        let mut Lnz = vec![0; n];
        elimination_tree(&PAPt, &mut etree, &mut Lnz);

        let mut L = CscMatrix::spalloc((n, n), Lnz.iter().sum());
        let mut D = vec![T::zero(); n];
        let mut Dinv = vec![T::zero(); n];

        factor_numeric(&PAPt, &etree, &Lnz, &mut L, &mut D, &mut Dinv, opts.pivot_tol)
            .map_err(|k| LdlError::NotPositiveDefinite { column: perm[k] })?;

        Ok(Self {
            perm,
            L,
            D,
            Dinv,
            fwork: vec![T::zero(); n],
        })
    }

    /// Dimension of the factored matrix
    pub fn dim(&self) -> usize {
        self.D.len()
    }

    /// number of nonzeros in the strictly lower triangular factor
    pub fn nnz_l(&self) -> usize {
        self.L.nnz()
    }

    /// Solves Ax = b using the LDLᵀ factors of A.
    /// Solves in place (x replaces b)
    pub fn solve(&mut self, b: &mut [T]) {
        assert_eq!(b.len(), self.dim());

        let tmp = &mut self.fwork;
        permute(tmp, b, &self.perm);

        lsolve(&self.L, tmp);
        tmp.iter_mut().zip(&self.Dinv).for_each(|(x, d)| *x *= *d);
        ltsolve(&self.L, tmp);

        ipermute(b, tmp, &self.perm);
    }
}

fn check_structure<T: FloatT>(A: &CscMatrix<T>) -> Result<(), LdlError> {
    if !A.is_square() {
        return Err(LdlError::IncompatibleDimension);
    }
    if !A.is_triu() {
        return Err(LdlError::NotUpperTriangular);
    }
    Ok(())
}

//configure tests of internals
#[path = "test.rs"]
#[cfg(test)]
mod test;
