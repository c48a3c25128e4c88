#![allow(non_snake_case)]

use crate::algebra::*;

/// Symmetric view of a square matrix stored as one triangle
pub struct Symmetric<'a, M> {
    pub src: &'a M,
}

impl<T: FloatT> CscMatrix<T> {
    /// symmetric view.  Only one triangle of `self` should be populated.
    pub fn sym(&self) -> Symmetric<'_, Self> {
        debug_assert!(self.is_triu() || self.is_tril());
        Symmetric { src: self }
    }
}

/// Symmetric matrix-vector multiplication
pub trait SymMatrixVectorMultiply {
    type T;
    /// `y = a*self*x + b*y`, with `self` expanded from its stored triangle
    fn symv(&self, y: &mut [Self::T], x: &[Self::T], a: Self::T, b: Self::T);
}

impl<T: FloatT> SymMatrixVectorMultiply for Symmetric<'_, CscMatrix<T>> {
    type T = T;

    fn symv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_symv(self.src, y, x, a, b);
    }
}

fn _csc_symv<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert!(A.n == A.m);
    assert!(x.len() == A.n);
    assert!(y.len() == A.n);

    y.scale(b);

    for (col, &xcol) in x.iter().enumerate() {
        for j in A.colptr[col]..A.colptr[col + 1] {
            let row = A.rowval[j];
            let Aij = A.nzval[j];
            y[row] += a * Aij * xcol;

            if row != col {
                //don't double up on the diagonal
                y[col] += a * Aij * x[row];
            }
        }
    }
}
