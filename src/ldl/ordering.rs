#![allow(non_snake_case)]

use super::LdlError;
use crate::algebra::*;
use std::cmp::{max, min};
use std::iter::zip;

/// AMD fill-reducing ordering of a symmetric matrix stored as one of its
/// triangles.  Returns the permutation, its inverse and the AMD statistics.
pub(crate) fn amd_order<T: FloatT>(
    A: &CscMatrix<T>,
    amd_dense_scale: f64,
) -> Result<(Vec<usize>, Vec<usize>, amd::Info), LdlError> {
    // amd requires a structurally full diagonal
    check_diagonal(A)?;
    let mut control = amd::Control::default();
    control.dense *= amd_dense_scale;
    amd::order(A.nrows(), &A.colptr, &A.rowval, &control).map_err(|_| LdlError::OrderingFailed)
}

/// Checks that every diagonal entry of a square matrix is structurally
/// present.  A missing diagonal is a zero pivot, so the first such column
/// is reported as not positive definite.
pub(crate) fn check_diagonal<T>(A: &CscMatrix<T>) -> Result<(), LdlError> {
    for j in 0..A.ncols() {
        let rows = &A.rowval[A.colptr[j]..A.colptr[j + 1]];
        if !rows.contains(&j) {
            return Err(LdlError::NotPositiveDefinite { column: j });
        }
    }
    Ok(())
}

// Construct an inverse permutation from a permutation
pub(crate) fn invperm(p: &[usize]) -> Result<Vec<usize>, LdlError> {
    let mut b = vec![0; p.len()];
    let mut seen = vec![false; p.len()];

    for (i, &j) in p.iter().enumerate() {
        if j >= p.len() || seen[j] {
            return Err(LdlError::InvalidPermutation);
        }
        seen[j] = true;
        b[j] = i;
    }
    Ok(b)
}

// x = b[p]
pub(crate) fn permute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, x).for_each(|(p, x)| *x = b[*p]);
}

// x[p] = b
pub(crate) fn ipermute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, b).for_each(|(p, b)| x[*p] = *b);
}

// Given a symmetric matrix `A` stored as its upper triangle, return the
// upper triangle of PAPᵀ for the inverse permutation `iperm`.  Rows within
// each column of the result are not sorted.
// Following Davis, "Direct Methods for Sparse Linear Systems", cs_symperm.
pub(crate) fn permute_symmetric<T: FloatT>(A: &CscMatrix<T>, iperm: &[usize]) -> CscMatrix<T> {
    let n = A.ncols();
    let mut P = CscMatrix::<T>::spalloc((n, n), A.nnz());

    // count the entries landing in each column of P
    let mut count = vec![0; n];
    for colA in 0..n {
        for &rowA in &A.rowval[A.colptr[colA]..A.colptr[colA + 1]] {
            count[max(iperm[rowA], iperm[colA])] += 1;
        }
    }

    P.colptr[0] = 0;
    for k in 0..n {
        P.colptr[k + 1] = P.colptr[k] + count[k];
    }

    // reuse the counts as the next free slot in each column
    let next = &mut count;
    next.copy_from_slice(&P.colptr[0..n]);

    for colA in 0..n {
        let colP = iperm[colA];
        for ptr in A.colptr[colA]..A.colptr[colA + 1] {
            let rowP = iperm[A.rowval[ptr]];
            let col = max(colP, rowP);
            let dest = next[col];
            P.rowval[dest] = min(colP, rowP);
            P.nzval[dest] = A.nzval[ptr];
            next[col] += 1;
        }
    }
    P
}
