#![allow(non_snake_case)]

use crate::algebra::*;

pub(crate) const NO_PARENT: usize = usize::MAX;

// Elimination tree of an upper triangular matrix, plus the number of
// nonzeros in each column of the strictly lower triangular factor L.
// Row indices within each column of A need not be sorted.
pub(crate) fn elimination_tree<T: FloatT>(A: &CscMatrix<T>, parent: &mut [usize], Lnz: &mut [usize]) {
    let n = A.ncols();
    let mut visited = vec![0; n];

    parent.fill(NO_PARENT);
    Lnz.fill(0);

    for j in 0..n {
        visited[j] = j;
        for &row in &A.rowval[A.colptr[j]..A.colptr[j + 1]] {
            // climb from each entry above the diagonal to the first
            // ancestor already reached while processing column j
            let mut i = row;
            while visited[i] != j {
                if parent[i] == NO_PARENT {
                    parent[i] = j;
                }
                Lnz[i] += 1;
                visited[i] = j;
                i = parent[i];
            }
        }
    }
}

// Up-looking numeric factorization.  Row k of L is the solution of a
// sparse triangular system whose nonzero pattern is the union of the
// elimination tree paths from the entries in column k of A.
//
// Returns Err(k) if the k^th pivot does not exceed `pivot_tol`.  NaN
// pivots are rejected as well.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn factor_numeric<T: FloatT>(
    A: &CscMatrix<T>,
    parent: &[usize],
    Lnz: &[usize],
    L: &mut CscMatrix<T>,
    D: &mut [T],
    Dinv: &mut [T],
    pivot_tol: T,
) -> Result<(), usize> {
    let n = A.ncols();

    // column pointers of L are the cumulative column counts
    L.colptr[0] = 0;
    for k in 0..n {
        L.colptr[k + 1] = L.colptr[k] + Lnz[k];
    }

    // next free slot in each column of L
    let mut next = L.colptr[0..n].to_vec();

    // dense accumulator for the current row of L and its pattern
    let mut y = vec![T::zero(); n];
    let mut marked = vec![false; n];
    let mut pattern = Vec::<usize>::with_capacity(n);
    let mut path = Vec::with_capacity(n);

    for k in 0..n {
        pattern.clear();
        D[k] = T::zero();

        for p in A.colptr[k]..A.colptr[k + 1] {
            let i = A.rowval[p];
            if i == k {
                D[k] = A.nzval[p];
                continue;
            }
            y[i] = A.nzval[p];

            // walk up the tree until we hit a node already in
            // the pattern, then append the path in reverse order
            let mut node = i;
            path.clear();
            while node != NO_PARENT && node < k && !marked[node] {
                marked[node] = true;
                path.push(node);
                node = parent[node];
            }
            pattern.extend(path.iter().rev());
        }

        // eliminate in topological order
        for &j in pattern.iter().rev() {
            let yj = y[j];
            for p in L.colptr[j]..next[j] {
                y[L.rowval[p]] -= L.nzval[p] * yj;
            }

            let Lkj = yj * Dinv[j];
            D[k] -= yj * Lkj;

            L.rowval[next[j]] = k;
            L.nzval[next[j]] = Lkj;
            next[j] += 1;

            y[j] = T::zero();
            marked[j] = false;
        }

        if !(D[k] > pivot_tol) {
            return Err(k);
        }
        Dinv[k] = T::recip(D[k]);
    }

    Ok(())
}

// Solves (L+I)x = b, with x replacing b
pub(crate) fn lsolve<T: FloatT>(L: &CscMatrix<T>, x: &mut [T]) {
    for i in 0..x.len() {
        let xi = x[i];
        for p in L.colptr[i]..L.colptr[i + 1] {
            x[L.rowval[p]] -= L.nzval[p] * xi;
        }
    }
}

// Solves (L+I)ᵀx = b, with x replacing b
pub(crate) fn ltsolve<T: FloatT>(L: &CscMatrix<T>, x: &mut [T]) {
    for i in (0..x.len()).rev() {
        let mut s = T::zero();
        for p in L.colptr[i]..L.colptr[i + 1] {
            s += L.nzval[p] * x[L.rowval[p]];
        }
        x[i] -= s;
    }
}
