#![allow(non_snake_case)]

use crate::algebra::{FloatT, MatrixTriangle, ShapedMatrix, SparseFormatError};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// This is the compressed form handed to the direct solvers.  Systems
/// under construction live in an [`AssemblyMatrix`](crate::algebra::AssemblyMatrix)
/// instead, which is compressed into a `CscMatrix` at solve time.
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [4.  1.  0.]
///     [1.  3.  0.]
///     [0.  0.  2.]
/// ```
///
/// ```no_run
/// use femsolve::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                          // m
///    3,                          // n
///    vec![0, 2, 4, 5],           // colptr
///    vec![0, 1, 0, 1, 2],        // rowval
///    vec![4., 1., 1., 3., 2.],   // nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
/// ```
///
#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// Ths field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.
    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    pub fn spalloc(size: (usize, usize), nnz: usize) -> Self {
        let (m, n) = size;
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Sparse matrix of zeros of the given size, with no structural entries
    pub fn zeros(size: (usize, usize)) -> Self {
        Self::spalloc(size, 0)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// True if the matrix has no structural entries below the diagonal
    pub fn is_triu(&self) -> bool {
        self.is_triangle(MatrixTriangle::Triu)
    }

    /// True if the matrix has no structural entries above the diagonal
    pub fn is_tril(&self) -> bool {
        self.is_triangle(MatrixTriangle::Tril)
    }

    fn is_triangle(&self, shape: MatrixTriangle) -> bool {
        // check for any structural entries on the wrong side,
        // regardless of the values that may be assigned to them
        (0..self.ncols()).all(|col| {
            let rows = &self.rowval[self.colptr[col]..self.colptr[col + 1]];
            match shape {
                MatrixTriangle::Triu => rows.iter().all(|&row| row <= col),
                MatrixTriangle::Tril => rows.iter().all(|&row| row >= col),
            }
        })
    }

    /// Allocates a new matrix that is the transpose of this one.  Rows
    /// within each column of the result are in increasing order.
    pub fn transpose(&self) -> Self {
        let (m, n) = (self.m, self.n);
        let nnz = self.nnz();

        //count entries in each row of self, i.e. each column of the result
        let mut colptr = vec![0; m + 1];
        for &row in &self.rowval[0..nnz] {
            colptr[row + 1] += 1;
        }
        for i in 0..m {
            colptr[i + 1] += colptr[i];
        }

        let mut next = colptr[0..m].to_vec();
        let mut rowval = vec![0; nnz];
        let mut nzval = vec![T::zero(); nnz];

        for col in 0..n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                let row = self.rowval[ptr];
                let dest = next[row];
                rowval[dest] = col;
                nzval[dest] = self.nzval[ptr];
                next[row] += 1;
            }
        }
        CscMatrix::new(n, m, colptr, rowval, nzval)
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.nrows() && col < self.ncols());

        let first = self.colptr[col];
        let last = self.colptr[col + 1];
        let rows_in_this_column = &self.rowval[first..last];
        match rows_in_this_column.binary_search(&row) {
            Ok(idx) => Some(self.nzval[first + idx]),
            Err(_) => None,
        }
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}
