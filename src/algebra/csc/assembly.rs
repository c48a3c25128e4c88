#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, ShapedMatrix};
use itertools::izip;
use std::iter::repeat;

/// Square sparse matrix under assembly.
///
/// Storage is column oriented like [`CscMatrix`], except that each column
/// owns a block of reserved slots of which only a prefix is in use.  Rows
/// within the used prefix are kept sorted, so lookups are a binary search
/// and insertions only shift entries of a single column.  A column that
/// runs out of reserved slots doubles its capacity, which moves the slot
/// blocks of all later columns.
///
/// An entry becomes structural the first time it is written, and stays
/// structural even if its value returns to zero.  Reads never create
/// entries.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyMatrix<T = f64> {
    n: usize,
    // first slot of each column.  colstart[n] is the total slot count
    colstart: Vec<usize>,
    // number of slots in use in each column
    colnz: Vec<usize>,
    rowval: Vec<usize>,
    nzval: Vec<T>,
}

impl<T> AssemblyMatrix<T>
where
    T: FloatT,
{
    /// An `n x n` matrix with no structural entries and `reserve`
    /// slots per column.  Reservations larger than `n` are clamped.
    pub fn new(n: usize, reserve: usize) -> Self {
        let reserve = reserve.min(n);
        let colstart = (0..=n).map(|j| j * reserve).collect();
        let colnz = vec![0; n];
        let rowval = vec![0; n * reserve];
        let nzval = vec![T::zero(); n * reserve];

        Self {
            n,
            colstart,
            colnz,
            rowval,
            nzval,
        }
    }

    /// number of structural entries
    pub fn nnz(&self) -> usize {
        self.colnz.iter().sum()
    }

    /// number of reserved slots in column `col`
    pub fn capacity(&self, col: usize) -> usize {
        self.colstart[col + 1] - self.colstart[col]
    }

    /// Row indices of the structural entries in column `col`,
    /// in increasing order
    pub fn column_rows(&self, col: usize) -> &[usize] {
        let first = self.colstart[col];
        &self.rowval[first..first + self.colnz[col]]
    }

    /// The value at (row,col), or zero if the entry is not structural.
    pub fn get(&self, row: usize, col: usize) -> T {
        match self.find(row, col) {
            Ok(slot) => self.nzval[slot],
            Err(_) => T::zero(),
        }
    }

    /// The value at (row,col) as an Option.  Returns None if the entry
    /// is not structural.
    pub fn get_entry(&self, row: usize, col: usize) -> Option<T> {
        self.find(row, col).ok().map(|slot| self.nzval[slot])
    }

    /// Overwrite the entry (row,col), creating it if absent
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        *self.entry_mut(row, col) = value;
    }

    /// Accumulate into the entry (row,col), creating it if absent
    pub fn add(&mut self, row: usize, col: usize, value: T) {
        *self.entry_mut(row, col) += value;
    }

    /// Mutable reference to the entry at (row,col).  A new structural
    /// zero is inserted if the entry is absent.
    pub fn entry_mut(&mut self, row: usize, col: usize) -> &mut T {
        let slot = match self.find(row, col) {
            Ok(slot) => slot,
            Err(slot) => self.insert(row, col, slot),
        };
        &mut self.nzval[slot]
    }

    // Ok(slot) if (row,col) is structural, otherwise Err(slot) with
    // the slot at which it should be inserted to keep rows sorted
    fn find(&self, row: usize, col: usize) -> Result<usize, usize> {
        debug_assert!(row < self.n && col < self.n);
        let first = self.colstart[col];
        match self.column_rows(col).binary_search(&row) {
            Ok(idx) => Ok(first + idx),
            Err(idx) => Err(first + idx),
        }
    }

    fn insert(&mut self, row: usize, col: usize, slot: usize) -> usize {
        if self.colnz[col] == self.capacity(col) {
            // slot is relative to colstart[col], which doesn't
            // move when growing this column
            self.grow(col);
        }
        let last = self.colstart[col] + self.colnz[col];

        // shift the tail of this column up by one slot
        self.rowval.copy_within(slot..last, slot + 1);
        self.nzval.copy_within(slot..last, slot + 1);

        self.rowval[slot] = row;
        self.nzval[slot] = T::zero();
        self.colnz[col] += 1;
        slot
    }

    fn grow(&mut self, col: usize) {
        let extra = usize::max(self.capacity(col), 1);
        let at = self.colstart[col + 1];

        self.rowval.splice(at..at, repeat(0).take(extra));
        self.nzval.splice(at..at, repeat(T::zero()).take(extra));

        for start in &mut self.colstart[(col + 1)..] {
            *start += extra;
        }
    }

    /// The lower triangle (including the diagonal) as a [`CscMatrix`].
    pub fn lower_triangle(&self) -> CscMatrix<T> {
        self.compress(|row, col| row >= col)
    }

    /// The upper triangle of the symmetric matrix defined by the lower
    /// triangle of `self`.  Entries stored above the diagonal are ignored.
    pub fn lower_triangle_as_triu(&self) -> CscMatrix<T> {
        self.lower_triangle().transpose()
    }

    fn compress(&self, keep: impl Fn(usize, usize) -> bool) -> CscMatrix<T> {
        let mut colptr = Vec::with_capacity(self.n + 1);
        let mut rowval = Vec::with_capacity(self.nnz());
        let mut nzval = Vec::with_capacity(self.nnz());

        colptr.push(0);
        for (col, &start, &nz) in izip!(0..self.n, &self.colstart, &self.colnz) {
            let rows = &self.rowval[start..start + nz];
            let vals = &self.nzval[start..start + nz];
            for (&row, &val) in rows.iter().zip(vals) {
                if keep(row, col) {
                    rowval.push(row);
                    nzval.push(val);
                }
            }
            colptr.push(rowval.len());
        }
        CscMatrix::new(self.n, self.n, colptr, rowval, nzval)
    }
}

impl<T> ShapedMatrix for AssemblyMatrix<T> {
    fn nrows(&self) -> usize {
        self.n
    }
    fn ncols(&self) -> usize {
        self.n
    }
}
