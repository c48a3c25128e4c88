#![allow(non_snake_case)]

use super::directsolvers::auto::auto_select;
use super::directsolvers::config::DirectSolverConfiguration;
use super::*;
use crate::algebra::*;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::timers::*;
use std::borrow::Cow;

/// An owned N×N sparse symmetric system `Ax = b` under assembly.
///
/// Coefficients and right hand side values are written through indexed
/// set / accumulate operations and consumed by a single call to
/// [`solve`](LinearSystem::solve).  Every solve, successful or not,
/// leaves the system empty (size 0).  Settings survive the reset.
///
/// Indexed operations come in two forms.  The plain forms
/// ([`set_coefficient`](LinearSystem::set_coefficient) etc.) are for
/// callers that have already validated their indices and panic on an
/// out of range index.  The `try_` forms return a [`SystemError`] instead.
///
/// ```
/// use femsolve::solver::*;
///
/// let mut system = LinearSystem::<f64>::new(2, 2, SystemSettings::default());
/// system.set_coefficient(0, 0, 4.0);
/// system.set_coefficient(1, 0, 1.0);
/// system.set_coefficient(0, 1, 1.0);
/// system.set_coefficient(1, 1, 3.0);
/// system.set_rhs(0, 1.0);
/// system.set_rhs(1, 2.0);
///
/// let mut x = [0.0; 2];
/// let info = system.solve(&mut x).unwrap();
/// assert!(info.is_solved());
/// assert!((x[0] - 1.0 / 11.0).abs() < 1e-12);
/// assert!(system.is_empty());
/// ```
#[derive(Debug)]
pub struct LinearSystem<T: FloatT = f64> {
    A: AssemblyMatrix<T>,
    b: Vec<T>,
    settings: SystemSettings<T>,
    info: SolveInfo<T>,
    // Option so that it can be taken during a solve without
    // borrowing the rest of the system
    timers: Option<Timers>,
    stream: PrintTarget,
}

impl<T> Default for LinearSystem<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(0, 0, SystemSettings::default())
    }
}

impl<T> LinearSystem<T>
where
    T: FloatT,
{
    /// A `size x size` system with no structural entries, reserving
    /// `max_nonzero_per_row` slots in each column
    pub fn new(size: usize, max_nonzero_per_row: usize, settings: SystemSettings<T>) -> Self {
        Self {
            A: AssemblyMatrix::new(size, max_nonzero_per_row),
            b: vec![T::zero(); size],
            settings,
            info: SolveInfo::new(),
            timers: Some(Timers::default()),
            stream: PrintTarget::default(),
        }
    }

    /// Discards all matrix and right hand side data and resizes the
    /// system.  Settings and the print target are kept.
    pub fn init(&mut self, size: usize, max_nonzero_per_row: usize) {
        self.A = AssemblyMatrix::new(size, max_nonzero_per_row);
        self.b = vec![T::zero(); size];
    }

    /// system dimension N
    pub fn size(&self) -> usize {
        self.b.len()
    }

    /// number of structural matrix entries, both triangles
    pub fn nnz(&self) -> usize {
        self.A.nnz()
    }

    /// true if the system has size 0, e.g. after a solve
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    pub fn settings(&self) -> &SystemSettings<T> {
        &self.settings
    }

    /// Mutable access to the settings.  Changes are validated at the
    /// next solve.
    pub fn settings_mut(&mut self) -> &mut SystemSettings<T> {
        &mut self.settings
    }

    /// Replace the settings, rejecting invalid ones
    pub fn update_settings(&mut self, settings: SystemSettings<T>) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// statistics from the most recent solve
    pub fn info(&self) -> &SolveInfo<T> {
        &self.info
    }

    // ---------------------------------
    // index checks
    // ---------------------------------

    fn check_index(&self, row: usize, col: usize) -> Result<(), SystemError> {
        let dim = self.size();
        if row >= dim || col >= dim {
            return Err(SystemError::IndexOutOfBounds { row, col, dim });
        }
        Ok(())
    }

    fn check_rhs_index(&self, index: usize) -> Result<(), SystemError> {
        let dim = self.size();
        if index >= dim {
            return Err(SystemError::RhsIndexOutOfBounds { index, dim });
        }
        Ok(())
    }

    // ---------------------------------
    // checked accessors
    // ---------------------------------

    /// Overwrite entry (row,col), creating it if absent
    pub fn try_set_coefficient(&mut self, row: usize, col: usize, value: T) -> Result<(), SystemError> {
        self.check_index(row, col)?;
        self.A.set(row, col, value);
        Ok(())
    }

    /// Accumulate into entry (row,col), creating it if absent
    pub fn try_add_coefficient(&mut self, row: usize, col: usize, value: T) -> Result<(), SystemError> {
        self.check_index(row, col)?;
        self.A.add(row, col, value);
        Ok(())
    }

    /// Value of entry (row,col).  Absent entries read as zero.
    pub fn try_get_coefficient(&self, row: usize, col: usize) -> Result<T, SystemError> {
        self.check_index(row, col)?;
        Ok(self.A.get(row, col))
    }

    pub fn try_set_rhs(&mut self, index: usize, value: T) -> Result<(), SystemError> {
        self.check_rhs_index(index)?;
        self.b[index] = value;
        Ok(())
    }

    pub fn try_add_rhs(&mut self, index: usize, value: T) -> Result<(), SystemError> {
        self.check_rhs_index(index)?;
        self.b[index] += value;
        Ok(())
    }

    pub fn try_get_rhs(&self, index: usize) -> Result<T, SystemError> {
        self.check_rhs_index(index)?;
        Ok(self.b[index])
    }

    /// Impose the value `value` on degree of freedom `index`.
    ///
    /// Every structural off-diagonal entry (r,index) of column `index`,
    /// together with its mirror (index,r), is overwritten with `value`.
    /// The right hand side at `index` becomes `value * A(index,index)`.
    /// The diagonal itself is left unchanged.
    pub fn try_apply_dirichlet_boundary(&mut self, index: usize, value: T) -> Result<(), SystemError> {
        self.check_rhs_index(index)?;

        // collect first, since the writes below may insert into column `index`
        let rows: Vec<usize> = self
            .A
            .column_rows(index)
            .iter()
            .copied()
            .filter(|&r| r != index)
            .collect();

        for r in rows {
            self.A.set(r, index, value);
            self.A.set(index, r, value);
        }

        self.b[index] = value * self.A.get(index, index);
        Ok(())
    }

    // ---------------------------------
    // unchecked accessors
    // ---------------------------------

    /// As [`try_set_coefficient`](Self::try_set_coefficient).
    /// Panics if an index is out of range.
    pub fn set_coefficient(&mut self, row: usize, col: usize, value: T) {
        or_panic(self.try_set_coefficient(row, col, value))
    }

    /// As [`try_add_coefficient`](Self::try_add_coefficient).
    /// Panics if an index is out of range.
    pub fn add_coefficient(&mut self, row: usize, col: usize, value: T) {
        or_panic(self.try_add_coefficient(row, col, value))
    }

    /// As [`try_get_coefficient`](Self::try_get_coefficient).
    /// Panics if an index is out of range.
    pub fn get_coefficient(&self, row: usize, col: usize) -> T {
        or_panic(self.try_get_coefficient(row, col))
    }

    pub fn set_rhs(&mut self, index: usize, value: T) {
        or_panic(self.try_set_rhs(index, value))
    }

    pub fn add_rhs(&mut self, index: usize, value: T) {
        or_panic(self.try_add_rhs(index, value))
    }

    pub fn get_rhs(&self, index: usize) -> T {
        or_panic(self.try_get_rhs(index))
    }

    /// As [`try_apply_dirichlet_boundary`](Self::try_apply_dirichlet_boundary).
    /// Panics if `index` is out of range.
    pub fn apply_dirichlet_boundary(&mut self, index: usize, value: T) {
        or_panic(self.try_apply_dirichlet_boundary(index, value))
    }

    // ---------------------------------
    // solve
    // ---------------------------------

    /// Factor the matrix, solve for `x` and write it to `output[0..N]`.
    ///
    /// Only the lower triangle of the stored matrix (row >= col) is used.
    /// The system is emptied on return, whatever the outcome.
    pub fn solve(&mut self, output: &mut [T]) -> Result<SolveInfo<T>, SystemError> {
        // the store is empty from here on
        let A = std::mem::replace(&mut self.A, AssemblyMatrix::new(0, 0));
        let b = std::mem::take(&mut self.b);

        let mut timers = self.timers.take().unwrap_or_default();
        self.info.reset(&mut timers);

        let result;
        timeit! {timers => "total"; {
            result = self.solve_assembled(&A, &b, output, &mut timers);
        }}

        self.info.status = match result {
            Ok(()) => SolveStatus::Solved,
            Err(SystemError::Factorization(_)) => SolveStatus::FactorizationFailed,
            Err(_) => SolveStatus::Unsolved,
        };
        self.info.finalize(&timers);

        // verbose output is best effort and never fails a solve
        let _ = self.info.print_footer(&mut self.stream, &self.settings);
        if self.settings.verbose {
            let _ = timers.print(&mut self.stream);
        }
        self.timers.replace(timers);

        result.map(|_| self.info.clone())
    }

    fn solve_assembled(
        &mut self,
        A: &AssemblyMatrix<T>,
        b: &[T],
        x: &mut [T],
        timers: &mut Timers,
    ) -> Result<(), SystemError> {
        let n = b.len();
        self.info.dim = n;
        self.info.nnz = A.nnz();

        if x.len() < n {
            return Err(SystemError::OutputBufferTooSmall { len: x.len(), dim: n });
        }
        self.settings.validate()?;

        let L = A.lower_triangle();

        // resolve "auto" to a concrete backend
        let selection;
        let (method, perm) = match self.settings.direct_solve_method.as_str() {
            "auto" => {
                selection = auto_select(&L, &self.settings);
                (selection.method, selection.perm)
            }
            method => (method, None),
        };
        let (shape, ctor) = T::get_direct_solver_config(method)?;

        let _ = self.info.print_header(&mut self.stream, &self.settings, method);

        if n == 0 {
            self.info.linsolver.name = method.to_string();
            return Ok(());
        }

        // a structurally absent diagonal is a zero pivot for every backend
        crate::ldl::check_diagonal(&L).map_err(FactorizationError::from)?;

        let M = match shape {
            MatrixTriangle::Tril => Cow::Borrowed(&L),
            MatrixTriangle::Triu => Cow::Owned(L.transpose()),
        };

        let mut solver = ctor(&self.settings, perm)?;

        let factored;
        timeit! {timers => "factor"; {
            factored = solver.factor(&M);
        }}
        self.info.linsolver = solver.linear_solver_info();
        factored?;

        let x = &mut x[0..n];
        let solved;
        timeit! {timers => "solve"; {
            solved = solver.solve(x, b);
        }}
        solved?;

        if self.settings.check_residual {
            let mut r = b.to_vec();
            L.sym().symv(&mut r, x, T::one(), -T::one());
            self.info.residual_inf = Some(r.norm_inf());
        }

        Ok(())
    }
}

fn or_panic<V>(result: Result<V, SystemError>) -> V {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

impl<T> ConfigurablePrintTarget for LinearSystem<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn std::io::Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}
