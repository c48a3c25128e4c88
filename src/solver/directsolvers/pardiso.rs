#![allow(non_snake_case)]
use super::{check_matrix_shape, DirectSolver, FactorizationError, LinearSolverInfo};
use crate::algebra::*;
use crate::solver::SystemSettings;
use pardiso_wrapper::*;

// Pardiso wants 32 bit CSC indices, 1 indexed
struct PardisoMatrixIndices32 {
    colptr32: Vec<i32>,
    rowval32: Vec<i32>,
}

impl PardisoMatrixIndices32 {
    fn new(A: &CscMatrix<f64>) -> Result<Self, FactorizationError> {
        let to_i32 = |x: &usize| {
            i32::try_from(x + 1).map_err(|_| {
                FactorizationError::Backend("matrix too large for 32 bit pardiso".to_string())
            })
        };
        let colptr32 = A.colptr.iter().map(to_i32).collect::<Result<Vec<i32>, _>>()?;
        let rowval32 = A.rowval.iter().map(to_i32).collect::<Result<Vec<i32>, _>>()?;
        Ok(Self { colptr32, rowval32 })
    }
}

/// Direct solver using a Pardiso SPD factorization.  Supports f64 only.
pub struct PardisoDirectSolver<P>
where
    P: PardisoInterface,
{
    ps: P,
    max_threads: u32,
    nnzA: usize,
    // copy of the factored matrix, which pardiso needs again at solve time
    nzval: Vec<f64>,
    index32: Option<PardisoMatrixIndices32>,
}

impl<P> PardisoDirectSolver<P>
where
    P: PardisoInterface,
{
    fn with_interface(ps: P, settings: &SystemSettings<f64>) -> Self {
        Self {
            ps,
            max_threads: settings.max_threads,
            nnzA: 0,
            nzval: Vec::new(),
            index32: None,
        }
    }

    fn call_pardiso(&mut self, phase: Phase, b: &mut [f64], x: &mut [f64]) -> Result<(), String> {
        let n = (self.colptr_len() - 1) as i32;
        let index32 = match self.index32.as_ref() {
            Some(index32) => index32,
            None => return Ok(()),
        };
        self.ps.set_phase(phase);
        assert_pardiso_const_rhs_config(&self.ps);
        self.ps
            .pardiso(
                &self.nzval,
                &index32.colptr32,
                &index32.rowval32,
                b,
                x,
                n,
                1_i32,
            )
            .map_err(|e| format!("{e:?}"))
    }

    fn colptr_len(&self) -> usize {
        self.index32.as_ref().map_or(1, |i| i.colptr32.len())
    }
}

#[cfg(feature = "pardiso-mkl")]
pub type MKLPardisoDirectSolver = PardisoDirectSolver<MKLPardisoSolver>;

#[cfg(feature = "pardiso-mkl")]
impl MKLPardisoDirectSolver {
    pub fn new(settings: &SystemSettings<f64>) -> Result<Self, FactorizationError> {
        if !MKLPardisoSolver::is_available() {
            return Err(FactorizationError::Backend(
                "MKL Pardiso is not available".to_string(),
            ));
        }
        let ps =
            MKLPardisoSolver::new().map_err(|e| FactorizationError::Backend(format!("{e:?}")))?;
        Ok(Self::with_interface(ps, settings))
    }
}

#[cfg(feature = "pardiso-panua")]
pub type PanuaPardisoDirectSolver = PardisoDirectSolver<PanuaPardisoSolver>;

#[cfg(feature = "pardiso-panua")]
impl PanuaPardisoDirectSolver {
    pub fn new(settings: &SystemSettings<f64>) -> Result<Self, FactorizationError> {
        if !PanuaPardisoSolver::is_available() {
            return Err(FactorizationError::Backend(
                "Panua Pardiso is not available".to_string(),
            ));
        }
        let ps =
            PanuaPardisoSolver::new().map_err(|e| FactorizationError::Backend(format!("{e:?}")))?;

        // Note : Panua doesn't support setting the number of threads
        // Always reads instead from ENV["OMP_NUM_THREADS"] before loading
        Ok(Self::with_interface(ps, settings))
    }
}

impl<P> DirectSolver<f64> for PardisoDirectSolver<P>
where
    P: PardisoInterface,
{
    fn factor(&mut self, A: &CscMatrix<f64>) -> Result<(), FactorizationError> {
        check_matrix_shape(A, Self::required_matrix_shape())?;

        self.nnzA = A.nnz();
        self.nzval = A.nzval.clone();
        self.index32 = Some(PardisoMatrixIndices32::new(A)?);

        if A.n == 0 {
            return Ok(());
        }

        self.ps
            .set_matrix_type(MatrixType::RealSymmetricPositiveDefinite);
        self.ps
            .pardisoinit()
            .map_err(|e| FactorizationError::Backend(format!("{e:?}")))?;

        // sets pardiso to solve the transposed system since we are supplying
        // CSC data and it expects CSR data.   The lower triangle in CSC
        // is the upper triangle in CSR.
        self.ps.set_iparm(11, 1);

        if self.max_threads > 0 {
            // ignored by backends that can't set their thread count
            let _ = self.ps.set_num_threads(self.max_threads as i32);
        }

        self.call_pardiso(Phase::Analysis, &mut [], &mut [])
            .map_err(FactorizationError::Backend)?;

        // SPD factorization fails outright on a non-positive pivot
        self.call_pardiso(Phase::NumFact, &mut [], &mut [])
            .map_err(|_| FactorizationError::NotPositiveDefinite { column: None })
    }

    fn solve(&mut self, x: &mut [f64], b: &[f64]) -> Result<(), FactorizationError> {
        if x.is_empty() {
            return Ok(());
        }
        // pardiso wants b to be mutable since there is an option
        // to store the solution on b instead of x
        let mut b = b.to_vec();
        self.call_pardiso(Phase::SolveIterativeRefine, &mut b, x)
            .map_err(|e| {
                x.fill(f64::NAN);
                FactorizationError::Backend(format!("pardiso solve: {e}"))
            })
    }

    fn linear_solver_info(&self) -> LinearSolverInfo {
        LinearSolverInfo {
            name: self.ps.name().to_string(),
            threads: self.ps.get_num_threads().map_or(0, |n| n as usize),
            direct: true,
            nnzA: self.nnzA,
            nnzL: 0,
        }
    }

    fn required_matrix_shape() -> MatrixTriangle {
        MatrixTriangle::Tril
    }
}

fn assert_pardiso_const_rhs_config<P>(ps: &P)
where
    P: PardisoInterface,
{
    // We always want pardiso to leave b untouched and write to x
    assert!(
        ps.get_iparm(5) == 0,
        "Pardiso should be set to store its solution in x, not b [iparm[5] != 0 error]"
    );
}
