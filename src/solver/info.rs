use super::directsolvers::LinearSolverInfo;
use crate::algebra::*;
use crate::timers::*;

/// Status of the most recent solve
#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
pub enum SolveStatus {
    /// No solve has been attempted yet
    #[default]
    Unsolved,
    /// The system was factored and solved
    Solved,
    /// The matrix was not positive definite, or the backend failed
    FactorizationFailed,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Statistics from the most recent call to
/// [`LinearSystem::solve`](crate::solver::LinearSystem::solve)
#[derive(Default, Debug, Clone)]
pub struct SolveInfo<T> {
    pub status: SolveStatus,
    pub linsolver: LinearSolverInfo,
    /// system dimension
    pub dim: usize,
    /// structural nonzeros in the assembled matrix, both triangles
    pub nnz: usize,
    /// factorization time (seconds)
    pub factor_time: f64,
    /// forward / backward solve time (seconds)
    pub solve_time: f64,
    /// total time including assembly into compressed form (seconds)
    pub total_time: f64,
    /// ‖Ax - b‖∞, or `None` if not computed
    pub residual_inf: Option<T>,
}

impl<T> SolveInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self, timers: &mut Timers) {
        *self = Self::default();
        timers.reset_timer("total");
    }

    pub(crate) fn finalize(&mut self, timers: &Timers) {
        self.factor_time = timers.elapsed(&["total", "factor"]).as_secs_f64();
        self.solve_time = timers.elapsed(&["total", "solve"]).as_secs_f64();
        self.total_time = timers.elapsed(&["total"]).as_secs_f64();
    }

    /// true if the most recent solve succeeded
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}
