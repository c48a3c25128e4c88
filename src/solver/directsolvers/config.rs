#![allow(non_snake_case)]

use super::*;
use crate::solver::{SettingsError, SystemSettings};

#[cfg(feature = "faer-sparse")]
use super::{dense::*, faer_llt::*};
#[cfg(any(feature = "pardiso-mkl", feature = "pardiso-panua"))]
use super::pardiso::*;

// Maps the user's `direct_solve_method` string to a backend constructor.
// "auto" is resolved to a concrete method before reaching this point.

pub(crate) type SolverConstructor<T> =
    fn(&SystemSettings<T>, Option<Vec<usize>>) -> Result<BoxedDirectSolver<T>, FactorizationError>;

// Some solvers only support 64 bit variants, which presents
// a problem since the store is generic over FloatT and trait
// specialization is not available in Rust yet.   Hence this trait.

pub(crate) trait DirectSolverConfiguration: FloatT {
    fn get_direct_solver_config(
        method: &str,
    ) -> Result<(MatrixTriangle, SolverConstructor<Self>), SettingsError>;

    // backends that are generic over FloatT
    fn get_direct_solver_config_default(
        method: &str,
    ) -> Result<(MatrixTriangle, SolverConstructor<Self>), SettingsError> {
        match method {
            "ldl" => {
                let shape = LdlDirectSolver::<Self>::required_matrix_shape();
                let ctor: SolverConstructor<Self> = |S, P| Ok(Box::new(LdlDirectSolver::new(S, P)));
                Ok((shape, ctor))
            }
            _ => Err(SettingsError::BadFieldValue("direct_solve_method")),
        }
    }
}

impl<T: FloatT> DirectSolverConfiguration for T {
    fn get_direct_solver_config(
        method: &str,
    ) -> Result<(MatrixTriangle, SolverConstructor<T>), SettingsError> {
        let solver: &'static str = match method {
            "dense" => "dense",
            "faer" => "faer",
            "mkl" => "mkl",
            "panua" => "panua",
            _ => return Self::get_direct_solver_config_default(method),
        };

        if std::any::TypeId::of::<T>() != std::any::TypeId::of::<f64>() {
            return Err(SettingsError::LinearSolverProblem {
                solver,
                problem: "only f64 is supported",
            });
        }

        let (shape, ctor64) = get_direct_solver_config_f64(solver)?;

        // force cast back to generic FloatT, which is safe
        // because FloatT == f64 always here
        let ctor = unsafe {
            let ptr: *const SolverConstructor<f64> = &ctor64;
            std::ptr::read(ptr as *const SolverConstructor<T>)
        };
        Ok((shape, ctor))
    }
}

// f64 only backends.  Names for backends that were not compiled in fall
// through to an error.
fn get_direct_solver_config_f64(
    solver: &'static str,
) -> Result<(MatrixTriangle, SolverConstructor<f64>), SettingsError> {
    match solver {
        #[cfg(feature = "faer-sparse")]
        "dense" => {
            let shape = DenseDirectSolver::required_matrix_shape();
            let ctor: SolverConstructor<f64> = |_S, _P| Ok(Box::new(DenseDirectSolver::new()));
            Ok((shape, ctor))
        }
        #[cfg(feature = "faer-sparse")]
        "faer" => {
            let shape = FaerDirectSolver::required_matrix_shape();
            let ctor: SolverConstructor<f64> = |_S, _P| Ok(Box::new(FaerDirectSolver::new()));
            Ok((shape, ctor))
        }
        #[cfg(feature = "pardiso-mkl")]
        "mkl" => {
            let shape = MKLPardisoDirectSolver::required_matrix_shape();
            let ctor: SolverConstructor<f64> = |S, _P| Ok(Box::new(MKLPardisoDirectSolver::new(S)?));
            Ok((shape, ctor))
        }
        #[cfg(feature = "pardiso-panua")]
        "panua" => {
            let shape = PanuaPardisoDirectSolver::required_matrix_shape();
            let ctor: SolverConstructor<f64> =
                |S, _P| Ok(Box::new(PanuaPardisoDirectSolver::new(S)?));
            Ok((shape, ctor))
        }
        _ => Err(SettingsError::LinearSolverProblem {
            solver,
            problem: "not compiled in",
        }),
    }
}
