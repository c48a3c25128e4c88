//! Sparse symmetric system assembly and solve.
//!
//! The main type is [`LinearSystem`], an owned store for an N×N symmetric
//! matrix and a right hand side.  It is filled incrementally through indexed
//! set and accumulate operations and then consumed by a single call to
//! [`LinearSystem::solve`], which factors the matrix with the backend named
//! in [`SystemSettings::direct_solve_method`].

mod errors;
mod info;
mod info_print;
mod settings;
mod system;

pub mod directsolvers;

pub use directsolvers::{DirectSolver, FactorizationError, LinearSolverInfo};
pub use errors::*;
pub use info::*;
pub use settings::*;
pub use system::*;
