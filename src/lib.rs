//! __femsolve__ assembles sparse symmetric linear systems, as they arise in
//! finite element analysis, and solves them by direct factorization.
//!
//! A system is built up entry by entry with overwrite and accumulate
//! operations, boundary conditions are imposed on it, and it is then
//! consumed by a single solve:
//!
//! ```
//! use femsolve::solver::*;
//!
//! // 1D Poisson problem on 4 nodes, both ends fixed
//! let n = 4;
//! let mut system = LinearSystem::<f64>::new(n, 3, SystemSettings::default());
//! for e in 0..n - 1 {
//!     for (i, j, k) in [(e, e, 1.0), (e + 1, e + 1, 1.0), (e + 1, e, -1.0), (e, e + 1, -1.0)] {
//!         system.add_coefficient(i, j, k);
//!     }
//!     system.add_rhs(e, 0.5);
//!     system.add_rhs(e + 1, 0.5);
//! }
//! system.apply_dirichlet_boundary(0, 0.0);
//! system.apply_dirichlet_boundary(n - 1, 0.0);
//!
//! let mut u = vec![0.0; n];
//! let info = system.solve(&mut u).unwrap();
//! assert!(info.is_solved());
//! assert!(system.is_empty());
//! ```
//!
//! The factorization backend is chosen at run time through
//! [`SystemSettings::direct_solve_method`](solver::SystemSettings):
//!
//! * `"ldl"`: simplicial LDLᵀ with an AMD ordering.  Always available.
//! * `"dense"`: dense Cholesky from the [faer](https://docs.rs/faer) crate,
//!   for small systems (feature `faer-sparse`, f64 only).
//! * `"faer"`: sparse Cholesky from faer (feature `faer-sparse`, f64 only).
//! * `"mkl"` / `"panua"`: Pardiso (features `pardiso-mkl` / `pardiso-panua`).
//! * `"auto"`: picks one of the above based on availability and the
//!   expected cost of the factorization.
//!
//! The same functionality is exported to C through the [`ffi`] module.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod ffi;
pub mod io;
pub mod ldl;
pub mod solver;
pub(crate) mod timers;
