//! C interface.
//!
//! Two flavours of the same API are exported from the `cdylib`:
//!
//! * `femsolve_*` functions operating on a single process-wide system,
//!   guarded by a mutex.  Callers must still sequence their own calls
//!   (init, assembly, solve).
//! * `femsolve_system_*` functions operating on an opaque handle created
//!   by [`femsolve_system_new`](handle::femsolve_system_new) and released
//!   by [`femsolve_system_drop`](handle::femsolve_system_drop).
//!
//! Indices are C `int`s.  A negative or out of range index is a caller
//! bug and aborts the process with a diagnostic.

#![allow(clippy::missing_safety_doc)]

pub mod enums;
pub mod handle;
pub mod store;

pub use enums::*;

use std::os::raw::c_int;

/// `femsolve_solve` status: success
pub const FEMSOLVE_OK: c_int = 0;
/// `femsolve_solve` status: factorization failed or settings invalid
pub const FEMSOLVE_FACTORIZATION_FAILED: c_int = 1;
/// `femsolve_solve` status: null or too short output buffer
pub const FEMSOLVE_BAD_OUTPUT: c_int = 2;

// C indices to usize.  Negative values are bounds violations too.
pub(crate) fn to_index(i: c_int) -> usize {
    match usize::try_from(i) {
        Ok(i) => i,
        Err(_) => panic!("negative index {} passed to femsolve", i),
    }
}

pub(crate) fn status_code<V, E>(result: &Result<V, E>) -> c_int {
    match result {
        Ok(_) => FEMSOLVE_OK,
        Err(_) => FEMSOLVE_FACTORIZATION_FAILED,
    }
}

#[cfg(test)]
mod tests;
