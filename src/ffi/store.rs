//! The process-wide system.

use super::*;
use crate::solver::{LinearSystem, SystemError};
use lazy_static::lazy_static;
use std::os::raw::c_double;
use std::sync::{Mutex, MutexGuard};

lazy_static! {
    static ref SYSTEM: Mutex<LinearSystem<f64>> = Mutex::new(LinearSystem::default());
}

fn system() -> MutexGuard<'static, LinearSystem<f64>> {
    // a panic while holding the lock aborts the process, so
    // a poisoned lock can only be observed from Rust callers
    SYSTEM.lock().unwrap_or_else(|e| e.into_inner())
}

/// Reset the system to `size x size`, reserving `max_nonzero_per_row`
/// entries per row.  The solve method is kept.
#[no_mangle]
pub extern "C" fn femsolve_init(size: c_int, max_nonzero_per_row: c_int) {
    system().init(to_index(size), to_index(max_nonzero_per_row));
}

#[no_mangle]
pub extern "C" fn femsolve_set_coefficient(row: c_int, col: c_int, value: c_double) {
    system().set_coefficient(to_index(row), to_index(col), value);
}

#[no_mangle]
pub extern "C" fn femsolve_add_coefficient(row: c_int, col: c_int, value: c_double) {
    system().add_coefficient(to_index(row), to_index(col), value);
}

#[no_mangle]
pub extern "C" fn femsolve_get_coefficient(row: c_int, col: c_int) -> c_double {
    system().get_coefficient(to_index(row), to_index(col))
}

#[no_mangle]
pub extern "C" fn femsolve_set_rhs(index: c_int, value: c_double) {
    system().set_rhs(to_index(index), value);
}

#[no_mangle]
pub extern "C" fn femsolve_add_rhs(index: c_int, value: c_double) {
    system().add_rhs(to_index(index), value);
}

#[no_mangle]
pub extern "C" fn femsolve_get_rhs(index: c_int) -> c_double {
    system().get_rhs(to_index(index))
}

#[no_mangle]
pub extern "C" fn femsolve_apply_dirichlet_boundary(index: c_int, value: c_double) {
    system().apply_dirichlet_boundary(to_index(index), value);
}

/// Solve the system and write the N solution values to `output`.
/// The system is left empty whatever the outcome.
///
/// Returns 0 on success, 1 if the factorization failed and 2 if
/// `output` is null.
///
/// # Safety
///
/// `output` must be null or point to at least N writable doubles.
#[no_mangle]
pub unsafe extern "C" fn femsolve_solve(output: *mut c_double) -> c_int {
    let mut system = system();
    let n = system.size();
    solve_into(&mut system, output, n)
}

/// Select the direct solve method for subsequent solves.  Returns 0 on
/// success and 1 if the method is unknown or was not compiled in.
#[no_mangle]
pub extern "C" fn femsolve_set_direct_solve_method(method: c_int) -> c_int {
    set_direct_solve_method(&mut system(), method)
}

// shared with the handle based interface

pub(crate) unsafe fn solve_into(
    system: &mut LinearSystem<f64>,
    output: *mut c_double,
    len: usize,
) -> c_int {
    if output.is_null() {
        // still consumes the system
        let _ = system.solve(&mut []);
        return FEMSOLVE_BAD_OUTPUT;
    }
    let output = std::slice::from_raw_parts_mut(output, len);
    match system.solve(output) {
        Ok(_) => FEMSOLVE_OK,
        Err(SystemError::OutputBufferTooSmall { .. }) => FEMSOLVE_BAD_OUTPUT,
        Err(_) => FEMSOLVE_FACTORIZATION_FAILED,
    }
}

pub(crate) fn set_direct_solve_method(system: &mut LinearSystem<f64>, method: c_int) -> c_int {
    let Ok(method) = DirectSolveMethodsFFI::try_from(method) else {
        return FEMSOLVE_FACTORIZATION_FAILED;
    };
    let mut settings = system.settings().clone();
    settings.direct_solve_method = method.into();
    status_code(&system.update_settings(settings))
}
