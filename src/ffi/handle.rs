//! Handle based interface, for callers that need more than one system.

use super::store::{set_direct_solve_method, solve_into};
use super::*;
use crate::solver::{LinearSystem, SystemSettings};
use std::os::raw::{c_double, c_void};

// functions for converting systems to / from c void pointers

fn to_ptr(system: Box<LinearSystem<f64>>) -> *mut c_void {
    Box::into_raw(system) as *mut c_void
}

unsafe fn from_ptr(ptr: *mut c_void) -> Box<LinearSystem<f64>> {
    Box::from_raw(ptr as *mut LinearSystem<f64>)
}

unsafe fn borrow_ptr<'a>(ptr: *mut c_void) -> &'a mut LinearSystem<f64> {
    assert!(!ptr.is_null(), "null femsolve system handle");
    &mut *(ptr as *mut LinearSystem<f64>)
}

/// A new `size x size` system with default settings.  Release it
/// with [`femsolve_system_drop`].
#[no_mangle]
pub extern "C" fn femsolve_system_new(size: c_int, max_nonzero_per_row: c_int) -> *mut c_void {
    let system = LinearSystem::new(
        to_index(size),
        to_index(max_nonzero_per_row),
        SystemSettings::default(),
    );
    to_ptr(Box::new(system))
}

/// As [`femsolve_system_new`], with settings parsed from a JSON
/// object.  Returns null if the string is not valid UTF-8, is not
/// valid JSON, or describes invalid settings.
///
/// # Safety
///
/// `json` must be a valid nul terminated C string.
#[cfg(feature = "serde")]
#[no_mangle]
pub unsafe extern "C" fn femsolve_system_new_json(
    size: c_int,
    max_nonzero_per_row: c_int,
    json: *const std::os::raw::c_char,
) -> *mut c_void {
    if json.is_null() {
        return std::ptr::null_mut();
    }
    let Ok(json) = std::ffi::CStr::from_ptr(json).to_str() else {
        return std::ptr::null_mut();
    };
    let Ok(settings) = SystemSettings::from_json(json) else {
        return std::ptr::null_mut();
    };
    let system = LinearSystem::new(to_index(size), to_index(max_nonzero_per_row), settings);
    to_ptr(Box::new(system))
}

/// Release a system created by one of the `femsolve_system_new` functions
///
/// # Safety
///
/// `ptr` must be null or a handle that has not been dropped yet.
#[no_mangle]
pub unsafe extern "C" fn femsolve_system_drop(ptr: *mut c_void) {
    if !ptr.is_null() {
        drop(from_ptr(ptr));
    }
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_init(
    ptr: *mut c_void,
    size: c_int,
    max_nonzero_per_row: c_int,
) {
    borrow_ptr(ptr).init(to_index(size), to_index(max_nonzero_per_row));
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_set_coefficient(
    ptr: *mut c_void,
    row: c_int,
    col: c_int,
    value: c_double,
) {
    borrow_ptr(ptr).set_coefficient(to_index(row), to_index(col), value);
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_add_coefficient(
    ptr: *mut c_void,
    row: c_int,
    col: c_int,
    value: c_double,
) {
    borrow_ptr(ptr).add_coefficient(to_index(row), to_index(col), value);
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_get_coefficient(
    ptr: *mut c_void,
    row: c_int,
    col: c_int,
) -> c_double {
    borrow_ptr(ptr).get_coefficient(to_index(row), to_index(col))
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_set_rhs(ptr: *mut c_void, index: c_int, value: c_double) {
    borrow_ptr(ptr).set_rhs(to_index(index), value);
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_add_rhs(ptr: *mut c_void, index: c_int, value: c_double) {
    borrow_ptr(ptr).add_rhs(to_index(index), value);
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_get_rhs(ptr: *mut c_void, index: c_int) -> c_double {
    borrow_ptr(ptr).get_rhs(to_index(index))
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_apply_dirichlet_boundary(
    ptr: *mut c_void,
    index: c_int,
    value: c_double,
) {
    borrow_ptr(ptr).apply_dirichlet_boundary(to_index(index), value);
}

/// Solve the system and write the solution to `output`, which holds
/// `len` doubles.  The system is left empty whatever the outcome.
///
/// Returns 0 on success, 1 if the factorization failed and 2 if
/// `output` is null or shorter than the system.
///
/// # Safety
///
/// `ptr` must be a live handle and `output` must be null or point
/// to at least `len` writable doubles.
#[no_mangle]
pub unsafe extern "C" fn femsolve_system_solve(
    ptr: *mut c_void,
    output: *mut c_double,
    len: usize,
) -> c_int {
    solve_into(borrow_ptr(ptr), output, len)
}

#[no_mangle]
pub unsafe extern "C" fn femsolve_system_set_direct_solve_method(
    ptr: *mut c_void,
    method: c_int,
) -> c_int {
    set_direct_solve_method(borrow_ptr(ptr), method)
}
