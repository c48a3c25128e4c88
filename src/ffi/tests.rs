use super::handle::*;
use super::store::*;
use super::*;

// all use of the process-wide system lives in this one test, since
// tests run concurrently
#[test]
fn test_global_store() {
    femsolve_init(2, 2);
    femsolve_init(2, 2);
    assert_eq!(femsolve_get_coefficient(1, 1), 0.0);

    femsolve_add_coefficient(0, 0, 3.0);
    femsolve_add_coefficient(0, 0, 1.0);
    femsolve_set_coefficient(1, 0, 1.0);
    femsolve_set_coefficient(0, 1, 1.0);
    femsolve_set_coefficient(1, 1, 3.0);
    femsolve_set_rhs(0, 0.5);
    femsolve_add_rhs(0, 0.5);
    femsolve_add_rhs(1, 2.0);
    assert_eq!(femsolve_get_coefficient(0, 0), 4.0);
    assert_eq!(femsolve_get_rhs(0), 1.0);

    let mut x = [0.0; 2];
    let status = unsafe { femsolve_solve(x.as_mut_ptr()) };
    assert_eq!(status, FEMSOLVE_OK);
    assert!((x[0] - 0.0909).abs() < 1e-4);
    assert!((x[1] - 0.6364).abs() < 1e-4);

    // not positive definite
    femsolve_init(3, 3);
    assert_eq!(femsolve_set_direct_solve_method(1), FEMSOLVE_OK);
    for i in 0..3 {
        femsolve_set_coefficient(i, i, 0.0);
    }
    let mut x = [0.0; 3];
    let status = unsafe { femsolve_solve(x.as_mut_ptr()) };
    assert_eq!(status, FEMSOLVE_FACTORIZATION_FAILED);

    // null output
    femsolve_init(1, 1);
    femsolve_set_coefficient(0, 0, 1.0);
    let status = unsafe { femsolve_solve(std::ptr::null_mut()) };
    assert_eq!(status, FEMSOLVE_BAD_OUTPUT);

    // unknown methods are rejected
    assert_eq!(femsolve_set_direct_solve_method(42), FEMSOLVE_FACTORIZATION_FAILED);
    let dense = if cfg!(feature = "faer-sparse") {
        FEMSOLVE_OK
    } else {
        FEMSOLVE_FACTORIZATION_FAILED
    };
    assert_eq!(femsolve_set_direct_solve_method(2), dense);
    assert_eq!(femsolve_set_direct_solve_method(0), FEMSOLVE_OK);
}

#[test]
fn test_handle_round_trip() {
    unsafe {
        let h = femsolve_system_new(2, 2);
        femsolve_system_set_coefficient(h, 0, 0, 4.0);
        femsolve_system_set_coefficient(h, 1, 0, 1.0);
        femsolve_system_set_coefficient(h, 0, 1, 1.0);
        femsolve_system_add_coefficient(h, 1, 1, 3.0);
        femsolve_system_set_rhs(h, 0, 1.0);
        femsolve_system_add_rhs(h, 1, 2.0);
        assert_eq!(femsolve_system_get_coefficient(h, 1, 1), 3.0);
        assert_eq!(femsolve_system_get_rhs(h, 1), 2.0);

        assert_eq!(femsolve_system_set_direct_solve_method(h, 1), FEMSOLVE_OK);

        let mut x = [0.0; 1];
        let status = femsolve_system_solve(h, x.as_mut_ptr(), x.len());
        assert_eq!(status, FEMSOLVE_BAD_OUTPUT);

        // the failed solve consumed the system, so rebuild it
        femsolve_system_init(h, 2, 2);
        femsolve_system_set_coefficient(h, 0, 0, 2.0);
        femsolve_system_set_coefficient(h, 1, 1, 2.0);
        femsolve_system_set_coefficient(h, 1, 0, 1.0);
        femsolve_system_apply_dirichlet_boundary(h, 0, 0.0);
        assert_eq!(femsolve_system_get_coefficient(h, 0, 1), 0.0);
        assert_eq!(femsolve_system_get_rhs(h, 0), 0.0);
        femsolve_system_set_rhs(h, 1, 4.0);

        let mut x = [0.0; 2];
        let status = femsolve_system_solve(h, x.as_mut_ptr(), x.len());
        assert_eq!(status, FEMSOLVE_OK);
        assert!((x[0]).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);

        femsolve_system_drop(h);
        femsolve_system_drop(std::ptr::null_mut());
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_handle_from_json() {
    let json = c"{\"direct_solve_method\": \"ldl\", \"verbose\": false}";
    let bad = c"{\"direct_solve_method\": \"foo\"}";
    unsafe {
        let h = femsolve_system_new_json(1, 1, json.as_ptr());
        assert!(!h.is_null());
        femsolve_system_set_coefficient(h, 0, 0, 2.0);
        femsolve_system_set_rhs(h, 0, 1.0);
        let mut x = [0.0];
        assert_eq!(femsolve_system_solve(h, x.as_mut_ptr(), 1), FEMSOLVE_OK);
        assert!((x[0] - 0.5).abs() < 1e-12);
        femsolve_system_drop(h);

        assert!(femsolve_system_new_json(1, 1, bad.as_ptr()).is_null());
        assert!(femsolve_system_new_json(1, 1, std::ptr::null()).is_null());
    }
}

#[test]
fn test_method_enum() {
    for i in 0..6 {
        let method = DirectSolveMethodsFFI::try_from(i).unwrap();
        let name: String = method.into();
        assert_eq!(DirectSolveMethodsFFI::try_from(name.as_str()), Ok(method));
    }
    assert_eq!(DirectSolveMethodsFFI::try_from(6), Err(6));
    assert_eq!(DirectSolveMethodsFFI::LDL.as_str(), "ldl");
}
