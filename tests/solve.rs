use femsolve::solver::*;

fn methods() -> Vec<&'static str> {
    let mut methods = vec!["auto", "ldl"];
    if cfg!(feature = "faer-sparse") {
        methods.push("dense");
        methods.push("faer");
    }
    methods
}

fn with_method(method: &str) -> SystemSettings<f64> {
    SystemSettingsBuilder::default()
        .direct_solve_method(method.to_string())
        .build()
        .unwrap()
}

#[test]
fn test_known_2x2() {
    for method in methods() {
        let mut system = LinearSystem::new(2, 2, with_method(method));
        system.set_coefficient(0, 0, 4.0);
        system.set_coefficient(0, 1, 1.0);
        system.set_coefficient(1, 0, 1.0);
        system.set_coefficient(1, 1, 3.0);
        system.set_rhs(0, 1.0);
        system.set_rhs(1, 2.0);

        let mut x = [0.0; 2];
        let info = system.solve(&mut x).unwrap();
        assert_eq!(info.status, SolveStatus::Solved);
        assert!((x[0] - 0.0909).abs() < 1e-4, "method {method}");
        assert!((x[1] - 0.6364).abs() < 1e-4, "method {method}");
    }
}

#[test]
fn test_zero_matrix_fails() {
    for method in methods() {
        let mut system = LinearSystem::new(3, 3, with_method(method));
        for i in 0..3 {
            system.set_coefficient(i, i, 0.0);
            system.set_rhs(i, 1.0);
        }
        let mut x = [0.0; 3];
        let result = system.solve(&mut x);
        assert!(
            matches!(result, Err(SystemError::Factorization(_))),
            "method {method}"
        );
        assert_eq!(system.info().status, SolveStatus::FactorizationFailed);
    }
}

#[test]
fn test_empty_matrix_fails() {
    // no structural entries at all
    let mut system = LinearSystem::new(2, 2, with_method("ldl"));
    let mut x = [0.0; 2];
    assert!(system.solve(&mut x).is_err());
}

#[test]
fn test_reset_after_solve() {
    let mut system = LinearSystem::<f64>::new(1, 1, SystemSettings::default());
    system.set_coefficient(0, 0, 2.0);
    system.set_rhs(0, 1.0);

    let mut x = [0.0];
    system.solve(&mut x).unwrap();
    assert_eq!(system.size(), 0);
    assert!(system.try_get_rhs(0).is_err());
    assert!(system.try_set_coefficient(0, 0, 1.0).is_err());

    // a failed solve resets too
    system.init(1, 1);
    system.set_coefficient(0, 0, -2.0);
    assert!(system.solve(&mut x).is_err());
    assert!(system.is_empty());

    // and the system can be reused afterwards
    system.init(1, 1);
    system.set_coefficient(0, 0, 4.0);
    system.set_rhs(0, 2.0);
    system.solve(&mut x).unwrap();
    assert!((x[0] - 0.5).abs() < 1e-12);
}

#[test]
fn test_larger_output_buffer() {
    let mut system = LinearSystem::new(2, 1, with_method("ldl"));
    system.set_coefficient(0, 0, 1.0);
    system.set_coefficient(1, 1, 2.0);
    system.set_rhs(0, 1.0);
    system.set_rhs(1, 1.0);

    let mut x = [-1.0; 4];
    system.solve(&mut x).unwrap();
    assert_eq!(x, [1.0, 0.5, -1.0, -1.0]);
}

#[test]
fn test_tridiagonal_f32() {
    let n = 50;
    let settings = SystemSettingsBuilder::<f32>::default()
        .direct_solve_method("ldl".to_string())
        .build()
        .unwrap();
    let mut system = LinearSystem::new(n, 3, settings);
    for i in 0..n {
        system.add_coefficient(i, i, 2.0);
        if i + 1 < n {
            system.add_coefficient(i + 1, i, -1.0);
            system.add_coefficient(i, i + 1, -1.0);
        }
    }
    system.set_rhs(0, 1.0);
    system.set_rhs(n - 1, 1.0);

    // solution is all ones
    let mut x = vec![0.0f32; n];
    let info = system.solve(&mut x).unwrap();
    assert!(x.iter().all(|&v| (v - 1.0).abs() < 1e-3));
    assert_eq!(info.linsolver.name, "ldl");
    assert_eq!(info.dim, n);
    assert!(info.residual_inf.unwrap() < 1e-4);
}

#[test]
fn test_f64_only_method_rejected_for_f32() {
    let settings = SystemSettingsBuilder::<f32>::default()
        .direct_solve_method("faer".to_string())
        .build();

    if cfg!(feature = "faer-sparse") {
        // valid as a setting, but unusable for f32
        let mut system = LinearSystem::new(1, 1, settings.unwrap());
        system.set_coefficient(0, 0, 1.0);
        let mut x = [0.0f32];
        assert!(matches!(
            system.solve(&mut x),
            Err(SystemError::Settings(SettingsError::LinearSolverProblem { .. }))
        ));
    } else {
        assert!(settings.is_err());
    }
}
