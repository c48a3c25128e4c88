#![allow(non_snake_case)]

use femsolve::solver::*;

fn three_by_three() -> LinearSystem<f64> {
    let mut system = LinearSystem::new(3, 3, SystemSettings::default());
    let A = [[4.0, -1.0, 0.5], [-1.0, 5.0, -2.0], [0.5, -2.0, 6.0]];
    for (i, row) in A.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            system.set_coefficient(i, j, v);
        }
    }
    for i in 0..3 {
        system.set_rhs(i, 1.0);
    }
    system
}

#[test]
fn test_dirichlet_scenario() {
    let mut system = three_by_three();
    let diag = system.get_coefficient(1, 1);

    system.apply_dirichlet_boundary(1, 0.25);

    for j in [0, 2] {
        assert_eq!(system.get_coefficient(1, j), 0.25);
        assert_eq!(system.get_coefficient(j, 1), 0.25);
    }
    assert_eq!(system.get_coefficient(1, 1), diag);
    assert_eq!(system.get_rhs(1), 0.25 * diag);

    // untouched
    assert_eq!(system.get_coefficient(2, 0), 0.5);
    assert_eq!(system.get_rhs(0), 1.0);
    assert_eq!(system.get_rhs(2), 1.0);
}

#[test]
fn test_dirichlet_then_solve() {
    let mut system = three_by_three();
    system.apply_dirichlet_boundary(0, 0.0);

    // column 0 is decoupled, so x[0] = rhs[0] / A(0,0) = 0
    let mut x = [f64::NAN; 3];
    system.solve(&mut x).unwrap();
    assert!(x[0].abs() < 1e-12);

    // remaining 2x2 block
    let (a, b, c) = (5.0, -2.0, 6.0);
    let det = a * c - b * b;
    assert!((x[1] - (c - b) / det).abs() < 1e-12);
    assert!((x[2] - (a - b) / det).abs() < 1e-12);
}

#[test]
fn test_dirichlet_without_structure() {
    // nothing structural apart from the diagonal
    let mut system = LinearSystem::<f64>::new(3, 3, SystemSettings::default());
    system.set_coefficient(2, 2, 8.0);
    system.apply_dirichlet_boundary(2, 0.5);

    assert_eq!(system.nnz(), 1);
    assert_eq!(system.get_rhs(2), 4.0);
}
