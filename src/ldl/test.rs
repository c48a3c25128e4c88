use super::*;

// tests some of the private functions of the LDL module.  Configured
// as submodule from mod.rs to expose internals.

fn test_matrix_4x4() -> CscMatrix<f64> {
    // A =
    //[ 8.0  -3.0   2.0    ⋅ ]
    //[  ⋅    8.0  -1.0    ⋅ ]
    //[  ⋅     ⋅    8.0  -1.0]
    //[  ⋅     ⋅     ⋅    1.0]
    let Ap = vec![0, 1, 3, 6, 8];
    let Ai = vec![0, 0, 1, 0, 1, 2, 2, 3];
    let Ax = vec![8., -3., 8., 2., -1., 8., -1., 1.];
    CscMatrix::new(4, 4, Ap, Ai, Ax)
}

#[test]
fn test_invperm() {
    let perm = vec![3, 0, 2, 1];
    assert_eq!(invperm(&perm).unwrap(), vec![1, 3, 2, 0]);

    // repeated index
    assert_eq!(invperm(&[3, 0, 2, 0]), Err(LdlError::InvalidPermutation));
    // index too big
    assert_eq!(invperm(&[4, 0, 2, 1]), Err(LdlError::InvalidPermutation));
    // a zero in the wrong place must still be detected
    assert!(invperm(&[0, 0]).is_err());
}

#[test]
fn test_permute() {
    let perm = vec![3, 0, 2, 1];
    let b = vec![1., 2., 3., 4.];
    let mut x = vec![0.; 4];
    let mut y = vec![0.; 4];

    permute(&mut x, &b, &perm);
    assert_eq!(x, vec![4., 1., 3., 2.]);

    ipermute(&mut y, &x, &perm);
    assert_eq!(y, b);
}

#[test]
fn test_elimination_tree() {
    let A = test_matrix_4x4();
    let mut parent = vec![0; 4];
    let mut Lnz = vec![0; 4];
    elimination_tree(&A, &mut parent, &mut Lnz);

    assert_eq!(parent, vec![1, 2, 3, NO_PARENT]);
    assert_eq!(Lnz, vec![2, 1, 1, 0]);
}

#[test]
fn test_permute_symmetric() {
    //no permutation at all
    let A = test_matrix_4x4();
    let P = permute_symmetric(&A, &[0, 1, 2, 3]);
    assert_eq!(P, A);

    //reverse ordering.  The result is still upper triangular
    let P = permute_symmetric(&A, &[3, 2, 1, 0]);
    assert!(P.is_triu());
    assert_eq!(P.nnz(), A.nnz());
    assert_eq!(P.colptr, vec![0, 1, 3, 5, 8]);
}

#[test]
fn test_amd() {
    let A = test_matrix_4x4();
    let (perm, iperm, _info) = amd_order(&A, 1.5).unwrap();
    assert_eq!(invperm(&perm).unwrap(), iperm);
}

#[test]
fn test_settings_builder() {
    let opts = LdlSettings::<f64>::default();
    assert_eq!(opts.amd_dense_scale, 1.5);
    assert_eq!(opts.pivot_tol, 0.);
    assert!(opts.perm.is_none());

    let opts = LdlSettingsBuilder::default()
        .perm(vec![0, 1, 2, 3])
        .pivot_tol(1e-3)
        .build()
        .unwrap();
    assert_eq!(opts.pivot_tol, 1e-3);
    assert_eq!(opts.perm, Some(vec![0, 1, 2, 3]));
}

#[test]
fn test_solve_basic() {
    let A = test_matrix_4x4();
    let x = [1., -2., 3., -4.];

    //no permutation
    let opts = LdlSettingsBuilder::default()
        .perm(vec![0, 1, 2, 3])
        .build()
        .unwrap();
    let mut factors = LdlFactorisation::new(&A, Some(opts)).unwrap();
    let mut b = [20.0, -22.0, 32.0, -7.0];
    factors.solve(&mut b);
    assert!(b.norm_inf_diff(&x) <= 1e-12);

    //all defaults, including amd
    let mut factors = LdlFactorisation::new(&A, None).unwrap();
    let mut b = [20.0, -22.0, 32.0, -7.0];
    factors.solve(&mut b);
    assert!(b.norm_inf_diff(&x) <= 1e-12);

    //user specified permutation
    let opts = LdlSettingsBuilder::default()
        .perm(vec![3, 0, 2, 1])
        .build()
        .unwrap();
    let mut factors = LdlFactorisation::new(&A, Some(opts)).unwrap();
    let mut b = [20.0, -22.0, 32.0, -7.0];
    factors.solve(&mut b);
    assert!(b.norm_inf_diff(&x) <= 1e-12);
}

#[test]
fn test_factors_positive() {
    let factors = LdlFactorisation::new(&test_matrix_4x4(), None).unwrap();
    assert!(factors.D.iter().all(|&d| d > 0.));
    assert_eq!(factors.dim(), 4);
    assert!(factors.nnz_l() >= 3);
}

#[test]
fn test_bad_numeric_pivot() {
    //no ordering, so the failing column is known
    let opts = LdlSettingsBuilder::default()
        .perm(vec![0, 1, 2, 3])
        .build()
        .unwrap();

    //set the first element of A to zero (top left)
    let mut A = test_matrix_4x4();
    A.nzval[0] = 0.;
    assert_eq!(
        LdlFactorisation::new(&A, Some(opts.clone())).unwrap_err(),
        LdlError::NotPositiveDefinite { column: 0 }
    );

    //make the final pivot negative
    let mut A = test_matrix_4x4();
    *A.nzval.last_mut().unwrap() = -1.;
    assert_eq!(
        LdlFactorisation::new(&A, Some(opts)).unwrap_err(),
        LdlError::NotPositiveDefinite { column: 3 }
    );
}

#[test]
fn test_indefinite_rejected() {
    // [1 2; 2 1] has eigenvalues 3 and -1
    let A = CscMatrix::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![1., 2., 1.]);
    assert!(matches!(
        LdlFactorisation::new(&A, None),
        Err(LdlError::NotPositiveDefinite { .. })
    ));
}

#[test]
fn test_empty_column_rejected() {
    // second column has no entries, so the second pivot is zero
    let A = CscMatrix::new(2, 2, vec![0, 1, 1], vec![0], vec![1.]);
    assert_eq!(
        LdlFactorisation::new(&A, None).unwrap_err(),
        LdlError::NotPositiveDefinite { column: 1 }
    );
}

#[test]
fn test_missing_diagonal_rejected() {
    // A =
    //[ 4.0   1.0    ⋅ ]
    //[  ⋅     ⋅    1.0]
    //[  ⋅     ⋅    4.0]
    // column 1 has an off-diagonal but no diagonal entry, so the
    // triangle has as many entries as columns
    let A = CscMatrix::new(3, 3, vec![0, 1, 2, 4], vec![0, 0, 1, 2], vec![4., 1., 1., 4.]);
    assert_eq!(check_diagonal(&A), Err(LdlError::NotPositiveDefinite { column: 1 }));
    assert_eq!(
        amd_order(&A, 1.0).err(),
        Some(LdlError::NotPositiveDefinite { column: 1 })
    );
    assert_eq!(
        LdlFactorisation::new(&A, None).unwrap_err(),
        LdlError::NotPositiveDefinite { column: 1 }
    );

    // fewer entries than columns
    let A = CscMatrix::new(3, 3, vec![0, 1, 2, 2], vec![0, 1], vec![1., 1.]);
    assert_eq!(
        amd_order(&A, 1.0).err(),
        Some(LdlError::NotPositiveDefinite { column: 2 })
    );

    // a user supplied ordering does not skip the check
    let opts = LdlSettingsBuilder::default()
        .perm(vec![2, 1, 0])
        .build()
        .unwrap();
    assert_eq!(
        LdlFactorisation::new(&A, Some(opts)).unwrap_err(),
        LdlError::NotPositiveDefinite { column: 2 }
    );

    assert!(check_diagonal(&test_matrix_4x4()).is_ok());
}

#[test]
fn test_lower_triangular_rejected() {
    let A = test_matrix_4x4().transpose();
    assert_eq!(
        LdlFactorisation::new(&A, None).unwrap_err(),
        LdlError::NotUpperTriangular
    );
}

#[test]
fn test_empty_matrix() {
    let A = CscMatrix::<f64>::zeros((0, 0));
    let mut factors = LdlFactorisation::new(&A, None).unwrap();
    let mut b: [f64; 0] = [];
    factors.solve(&mut b);
    assert_eq!(factors.dim(), 0);
}
