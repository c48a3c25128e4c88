#![allow(non_snake_case)]
use crate::algebra::*;

fn test_matrix_4x4_triu() -> CscMatrix<f64> {
    // A =
    //[ 4.0  -3.0   7.0    ⋅ ]
    //[  ⋅    8.0  -1.0    ⋅ ]
    //[  ⋅     ⋅    2.0  -3.0]
    //[  ⋅     ⋅     ⋅    1.0]
    let Ap = vec![0, 1, 3, 6, 8];
    let Ai = vec![0, 0, 1, 0, 1, 2, 2, 3];
    let Ax = vec![4., -3., 8., 7., -1., 2., -3., 1.];
    CscMatrix::new(4, 4, Ap, Ai, Ax)
}

fn test_matrix_3x4() -> CscMatrix<f64> {
    // A =
    //[-1.0  -17.0  6.0  10.0]
    //[ 3.0     ⋅   7.0    ⋅ ]
    //[  ⋅    -4.0   ⋅   -5.0]
    let Ap = vec![0, 2, 4, 6, 8];
    let Ai = vec![0, 1, 0, 2, 0, 1, 0, 2];
    let Ax = vec![-1., 3., -17., -4., 6., 7., 10., -5.];
    CscMatrix::new(3, 4, Ap, Ai, Ax)
}

#[test]
fn test_nrows_ncols_nnz_is_square() {
    let A = test_matrix_3x4();
    let B = test_matrix_4x4_triu();
    assert_eq!(A.nrows(), 3);
    assert_eq!(A.ncols(), 4);
    assert_eq!(B.nrows(), 4);
    assert_eq!(B.ncols(), 4);
    assert!(!A.is_square());
    assert!(B.is_square());
    assert_eq!(A.nnz(), 8);
    assert_eq!(B.nnz(), 8);
}

#[test]
fn test_check_format() {
    assert!(test_matrix_3x4().check_format().is_ok());

    // rows out of order within a column
    let A = CscMatrix::new(2, 1, vec![0, 2], vec![1, 0], vec![1., 2.]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowOrdering));

    // row index too big
    let A = CscMatrix::new(2, 1, vec![0, 1], vec![2], vec![1.]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    // decreasing colptr
    let A = CscMatrix {
        m: 2,
        n: 2,
        colptr: vec![0, 2, 1],
        rowval: vec![0],
        nzval: vec![1.],
    };
    assert!(A.check_format().is_err());
}

#[test]
fn test_triangles() {
    let A = test_matrix_4x4_triu();
    assert!(A.is_triu());
    assert!(!A.is_tril());

    let At = A.transpose();
    assert!(At.is_tril());
    assert!(!At.is_triu());
    assert!(At.check_format().is_ok());
    assert_eq!(At.transpose(), A);

    let D = CscMatrix::new(3, 3, vec![0, 1, 2, 3], vec![0, 1, 2], vec![1., 2., 3.]);
    assert!(D.is_triu() && D.is_tril());
}

#[test]
fn test_transpose_rectangular() {
    let A = test_matrix_3x4();
    let At = A.transpose();
    assert_eq!(At.size(), (4, 3));
    assert_eq!(At.get_entry((0, 1)), Some(3.));
    assert_eq!(At.get_entry((3, 2)), Some(-5.));
    assert_eq!(At.get_entry((1, 1)), None);
}

#[test]
fn test_symv() {
    let A = test_matrix_4x4_triu();
    let x = vec![1., 2., -3., -4.];
    let mut y = vec![0., 1., -1., 2.];
    let a = -2.;
    let b = 3.;

    A.sym().symv(&mut y, &x, a, b);
    assert_eq!(y, vec![46., -29., -25., -4.]);

    // same product from the lower triangle
    let mut y = vec![0., 1., -1., 2.];
    A.transpose().sym().symv(&mut y, &x, a, b);
    assert_eq!(y, vec![46., -29., -25., -4.]);
}
