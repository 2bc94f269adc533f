//! Integration tests for Singular Value Decomposition (SVD) and rank
//!
//! Tests verify:
//! - Reconstruction: A ≈ U @ diag(S) @ V^T, full and thin
//! - Orthogonality: U^T @ U ≈ I, V^T @ V ≈ I
//! - Singular values non-negative and in descending order
//! - compute_uv = false skips the factors
//! - Rank thresholds

mod common;

use common::{
    assert_allclose_f64, assert_descending, assert_matrix_close, assert_orthonormal_columns,
    init_logging, random_matrix, rng,
};
use denso::{
    Matrix, Svd, SvdOptions, diagflat, eye, identity, matrix_mul, matrix_rank, ones, svd,
    svd_with, transpose, zeros,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// U[:, :k] @ diag(S) @ V[:, :k]^T
fn reconstruct(f: &Svd) -> Matrix {
    let u = f.u.as_ref().unwrap();
    let v = f.v.as_ref().unwrap();
    let k = f.s.len();

    let u_k = Matrix::from_fn((u.rows(), k), |i, j| u[(i, j)] * f.s[j]).unwrap();
    let v_k = Matrix::from_fn((v.rows(), k), |i, j| v[(i, j)]).unwrap();
    matrix_mul(&u_k, &transpose(&v_k)).unwrap()
}

fn check_decomposition(a: &Matrix, f: &Svd, full: bool, msg: &str) {
    let (m, n) = a.shape().as_tuple();
    let k = m.min(n);
    let u = f.u.as_ref().unwrap();
    let v = f.v.as_ref().unwrap();

    assert_eq!(f.s.len(), k, "{}: S length", msg);
    if full {
        assert_eq!(u.shape().as_tuple(), (m, m), "{}: U shape", msg);
        assert_eq!(v.shape().as_tuple(), (n, n), "{}: V shape", msg);
    } else {
        assert_eq!(u.shape().as_tuple(), (m, k), "{}: U shape", msg);
        assert_eq!(v.shape().as_tuple(), (n, k), "{}: V shape", msg);
    }

    assert!(f.s.iter().all(|&s| s >= 0.0), "{}: S non-negative", msg);
    assert_descending(&f.s, msg);
    assert_orthonormal_columns(u, 1e-10, msg);
    assert_orthonormal_columns(v, 1e-10, msg);
    assert_matrix_close(&reconstruct(f), a, 1e-10, msg);
}

// ============================================================================
// Basic SVD Tests
// ============================================================================

#[test]
fn test_svd_2x2() {
    init_logging();
    let a = Matrix::from_rows(&[[3.0, 1.0], [1.0, 3.0]]).unwrap();
    let f = svd(&a).unwrap();

    // Known singular values for [[3,1],[1,3]]: 4 and 2
    assert_allclose_f64(&f.s, &[4.0, 2.0], 0.0, 1e-12, "singular values");
    check_decomposition(&a, &f, true, "2x2");
}

#[test]
fn test_svd_random_shapes_full_and_thin() {
    let mut rng = rng(41);
    for (m, n) in [(1, 1), (1, 5), (5, 1), (3, 3), (6, 4), (4, 6), (10, 3), (3, 10)] {
        let a = random_matrix(&mut rng, m, n);
        let msg = format!("{}x{}", m, n);

        let full = svd(&a).unwrap();
        check_decomposition(&a, &full, true, &format!("{} full", msg));

        let thin = svd_with(&a, &SvdOptions::thin()).unwrap();
        check_decomposition(&a, &thin, false, &format!("{} thin", msg));

        assert_allclose_f64(&full.s, &thin.s, 1e-12, 1e-12, "full vs thin S");
    }
}

#[test]
fn test_svd_tall_full_basis() {
    let mut rng = rng(47);
    let a = random_matrix(&mut rng, 300, 2);
    let f = svd(&a).unwrap();
    check_decomposition(&a, &f, true, "300x2 full");

    // Rank one: 399 of the 400 columns of U come from basis completion
    let b = ones((400, 1)).unwrap();
    let f = svd(&b).unwrap();
    assert_allclose_f64(&f.s, &[20.0], 0.0, 1e-10, "400x1 singular value");
    check_decomposition(&b, &f, true, "400x1 full");

    let z = zeros(200).unwrap();
    let f = svd(&z).unwrap();
    assert!(f.s.iter().all(|&s| s == 0.0));
    assert_orthonormal_columns(f.u.as_ref().unwrap(), 1e-12, "200x200 zero U");
}

#[test]
fn test_svd_vt_is_transpose() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    let f = svd_with(&a, &SvdOptions::thin()).unwrap();
    let vt = f.vt().unwrap();
    assert_eq!(vt, transpose(f.v.as_ref().unwrap()));
}

#[test]
fn test_svd_values_only_matches_full() {
    let mut rng = rng(43);
    let a = random_matrix(&mut rng, 7, 5);
    let values = svd_with(&a, &SvdOptions::values_only()).unwrap();
    assert!(values.u.is_none() && values.v.is_none());

    let full = svd(&a).unwrap();
    assert_allclose_f64(&values.s, &full.s, 1e-12, 1e-12, "S only vs full");
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_svd_identity() {
    let a = identity(4).unwrap();
    let f = svd(&a).unwrap();
    assert_eq!(f.s, vec![1.0; 4]);
    check_decomposition(&a, &f, true, "identity");
}

#[test]
fn test_svd_zero_matrix() {
    let a = zeros((3, 2)).unwrap();
    let f = svd(&a).unwrap();
    assert_eq!(f.s, vec![0.0, 0.0]);
    check_decomposition(&a, &f, true, "zero");
}

#[test]
fn test_svd_rank_one() {
    let a = ones((4, 3)).unwrap();
    let f = svd(&a).unwrap();
    assert!((f.s[0] - 12.0f64.sqrt()).abs() < 1e-12);
    assert!(f.s[1..].iter().all(|&s| s < 1e-12));
    check_decomposition(&a, &f, true, "rank one");
}

#[test]
fn test_svd_rectangular_eye() {
    let a = eye(2, 4).unwrap();
    let f = svd(&a).unwrap();
    assert_eq!(f.s, vec![1.0, 1.0]);
    check_decomposition(&a, &f, true, "eye(2, 4)");
}

// ============================================================================
// Rank
// ============================================================================

#[test]
fn test_rank_scenarios() {
    assert_eq!(matrix_rank(&ones((1, 4)).unwrap(), None).unwrap(), 1);
    assert_eq!(matrix_rank(&diagflat(&[1.0; 4]).unwrap(), None).unwrap(), 4);

    let a = diagflat(&[1.0, 1.0, 1.0, 0.3]).unwrap();
    assert_eq!(matrix_rank(&a, None).unwrap(), 4);
    assert_eq!(matrix_rank(&a, Some(0.2)).unwrap(), 4);
    assert_eq!(matrix_rank(&a, Some(0.3)).unwrap(), 3);
}

#[test]
fn test_rank_of_product_is_bounded() {
    let mut rng = rng(47);
    // (6x2) @ (2x5) has rank 2
    let a = random_matrix(&mut rng, 6, 2);
    let b = random_matrix(&mut rng, 2, 5);
    let c = matrix_mul(&a, &b).unwrap();
    assert_eq!(matrix_rank(&c, None).unwrap(), 2);
}

#[test]
fn test_rank_monotone_in_tol() {
    let mut rng = rng(53);
    let a = random_matrix(&mut rng, 5, 5);
    let mut last = usize::MAX;
    for tol in [0.0, 0.01, 0.1, 0.5, 1.0, 2.0, 10.0] {
        let r = matrix_rank(&a, Some(tol)).unwrap();
        assert!(r <= last, "rank must not increase with tol");
        last = r;
    }
    assert_eq!(last, 0);
}
