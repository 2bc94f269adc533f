//! Common test utilities
#![allow(dead_code)]

use denso::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Seeded RNG so failures are reproducible
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Matrix with entries drawn uniformly from [-1, 1)
pub fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    Matrix::from_fn((rows, cols), |_, _| rng.random_range(-1.0..1.0)).unwrap()
}

/// Random matrix with `n + 1` added to the diagonal (strictly diagonally dominant)
pub fn random_nonsingular(rng: &mut StdRng, n: usize) -> Matrix {
    Matrix::from_fn(n, |i, j| {
        let v: f64 = rng.random_range(-1.0..1.0);
        if i == j { v + n as f64 + 1.0 } else { v }
    })
    .unwrap()
}

/// Random symmetric positive-definite matrix `B B^T + n I`
pub fn random_spd(rng: &mut StdRng, n: usize) -> Matrix {
    let b = random_matrix(rng, n, n);
    let bbt = b.matmul(&denso::transpose(&b)).unwrap();
    Matrix::from_fn(n, |i, j| bbt[(i, j)] + if i == j { n as f64 } else { 0.0 }).unwrap()
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two matrices have the same shape and close elements
pub fn assert_matrix_close(a: &Matrix, b: &Matrix, tol: f64, msg: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", msg);
    assert_allclose_f64(a.data(), b.data(), 0.0, tol, msg);
}

/// Check if a square matrix is close to identity
pub fn assert_near_identity(m: &Matrix, tol: f64, msg: &str) {
    assert!(m.is_square(), "{}: not square", msg);
    let n = m.rows();
    for i in 0..n {
        for j in 0..n {
            let expected = if i == j { 1.0 } else { 0.0 };
            let actual = m[(i, j)];
            let diff = (actual - expected).abs();
            assert!(
                diff <= tol,
                "{}: element [{},{}] differs: {} vs {} (diff={})",
                msg,
                i,
                j,
                actual,
                expected,
                diff
            );
        }
    }
}

/// Check `Q^T Q ≈ I`
pub fn assert_orthonormal_columns(q: &Matrix, tol: f64, msg: &str) {
    let qtq = denso::transpose(q).matmul(q).unwrap();
    assert_near_identity(&qtq, tol, msg);
}

/// Check if singular values are in descending order
pub fn assert_descending(s: &[f64], msg: &str) {
    for i in 1..s.len() {
        assert!(
            s[i - 1] >= s[i],
            "{}: s[{}]={} should be >= s[{}]={}",
            msg,
            i - 1,
            s[i - 1],
            i,
            s[i]
        );
    }
}
