//! Structural transforms: triangular extraction, transpose, diagonal, trace

use crate::matrix::{Matrix, Shape};

/// Copy of `a` with every entry strictly above the main diagonal set to zero
pub fn tril(a: &Matrix) -> Matrix {
    let n = a.cols();
    let mut out = a.to_vec();
    for i in 0..a.rows() {
        for j in (i + 1)..n {
            out[i * n + j] = 0.0;
        }
    }
    Matrix::from_parts(a.shape(), out)
}

/// Copy of `a` with every entry strictly below the main diagonal set to zero
pub fn triu(a: &Matrix) -> Matrix {
    let n = a.cols();
    let mut out = a.to_vec();
    for i in 0..a.rows() {
        for j in 0..i.min(n) {
            out[i * n + j] = 0.0;
        }
    }
    Matrix::from_parts(a.shape(), out)
}

/// Transpose: `out[j, i] = a[i, j]`
pub fn transpose(a: &Matrix) -> Matrix {
    let (m, n) = a.shape().as_tuple();
    let data = a.data();
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for j in 0..n {
            out[j * m + i] = data[i * n + j];
        }
    }
    Matrix::from_parts(Shape::new(n, m), out)
}

/// Main diagonal, length `min(rows, cols)`
pub fn diag(a: &Matrix) -> Vec<f64> {
    let n = a.cols();
    (0..a.shape().min_dim()).map(|i| a.data()[i * n + i]).collect()
}

/// Sum of the main diagonal; no squareness requirement
pub fn trace(a: &Matrix) -> f64 {
    let n = a.cols();
    let data = a.data();
    let mut sum = 0.0;
    for i in 0..a.shape().min_dim() {
        sum += data[i * n + i];
    }
    sum
}

/// Frobenius norm: `sqrt(sum(a[i, j]^2))`
pub fn frobenius_norm(a: &Matrix) -> f64 {
    a.data().iter().map(|v| v * v).sum::<f64>().sqrt()
}
