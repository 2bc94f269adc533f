//! Linear system solvers (LU for inversion, Householder QR for Ax = b)

use log::debug;

use super::decompositions::{HouseholderQr, LuFactors};
use crate::dtype::LinalgElement;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Solve `A x = b` in place from LU factors of a square `n x n` matrix.
pub(crate) fn lu_solve_in_place<T: LinalgElement>(f: &LuFactors<T>, n: usize, b: &mut [T]) {
    // Apply permutation to b
    for (i, &p) in f.pivots.iter().enumerate() {
        if p != i {
            b.swap(i, p);
        }
    }

    // Forward substitution: L y = Pb (unit diagonal)
    for i in 1..n {
        let mut sum = b[i];
        for j in 0..i {
            sum = sum - f.lu[i * n + j] * b[j];
        }
        b[i] = sum;
    }

    // Backward substitution: U x = y
    back_substitute(&f.lu, n, n, b);
}

/// Solve the leading `k x k` upper triangle of `r` (row stride `ld`) in place.
pub(crate) fn back_substitute<T: LinalgElement>(r: &[T], ld: usize, k: usize, b: &mut [T]) {
    for i in (0..k).rev() {
        let mut sum = b[i];
        for j in (i + 1)..k {
            sum = sum - r[i * ld + j] * b[j];
        }
        b[i] = sum / r[i * ld + i];
    }
}

fn qr_solve(op: &'static str, a: &Matrix, b: &[f64], rcond: Option<f64>) -> Result<Vec<f64>> {
    let (m, n) = a.shape().as_tuple();
    if b.len() != m {
        return Err(Error::shape_mismatch(op, (m, n), (b.len(), 1)));
    }
    debug!("{}: {}x{} system", op, m, n);

    let f = HouseholderQr::factor(a.data(), m, n);

    if let Some(rcond) = rcond {
        let diag = f.diagonal_magnitudes();
        let max = diag.iter().copied().fold(0.0f64, f64::max);
        let min = diag.iter().copied().fold(f64::INFINITY, f64::min);
        if min.is_nan() || min <= rcond * max {
            return Err(Error::Singular { op });
        }
    }

    // x = R^{-1} Q^T b over the leading min(m, n) unknowns; the rest stay zero
    let mut c = b.to_vec();
    f.apply_qt(&mut c);

    let k = m.min(n);
    let mut x = vec![0.0; n];
    x[..k].copy_from_slice(&c[..k]);
    back_substitute(f.r(), n, k, &mut x);
    Ok(x)
}

/// Solve `A x = b` via Householder QR
///
/// `b` has one entry per equation, so it must satisfy `b.len() == A.rows()`,
/// not `A.cols()`. The two coincide for square `A`. For a non-square `A` a
/// `b` sized by `A.cols()` is a [`Error::ShapeMismatch`]. Returns x of length
/// `A.cols()`. For a tall `A` the result is the least-squares solution. No conditioning check is
/// made: a numerically singular `A` yields an unstable or non-finite result
/// rather than an error. See [`matrix_solve_linear_checked`].
pub fn matrix_solve_linear(a: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
    qr_solve("matrix_solve_linear", a, b, None)
}

/// Like [`matrix_solve_linear`], but fails with [`Error::Singular`] when
/// `min|R_ii| <= rcond * max|R_ii|`.
pub fn matrix_solve_linear_checked(a: &Matrix, b: &[f64], rcond: f64) -> Result<Vec<f64>> {
    if !rcond.is_finite() || rcond < 0.0 {
        return Err(Error::InvalidArgument {
            arg: "rcond",
            reason: format!("must be finite and non-negative, got {}", rcond),
        });
    }
    qr_solve("matrix_solve_linear_checked", a, b, Some(rcond))
}
