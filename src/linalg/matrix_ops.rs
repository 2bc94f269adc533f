//! Determinant, inverse, rank, and integer powers

use log::debug;

use super::decompositions::lu_factor;
use super::helpers::{max_abs, validate_square};
use super::solvers::lu_solve_in_place;
use super::svd::jacobi_svd;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::options::SvdOptions;

/// Determinant via LU decomposition with partial pivoting
///
/// A singular matrix gives `0.0`, never an error.
pub fn det(a: &Matrix) -> Result<f64> {
    let n = validate_square("det", a)?;
    debug!("det: {}x{} matrix", n, n);

    let f = lu_factor(a.data(), n);
    let sign = if f.num_swaps % 2 == 0 { 1.0 } else { -1.0 };
    Ok((0..n).fold(sign, |acc, i| acc * f.lu[i * n + i]))
}

/// Matrix inverse via LU decomposition
///
/// Solves `A X = I` column by column. Fails with [`Error::Singular`] when a
/// pivot magnitude is at most `n * eps * max|A_ij|`.
pub fn inv(a: &Matrix) -> Result<Matrix> {
    let n = validate_square("inv", a)?;
    debug!("inv: {}x{} matrix", n, n);

    let f = lu_factor(a.data(), n);
    let threshold = (n as f64) * f64::EPSILON * max_abs(a.data());
    let singular = threshold == 0.0 || (0..n).any(|i| f.lu[i * n + i].abs() <= threshold);
    if singular {
        return Err(Error::Singular { op: "inv" });
    }

    let mut out = vec![0.0; n * n];
    let mut col = vec![0.0; n];
    for j in 0..n {
        col.fill(0.0);
        col[j] = 1.0;
        lu_solve_in_place(&f, n, &mut col);
        for i in 0..n {
            out[i * n + j] = col[i];
        }
    }

    Ok(Matrix::from_parts(a.shape(), out))
}

/// Numerical rank: number of singular values strictly greater than `tol`
///
/// When `tol` is `None` it defaults to `max(S) * max(rows, cols) * eps`.
pub fn matrix_rank(a: &Matrix, tol: Option<f64>) -> Result<usize> {
    if tol.is_some_and(f64::is_nan) {
        return Err(Error::InvalidArgument {
            arg: "tol",
            reason: "must not be NaN".to_string(),
        });
    }

    let (m, n) = a.shape().as_tuple();
    let s = jacobi_svd(a.data(), m, n, &SvdOptions::values_only()).s;
    let tol = tol.unwrap_or_else(|| {
        let s_max = s.first().copied().unwrap_or(0.0);
        s_max * (m.max(n) as f64) * f64::EPSILON
    });
    debug!("matrix_rank: {}x{} matrix, tol={:e}", m, n, tol);

    Ok(s.iter().filter(|&&v| v > tol).count())
}

/// Integer power of a square matrix
///
/// - `n == 0`: identity of the same order
/// - `n == 1`: an independent copy of `a`
/// - `n > 1`: binary exponentiation
/// - `n < 0`: `inv(a)` raised to `|n|`; fails when `a` is singular
pub fn matrix_power(a: &Matrix, n: i64) -> Result<Matrix> {
    let order = validate_square("matrix_power", a)?;
    debug!("matrix_power: {}x{} matrix, n={}", order, order, n);

    match n {
        0 => crate::construct::identity(order),
        1 => Ok(a.clone()),
        n if n > 0 => power_positive(a, n.unsigned_abs()),
        n => power_positive(&inv(a)?, n.unsigned_abs()),
    }
}

fn power_positive(a: &Matrix, mut e: u64) -> Result<Matrix> {
    debug_assert!(e >= 1);
    if e == 1 {
        return Ok(a.clone());
    }

    let mut base = a.clone();
    while e & 1 == 0 {
        base = base.matmul(&base)?;
        e >>= 1;
    }

    let mut acc = base.clone();
    e >>= 1;
    while e > 0 {
        base = base.matmul(&base)?;
        if e & 1 == 1 {
            acc = acc.matmul(&base)?;
        }
        e >>= 1;
    }
    Ok(acc)
}
