//! Jacobi rotation utilities for the one-sided SVD
//!
//! The rotation parameters use the LAPACK formula to avoid catastrophic
//! cancellation when the two diagonal entries are close.

use super::decompositions::HouseholderQr;
use crate::dtype::LinalgElement;

/// Jacobi rotation parameters (cosine and sine of rotation angle).
///
/// ```text
/// J = [ c  s ]
///     [-s  c ]
/// ```
#[derive(Debug, Clone, Copy)]
pub(crate) struct JacobiRotation {
    /// Cosine of rotation angle
    pub c: f64,
    /// Sine of rotation angle
    pub s: f64,
}

impl JacobiRotation {
    /// Rotation that zeroes the off-diagonal of a 2x2 symmetric Gram block.
    ///
    /// ```text
    /// τ = (a_qq - a_pp) / (2 * a_pq)
    /// t = sign(τ) / (|τ| + sqrt(1 + τ²))
    /// c = 1 / sqrt(1 + t²)
    /// s = t * c
    /// ```
    #[inline]
    pub fn compute(a_pp: f64, a_qq: f64, a_pq: f64) -> Self {
        let tau_num = a_qq - a_pp;
        let tau_den = 2.0 * a_pq;

        if tau_den.abs() < 1e-300 {
            return Self { c: 1.0, s: 0.0 };
        }

        let tau = tau_num / tau_den;
        let t = if tau >= 0.0 {
            1.0 / (tau + (1.0 + tau * tau).sqrt())
        } else {
            -1.0 / (-tau + (1.0 + tau * tau).sqrt())
        };

        let c = 1.0 / (1.0 + t * t).sqrt();
        Self { c, s: t * c }
    }

    #[inline]
    fn typed<T: LinalgElement>(&self) -> (T, T) {
        (T::from_f64(self.c), T::from_f64(self.s))
    }
}

/// Apply a rotation to columns `p` and `q` of a row-major `rows x cols` buffer.
///
/// Computes: `[col_p', col_q'] = [col_p, col_q] @ [[c, s], [-s, c]]`
#[inline]
pub(crate) fn apply_rotation_to_columns<T: LinalgElement>(
    data: &mut [T],
    rows: usize,
    cols: usize,
    p: usize,
    q: usize,
    rot: &JacobiRotation,
) {
    let (c, s): (T, T) = rot.typed();

    for i in 0..rows {
        let idx_p = i * cols + p;
        let idx_q = i * cols + q;

        let val_p = data[idx_p];
        let val_q = data[idx_q];

        data[idx_p] = c * val_p - s * val_q;
        data[idx_q] = s * val_p + c * val_q;
    }
}

/// Gram elements of columns `p` and `q`: `(‖b_p‖², ‖b_q‖², b_p · b_q)`
#[inline]
pub(crate) fn compute_gram_elements<T: LinalgElement>(
    b: &[T],
    rows: usize,
    cols: usize,
    p: usize,
    q: usize,
) -> (T, T, T) {
    let mut a_pp = T::zero();
    let mut a_qq = T::zero();
    let mut a_pq = T::zero();

    for i in 0..rows {
        let bp = b[i * cols + p];
        let bq = b[i * cols + q];
        a_pp = a_pp + bp * bp;
        a_qq = a_qq + bq * bq;
        a_pq = a_pq + bp * bq;
    }

    (a_pp, a_qq, a_pq)
}

/// Euclidean norm of column `j`
#[inline]
pub(crate) fn column_norm<T: LinalgElement>(data: &[T], rows: usize, cols: usize, j: usize) -> T {
    let mut norm_sq = T::zero();
    for i in 0..rows {
        let val = data[i * cols + j];
        norm_sq = norm_sq + val * val;
    }
    norm_sq.sqrt_val()
}

/// Sort indices by value (descending). NaN compares equal.
#[inline]
pub(crate) fn argsort_desc<T: LinalgElement>(values: &[T]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&i, &j| {
        values[j]
            .to_f64()
            .partial_cmp(&values[i].to_f64())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

/// Identity matrix [n × n], row-major.
#[inline]
pub(crate) fn identity_matrix<T: LinalgElement>(n: usize) -> Vec<T> {
    let mut result = vec![T::zero(); n * n];
    for i in 0..n {
        result[i * n + i] = T::one();
    }
    result
}

/// Replace every column not flagged in `valid` by a unit vector orthogonal
/// to all valid columns.
///
/// Valid columns must already be orthonormal and `cols <= rows`. The
/// replacements are the trailing columns of Q from a Householder QR of the
/// valid columns, which span their orthogonal complement.
pub(crate) fn complete_orthonormal<T: LinalgElement>(
    data: &mut [T],
    rows: usize,
    cols: usize,
    valid: &mut [bool],
) {
    debug_assert!(cols <= rows);
    debug_assert_eq!(valid.len(), cols);

    let kept: Vec<usize> = (0..cols).filter(|&c| valid[c]).collect();
    if kept.len() == cols {
        return;
    }

    let k = kept.len();
    let mut basis = vec![T::zero(); rows * k];
    for (dst, &src) in kept.iter().enumerate() {
        for i in 0..rows {
            basis[i * k + dst] = data[i * cols + src];
        }
    }

    let q = HouseholderQr::factor(&basis, rows, k).q();
    let missing = (0..cols).filter(|&c| !valid[c]);
    for (j, qc) in missing.zip(k..rows) {
        for i in 0..rows {
            data[i * cols + j] = q[i * rows + qc];
        }
    }
    valid.fill(true);
}
