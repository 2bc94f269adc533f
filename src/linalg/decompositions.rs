//! LU, Cholesky, and QR decompositions
//!
//! The kernels work on row-major slices of any [`LinalgElement`]; the public
//! entry points wrap them for `f64` [`Matrix`] values.

use log::debug;

use super::helpers::validate_square;
use crate::dtype::LinalgElement;
use crate::error::{Error, Result};
use crate::matrix::{Matrix, Shape};

/// LU decomposition result: PA = LU
///
/// L is lower triangular with unit diagonal, U is upper triangular.
/// P is a permutation matrix (stored as pivot indices).
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    /// Lower triangular factor L (unit diagonal, stored in lower part)
    /// Upper triangular factor U (stored in upper part including diagonal)
    pub lu: Matrix,

    /// Pivot indices: at step i, row i was swapped with row `pivots[i]`
    pub pivots: Vec<usize>,

    /// Number of row swaps (for determinant sign)
    pub num_swaps: usize,
}

impl LuDecomposition {
    /// Whether some pivot of U is exactly zero
    pub fn is_singular(&self) -> bool {
        let n = self.lu.rows();
        (0..n).any(|i| self.lu[(i, i)] == 0.0)
    }

    /// Product of the pivots times the permutation parity
    pub fn determinant(&self) -> f64 {
        let n = self.lu.rows();
        let sign = if self.num_swaps % 2 == 0 { 1.0 } else { -1.0 };
        (0..n).fold(sign, |acc, i| acc * self.lu[(i, i)])
    }

    /// Unit lower triangular factor L
    pub fn l(&self) -> Matrix {
        let n = self.lu.rows();
        let lu = self.lu.data();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n..i * n + i].copy_from_slice(&lu[i * n..i * n + i]);
            data[i * n + i] = 1.0;
        }
        Matrix::from_parts(self.lu.shape(), data)
    }

    /// Upper triangular factor U
    pub fn u(&self) -> Matrix {
        crate::structure::triu(&self.lu)
    }

    /// Apply the row permutation P to `a`, giving `P @ a`
    pub fn permute(&self, a: &Matrix) -> Matrix {
        let cols = a.cols();
        let mut data = a.to_vec();
        for (i, &p) in self.pivots.iter().enumerate() {
            if p != i {
                for j in 0..cols {
                    data.swap(i * cols + j, p * cols + j);
                }
            }
        }
        Matrix::from_parts(a.shape(), data)
    }
}

/// QR decomposition result: A = QR
///
/// Q is orthogonal (Q^T @ Q = I), R is upper triangular.
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition {
    /// Orthogonal matrix Q [m, m]
    pub q: Matrix,

    /// Upper triangular matrix R [m, n]
    pub r: Matrix,
}

pub(crate) struct LuFactors<T> {
    pub lu: Vec<T>,
    pub pivots: Vec<usize>,
    pub num_swaps: usize,
}

/// LU decomposition with partial pivoting (Doolittle algorithm)
///
/// Never fails: a column whose candidate pivots are all zero is already
/// eliminated and is left as is, with a zero on the diagonal of U.
pub(crate) fn lu_factor<T: LinalgElement>(a: &[T], n: usize) -> LuFactors<T> {
    let mut lu = a.to_vec();
    let mut pivots = vec![0usize; n];
    let mut num_swaps = 0usize;

    for col in 0..n {
        // Find pivot: max absolute value in column col, rows col..n
        let mut pivot_row = col;
        let mut max_val = lu[col * n + col].abs_val();
        for row in (col + 1)..n {
            let val = lu[row * n + col].abs_val();
            if val > max_val {
                max_val = val;
                pivot_row = row;
            }
        }

        pivots[col] = pivot_row;

        if pivot_row != col {
            for j in 0..n {
                lu.swap(col * n + j, pivot_row * n + j);
            }
            num_swaps += 1;
        }

        let pivot = lu[col * n + col];
        if pivot.to_f64() == 0.0 {
            continue;
        }

        // Compute multipliers (L column)
        for row in (col + 1)..n {
            lu[row * n + col] = lu[row * n + col] / pivot;
        }

        // Update trailing submatrix
        for row in (col + 1)..n {
            let multiplier = lu[row * n + col];
            for j in (col + 1)..n {
                let update = multiplier * lu[col * n + j];
                lu[row * n + j] = lu[row * n + j] - update;
            }
        }
    }

    LuFactors {
        lu,
        pivots,
        num_swaps,
    }
}

/// Cholesky decomposition (Cholesky-Banachiewicz algorithm)
///
/// Reads only the lower triangle of `a`.
pub(crate) fn cholesky_factor<T: LinalgElement>(a: &[T], n: usize) -> Result<Vec<T>> {
    let mut l = vec![T::zero(); n * n];

    for i in 0..n {
        let mut sum_sq = T::zero();
        for k in 0..i {
            sum_sq = sum_sq + l[i * n + k] * l[i * n + k];
        }

        let diag = a[i * n + i] - sum_sq;
        let d = diag.to_f64();
        if d.is_nan() || d <= 0.0 {
            return Err(Error::NotPositiveDefinite { pivot: i });
        }
        l[i * n + i] = diag.sqrt_val();

        // Off-diagonal elements in column i
        for j in (i + 1)..n {
            let mut sum_prod = T::zero();
            for k in 0..i {
                sum_prod = sum_prod + l[j * n + k] * l[i * n + k];
            }
            l[j * n + i] = (a[j * n + i] - sum_prod) / l[i * n + i];
        }
    }

    Ok(l)
}

/// Householder QR factorization of an `m x n` matrix
///
/// R is kept explicitly; Q is kept as the sequence of unit reflectors
/// `H_k = I - 2 v_k v_k^T`, with `Q = H_0 H_1 ... H_{k-1}`.
pub(crate) struct HouseholderQr<T> {
    r: Vec<T>,
    reflectors: Vec<Option<Vec<T>>>,
    m: usize,
    n: usize,
}

impl<T: LinalgElement> HouseholderQr<T> {
    pub fn factor(a: &[T], m: usize, n: usize) -> Self {
        let k = m.min(n);
        let mut r = a.to_vec();
        let mut reflectors = Vec::with_capacity(k);

        for col in 0..k {
            let x_len = m - col;
            let x: Vec<T> = (0..x_len).map(|i| r[(col + i) * n + col]).collect();

            let norm_x = x.iter().fold(T::zero(), |acc, &v| acc + v * v).sqrt_val();
            if norm_x.to_f64() == 0.0 {
                reflectors.push(None);
                continue;
            }

            // alpha = -sign(x[0]) * ||x||
            let alpha = if x[0].to_f64() >= 0.0 {
                norm_x.neg_val()
            } else {
                norm_x
            };

            let mut v = x;
            v[0] = v[0] - alpha;
            let v_norm = v.iter().fold(T::zero(), |acc, &e| acc + e * e).sqrt_val();
            if v_norm.to_f64() == 0.0 {
                reflectors.push(None);
                continue;
            }
            for val in &mut v {
                *val = *val / v_norm;
            }

            // R[col:m, col+1:n] -= 2 * v @ (v^T @ R[col:m, col+1:n])
            let two = T::from_f64(2.0);
            for j in (col + 1)..n {
                let mut w = T::zero();
                for i in 0..x_len {
                    w = w + v[i] * r[(col + i) * n + j];
                }
                for i in 0..x_len {
                    let update = two * v[i] * w;
                    r[(col + i) * n + j] = r[(col + i) * n + j] - update;
                }
            }

            // The reflected column is exactly (alpha, 0, ..., 0)
            r[col * n + col] = alpha;
            for i in 1..x_len {
                r[(col + i) * n + col] = T::zero();
            }

            reflectors.push(Some(v));
        }

        Self {
            r,
            reflectors,
            m,
            n,
        }
    }

    /// Overwrite `b` (length m) with `Q^T b`.
    pub fn apply_qt(&self, b: &mut [T]) {
        debug_assert_eq!(b.len(), self.m);
        let two = T::from_f64(2.0);
        for (col, v) in self.reflectors.iter().enumerate() {
            let Some(v) = v else { continue };
            let mut dot = T::zero();
            for (i, &vi) in v.iter().enumerate() {
                dot = dot + vi * b[col + i];
            }
            for (i, &vi) in v.iter().enumerate() {
                b[col + i] = b[col + i] - two * dot * vi;
            }
        }
    }

    /// Explicit orthogonal factor Q [m, m]
    pub fn q(&self) -> Vec<T> {
        let m = self.m;
        let mut q = vec![T::zero(); m * m];
        for i in 0..m {
            q[i * m + i] = T::one();
        }

        // Q[:, col:m] = Q[:, col:m] @ (I - 2 v v^T)
        let two = T::from_f64(2.0);
        for (col, v) in self.reflectors.iter().enumerate() {
            let Some(v) = v else { continue };
            for row in 0..m {
                let mut dot = T::zero();
                for (i, &vi) in v.iter().enumerate() {
                    dot = dot + q[row * m + col + i] * vi;
                }
                for (i, &vi) in v.iter().enumerate() {
                    q[row * m + col + i] = q[row * m + col + i] - two * dot * vi;
                }
            }
        }
        q
    }

    /// Upper triangular factor R [m, n], row-major
    pub fn r(&self) -> &[T] {
        &self.r
    }

    /// `|R_ii|` for `i < min(m, n)`
    pub fn diagonal_magnitudes(&self) -> Vec<f64> {
        (0..self.m.min(self.n))
            .map(|i| self.r[i * self.n + i].abs_val().to_f64())
            .collect()
    }
}

/// LU decomposition with partial pivoting of a square matrix
///
/// Succeeds for singular input; see [`LuDecomposition::is_singular`].
pub fn lu(a: &Matrix) -> Result<LuDecomposition> {
    let n = validate_square("lu", a)?;
    debug!("lu: factoring {}x{} matrix", n, n);

    let f = lu_factor(a.data(), n);
    Ok(LuDecomposition {
        lu: Matrix::from_parts(a.shape(), f.lu),
        pivots: f.pivots,
        num_swaps: f.num_swaps,
    })
}

/// Cholesky factor L with `L @ L^T == A`
///
/// A must be square; symmetry is not checked and only the lower triangle is
/// read. Fails with [`Error::NotPositiveDefinite`] when a diagonal pivot is
/// not strictly positive.
pub fn cholesky(a: &Matrix) -> Result<Matrix> {
    let n = validate_square("cholesky", a)?;
    debug!("cholesky: factoring {}x{} matrix", n, n);

    let l = cholesky_factor(a.data(), n)?;
    Ok(Matrix::from_parts(a.shape(), l))
}

/// Householder QR decomposition with full Q
pub fn qr(a: &Matrix) -> Result<QrDecomposition> {
    let (m, n) = a.shape().as_tuple();
    debug!("qr: factoring {}x{} matrix", m, n);

    let f = HouseholderQr::factor(a.data(), m, n);
    Ok(QrDecomposition {
        q: Matrix::from_parts(Shape::new(m, m), f.q()),
        r: Matrix::from_parts(a.shape(), f.r().to_vec()),
    })
}
