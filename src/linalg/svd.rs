//! Singular Value Decomposition (SVD) using the one-sided Jacobi algorithm

use log::{debug, trace, warn};

use super::jacobi::{
    JacobiRotation, apply_rotation_to_columns, argsort_desc, column_norm, complete_orthonormal,
    compute_gram_elements, identity_matrix,
};
use crate::dtype::LinalgElement;
use crate::error::Result;
use crate::matrix::{Matrix, Shape};
use crate::options::SvdOptions;

/// Singular Value Decomposition result: A = U @ diag(S) @ V^T
#[derive(Debug, Clone, PartialEq)]
pub struct Svd {
    /// Left singular vectors: [m, m] (full) or [m, k] (thin); `None` when
    /// only singular values were requested
    pub u: Option<Matrix>,

    /// Singular values [k], k = min(m, n), non-negative and sorted descending
    pub s: Vec<f64>,

    /// Right singular vectors as columns: [n, n] (full) or [n, k] (thin)
    pub v: Option<Matrix>,
}

impl Svd {
    /// V^T, the transpose of [`Svd::v`]
    pub fn vt(&self) -> Option<Matrix> {
        self.v.as_ref().map(crate::structure::transpose)
    }
}

/// Raw factors in row-major buffers.
pub(crate) struct SvdFactors<T> {
    pub u: Option<(Vec<T>, usize)>,
    pub s: Vec<T>,
    pub v: Option<(Vec<T>, usize)>,
}

/// One-sided Jacobi SVD
///
/// Algorithm:
/// 1. If m < n: work on A^T and swap the roles of U and V at the end
/// 2. Initialize: B = A (working copy), V = I_n (skipped without U/V)
/// 3. Sweep over all column pairs (p, q), p < q:
///    - Gram elements a_pp, a_qq, a_pq = B[:,p]·B[:,q]
///    - If |a_pq| > tol * sqrt(a_pp * a_qq): rotate B (and V) columns
///    - Converged once a whole sweep performs no rotation
/// 4. Extract: S[j] = ||B[:,j]||, U[:,j] = B[:,j] / S[j]
/// 5. Sort S descending and reorder U and V columns accordingly
/// 6. Columns for (numerically) zero singular values, and any extra columns
///    of a full basis, are completed to an orthonormal set
pub(crate) fn jacobi_svd<T: LinalgElement>(
    a: &[T],
    m: usize,
    n: usize,
    opts: &SvdOptions,
) -> SvdFactors<T> {
    let transpose = m < n;
    let (work_m, work_n) = if transpose { (n, m) } else { (m, n) };

    let mut b: Vec<T> = if transpose {
        let mut bt = vec![T::zero(); work_m * work_n];
        for i in 0..m {
            for j in 0..n {
                bt[j * work_n + i] = a[i * n + j];
            }
        }
        bt
    } else {
        a.to_vec()
    };

    let mut v: Option<Vec<T>> = opts.compute_uv.then(|| identity_matrix(work_n));

    let eps = T::epsilon_val();
    let tol = (work_n as f64) * eps;

    let mut converged = false;
    let mut sweeps = 0;
    while sweeps < opts.max_sweeps {
        sweeps += 1;
        let mut rotations = 0usize;

        for p in 0..work_n {
            for q in (p + 1)..work_n {
                let (a_pp, a_qq, a_pq) = compute_gram_elements(&b, work_m, work_n, p, q);
                let (a_pp, a_qq, a_pq) = (a_pp.to_f64(), a_qq.to_f64(), a_pq.to_f64());

                if a_pq.abs() <= tol * (a_pp * a_qq).sqrt() {
                    continue;
                }

                let rot = JacobiRotation::compute(a_pp, a_qq, a_pq);
                apply_rotation_to_columns(&mut b, work_m, work_n, p, q, &rot);
                if let Some(v) = v.as_mut() {
                    apply_rotation_to_columns(v, work_n, work_n, p, q, &rot);
                }
                rotations += 1;
            }
        }

        trace!("svd: sweep {} applied {} rotations", sweeps, rotations);
        if rotations == 0 {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            "svd: no convergence after {} sweeps on {}x{} matrix, returning current estimate",
            sweeps, m, n
        );
    }

    let norms: Vec<T> = (0..work_n)
        .map(|j| column_norm(&b, work_m, work_n, j))
        .collect();
    let order = argsort_desc(&norms);
    let s: Vec<T> = order.iter().map(|&j| norms[j]).collect();

    let Some(v) = v else {
        return SvdFactors {
            u: None,
            s,
            v: None,
        };
    };

    // Left factor of the working matrix: W [work_m, work_n] (or wider, full)
    let s_max = s.first().map_or(0.0, |x| x.to_f64());
    let cutoff = s_max * (work_m as f64) * eps;
    let w_cols = if transpose {
        if opts.full_matrices { n } else { m }
    } else if opts.full_matrices {
        m
    } else {
        n
    };

    let mut w = vec![T::zero(); work_m * w_cols];
    let mut valid = vec![false; w_cols];
    for (new_j, &old_j) in order.iter().enumerate() {
        let sj = norms[old_j];
        let sv = sj.to_f64();
        if sv > cutoff && sv > 0.0 {
            for i in 0..work_m {
                w[i * w_cols + new_j] = b[i * work_n + old_j] / sj;
            }
            valid[new_j] = true;
        }
    }
    complete_orthonormal(&mut w, work_m, w_cols, &mut valid);

    // Right factor of the working matrix: always square [work_n, work_n]
    let mut vw = vec![T::zero(); work_n * work_n];
    for (new_j, &old_j) in order.iter().enumerate() {
        for i in 0..work_n {
            vw[i * work_n + new_j] = v[i * work_n + old_j];
        }
    }

    // A^T = W S Vw^T  =>  A = Vw S W^T
    let (u, v) = if transpose {
        ((vw, work_n), (w, w_cols))
    } else {
        ((w, w_cols), (vw, work_n))
    };

    SvdFactors {
        u: Some(u),
        s,
        v: Some(v),
    }
}

/// SVD with default options (full matrices, U and V computed)
pub fn svd(a: &Matrix) -> Result<Svd> {
    svd_with(a, &SvdOptions::default())
}

/// SVD with explicit options
///
/// With `compute_uv == false` the rotations are not accumulated at all and
/// `u`/`v` are `None`.
pub fn svd_with(a: &Matrix, opts: &SvdOptions) -> Result<Svd> {
    let (m, n) = a.shape().as_tuple();
    debug!(
        "svd: {}x{} matrix (full_matrices={}, compute_uv={})",
        m, n, opts.full_matrices, opts.compute_uv
    );

    let f = jacobi_svd(a.data(), m, n, opts);
    let to_matrix = |(data, cols): (Vec<f64>, usize)| {
        let rows = data.len() / cols;
        Matrix::from_parts(Shape::new(rows, cols), data)
    };

    Ok(Svd {
        u: f.u.map(to_matrix),
        s: f.s,
        v: f.v.map(to_matrix),
    })
}
