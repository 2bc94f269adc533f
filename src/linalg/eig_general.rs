//! Eigenvalues of general (non-symmetric) real matrices
//!
//! Pipeline: optional balancing, Householder reduction to upper Hessenberg
//! form, then Francis double-shift QR iteration on the Hessenberg matrix.
//! Eigenvalues are returned in the order they appear on the diagonal of the
//! final quasi-triangular form.

use log::{debug, trace};

use super::helpers::validate_square;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::options::EigenOptions;

const RADIX: f64 = 2.0;

/// `|a|` with the sign of `b`, treating `b == 0` as positive
#[inline]
fn sign(a: f64, b: f64) -> f64 {
    if b >= 0.0 { a.abs() } else { -a.abs() }
}

/// Balance a square matrix in place by a diagonal similarity transform.
///
/// Rows and columns are scaled by powers of the radix so that their
/// off-diagonal norms become comparable; eigenvalues are unchanged and no
/// rounding error is introduced.
pub(crate) fn balance(a: &mut [f64], n: usize) {
    let sqrdx = RADIX * RADIX;
    let mut done = false;

    while !done {
        done = true;
        for i in 0..n {
            let mut c = 0.0;
            let mut r = 0.0;
            for j in (0..n).filter(|&j| j != i) {
                c += a[j * n + i].abs();
                r += a[i * n + j].abs();
            }
            if c == 0.0 || r == 0.0 || !c.is_finite() || !r.is_finite() {
                continue;
            }

            let s = c + r;
            let mut f = 1.0;
            let mut g = r / RADIX;
            while c < g {
                f *= RADIX;
                c *= sqrdx;
            }
            g = r * RADIX;
            while c > g {
                f /= RADIX;
                c /= sqrdx;
            }

            if (c + r) / f < 0.95 * s {
                done = false;
                let g = 1.0 / f;
                for j in 0..n {
                    a[i * n + j] *= g;
                }
                for j in 0..n {
                    a[j * n + i] *= f;
                }
            }
        }
    }
}

/// Reduce a square matrix to upper Hessenberg form using Householder
/// reflections, in place. Entries below the subdiagonal are set to zero.
pub(crate) fn hessenberg_reduction(h: &mut [f64], n: usize) {
    for k in 0..n.saturating_sub(2) {
        // Householder vector for column k, rows k+1..n
        let mut v: Vec<f64> = ((k + 1)..n).map(|i| h[i * n + k]).collect();
        let norm_sq: f64 = v.iter().map(|x| x * x).sum();
        if norm_sq == 0.0 {
            continue;
        }

        let norm = norm_sq.sqrt();
        let alpha = if v[0] >= 0.0 { -norm } else { norm };
        v[0] -= alpha;

        let v_norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if v_norm == 0.0 {
            continue;
        }
        for vi in &mut v {
            *vi /= v_norm;
        }

        // Left: H[k+1:n, :] -= 2 * v * (v^T @ H[k+1:n, :])
        for j in 0..n {
            let dot: f64 = v
                .iter()
                .enumerate()
                .map(|(i, vi)| vi * h[(k + 1 + i) * n + j])
                .sum();
            for (i, vi) in v.iter().enumerate() {
                h[(k + 1 + i) * n + j] -= 2.0 * vi * dot;
            }
        }

        // Right: H[:, k+1:n] -= 2 * (H[:, k+1:n] @ v) * v^T
        for i in 0..n {
            let dot: f64 = v
                .iter()
                .enumerate()
                .map(|(j, vj)| h[i * n + k + 1 + j] * vj)
                .sum();
            for (j, vj) in v.iter().enumerate() {
                h[i * n + k + 1 + j] -= 2.0 * dot * vj;
            }
        }

        h[(k + 1) * n + k] = alpha;
        for i in (k + 2)..n {
            h[i * n + k] = 0.0;
        }
    }
}

/// Francis double-shift QR on an upper Hessenberg matrix (destroyed).
///
/// Returns `(re, im)` per eigenvalue, indexed by diagonal position. A
/// complex conjugate pair occupies two consecutive positions with the
/// positive imaginary part first.
pub(crate) fn hessenberg_qr(
    a: &mut [f64],
    n: usize,
    max_iterations: usize,
) -> Result<Vec<(f64, f64)>> {
    let idx = |i: usize, j: usize| i * n + j;
    let mut wr = vec![0.0; n];
    let mut wi = vec![0.0; n];

    let mut anorm = 0.0;
    for i in 0..n {
        for j in i.saturating_sub(1)..n {
            anorm += a[idx(i, j)].abs();
        }
    }

    // Shift accumulated by exceptional shifts
    let mut t = 0.0;
    let mut nn = n as isize - 1;

    while nn >= 0 {
        let mut its = 0usize;
        loop {
            let nu = nn as usize;

            // Look for a single small subdiagonal element
            let mut l = nu;
            while l >= 1 {
                let mut s = a[idx(l - 1, l - 1)].abs() + a[idx(l, l)].abs();
                if s == 0.0 {
                    s = anorm;
                }
                if a[idx(l, l - 1)].abs() + s == s {
                    a[idx(l, l - 1)] = 0.0;
                    break;
                }
                l -= 1;
            }

            let mut x = a[idx(nu, nu)];
            if l == nu {
                // One root found
                wr[nu] = x + t;
                wi[nu] = 0.0;
                trace!("eig: real root at {} after {} iterations", nu, its);
                nn -= 1;
                break;
            }

            let mut y = a[idx(nu - 1, nu - 1)];
            let mut w = a[idx(nu, nu - 1)] * a[idx(nu - 1, nu)];
            if l + 1 == nu {
                // Two roots found
                let p = 0.5 * (y - x);
                let q = p * p + w;
                let z = q.abs().sqrt();
                x += t;
                if q >= 0.0 {
                    let z = p + sign(z, p);
                    wr[nu - 1] = x + z;
                    wr[nu] = if z != 0.0 { x - w / z } else { x + z };
                    wi[nu - 1] = 0.0;
                    wi[nu] = 0.0;
                } else {
                    wr[nu - 1] = x + p;
                    wr[nu] = x + p;
                    wi[nu - 1] = z;
                    wi[nu] = -z;
                }
                trace!("eig: root pair at {} after {} iterations", nu - 1, its);
                nn -= 2;
                break;
            }

            if its == max_iterations {
                return Err(Error::NoConvergence {
                    op: "matrix_eigen_values",
                    iterations: its,
                });
            }

            // Exceptional shift
            if its == 10 || its == 20 {
                t += x;
                for i in 0..=nu {
                    a[idx(i, i)] -= x;
                }
                let s = a[idx(nu, nu - 1)].abs() + a[idx(nu - 1, nu - 2)].abs();
                x = 0.75 * s;
                y = x;
                w = -0.4375 * s * s;
            }
            its += 1;

            // Look for two consecutive small subdiagonal elements
            let mut p: f64;
            let mut q: f64;
            let mut r: f64;
            let mut m = nu - 2;
            loop {
                let z = a[idx(m, m)];
                let rr = x - z;
                let ss = y - z;
                p = (rr * ss - w) / a[idx(m + 1, m)] + a[idx(m, m + 1)];
                q = a[idx(m + 1, m + 1)] - z - rr - ss;
                r = a[idx(m + 2, m + 1)];
                let s = p.abs() + q.abs() + r.abs();
                p /= s;
                q /= s;
                r /= s;
                if m == l {
                    break;
                }
                let u = a[idx(m, m - 1)].abs() * (q.abs() + r.abs());
                let v = p.abs() * (a[idx(m - 1, m - 1)].abs() + z.abs() + a[idx(m + 1, m + 1)].abs());
                if u + v == v {
                    break;
                }
                m -= 1;
            }

            for i in (m + 2)..=nu {
                a[idx(i, i - 2)] = 0.0;
                if i != m + 2 {
                    a[idx(i, i - 3)] = 0.0;
                }
            }

            // Double QR step on rows l..=nu and columns m..=nu
            for k in m..nu {
                if k != m {
                    p = a[idx(k, k - 1)];
                    q = a[idx(k + 1, k - 1)];
                    r = if k + 1 != nu { a[idx(k + 2, k - 1)] } else { 0.0 };
                    x = p.abs() + q.abs() + r.abs();
                    if x != 0.0 {
                        p /= x;
                        q /= x;
                        r /= x;
                    }
                }

                let s = sign((p * p + q * q + r * r).sqrt(), p);
                if s == 0.0 {
                    continue;
                }

                if k == m {
                    if l != m {
                        a[idx(k, k - 1)] = -a[idx(k, k - 1)];
                    }
                } else {
                    a[idx(k, k - 1)] = -s * x;
                }
                p += s;
                x = p / s;
                y = q / s;
                let z = r / s;
                q /= p;
                r /= p;

                // Row modification
                for j in k..=nu {
                    let mut pp = a[idx(k, j)] + q * a[idx(k + 1, j)];
                    if k + 1 != nu {
                        pp += r * a[idx(k + 2, j)];
                        a[idx(k + 2, j)] -= pp * z;
                    }
                    a[idx(k + 1, j)] -= pp * y;
                    a[idx(k, j)] -= pp * x;
                }

                // Column modification
                let mmin = nu.min(k + 3);
                for i in l..=mmin {
                    let mut pp = x * a[idx(i, k)] + y * a[idx(i, k + 1)];
                    if k + 1 != nu {
                        pp += z * a[idx(i, k + 2)];
                        a[idx(i, k + 2)] -= pp * r;
                    }
                    a[idx(i, k + 1)] -= pp * q;
                    a[idx(i, k)] -= pp;
                }
            }
        }
    }

    Ok(wr.into_iter().zip(wi).collect())
}

/// Eigenvalues of a square matrix with default options
///
/// Returns `2 * n` values: `(re, im)` interleaved per eigenvalue.
pub fn matrix_eigen_values(a: &Matrix) -> Result<Vec<f64>> {
    matrix_eigen_values_with(a, &EigenOptions::default())
}

/// Eigenvalues of a square matrix with explicit options
///
/// Fails with [`Error::InvalidArgument`] when `a` has a NaN or infinite entry.
pub fn matrix_eigen_values_with(a: &Matrix, opts: &EigenOptions) -> Result<Vec<f64>> {
    let n = validate_square("matrix_eigen_values", a)?;
    if a.data().iter().any(|x| !x.is_finite()) {
        return Err(Error::InvalidArgument {
            arg: "a",
            reason: "entries must be finite".to_string(),
        });
    }
    debug!(
        "matrix_eigen_values: {}x{} matrix (balance={})",
        n, n, opts.balance
    );

    let mut h = a.to_vec();
    if opts.balance {
        balance(&mut h, n);
    }
    hessenberg_reduction(&mut h, n);

    let roots = hessenberg_qr(&mut h, n, opts.max_iterations)?;
    Ok(roots.into_iter().flat_map(|(re, im)| [re, im]).collect())
}
