//! Matrix multiplication kernels
//!
//! Row-major, contiguous, no leading-dimension strides. With the `rayon`
//! feature the output rows are distributed across the thread pool once the
//! product is large enough to amortize the scheduling cost. Each output row is
//! computed by the same serial loop either way, so results do not depend on
//! the feature.

use crate::dtype::Element;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Minimum `m * n * k` before rows are split across threads
#[cfg(feature = "rayon")]
const PARALLEL_MIN_FLOPS: usize = 1 << 18;

/// Minimum number of output rows handed to one rayon task
#[cfg(feature = "rayon")]
const PARALLEL_MIN_ROWS: usize = 8;

/// Matrix multiplication: `out = a @ b`
///
/// # Arguments
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `out` - Output matrix C (m × n), row-major; overwritten
/// * `m`, `n`, `k` - Matrix dimensions
pub fn matmul_kernel<T: Element>(a: &[T], b: &[T], out: &mut [T], m: usize, n: usize, k: usize) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(out.len(), m * n);

    #[cfg(feature = "rayon")]
    {
        if m > 1 && m * n * k >= PARALLEL_MIN_FLOPS {
            out.par_chunks_mut(n)
                .with_min_len(PARALLEL_MIN_ROWS)
                .enumerate()
                .for_each(|(i, out_row)| matmul_row(&a[i * k..(i + 1) * k], b, out_row, n));
            return;
        }
    }

    for (i, out_row) in out.chunks_mut(n).enumerate() {
        matmul_row(&a[i * k..(i + 1) * k], b, out_row, n);
    }
}

/// One output row: `out_row = a_row @ b`
///
/// ikj order: streams through B row by row for cache locality.
#[inline]
fn matmul_row<T: Element>(a_row: &[T], b: &[T], out_row: &mut [T], n: usize) {
    for v in out_row.iter_mut() {
        *v = T::zero();
    }
    for (kk, &a_val) in a_row.iter().enumerate() {
        let b_row = &b[kk * n..(kk + 1) * n];
        for (o, &b_val) in out_row.iter_mut().zip(b_row) {
            *o = *o + a_val * b_val;
        }
    }
}

/// Multiplication against a transposed right operand: `out = a @ b^T`
///
/// # Arguments
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (n × k), row-major
/// * `out` - Output matrix C (m × n), row-major; overwritten
///
/// Both operands are read along their rows, so this is the natural kernel
/// for contracting the last axis of two matrices.
pub fn matmul_transposed_b_kernel<T: Element>(
    a: &[T],
    b: &[T],
    out: &mut [T],
    m: usize,
    n: usize,
    k: usize,
) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), n * k);
    debug_assert_eq!(out.len(), m * n);

    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let b_row = &b[j * k..(j + 1) * k];
            let mut sum = T::zero();
            for (&x, &y) in a_row.iter().zip(b_row) {
                sum = sum + x * y;
            }
            out[i * n + j] = sum;
        }
    }
}
