//! Product family: dot, matrix_mul, inner, outer
//!
//! Shape resolution shared by every operation here:
//!
//! ```text
//! scalar ⊗ scalar -> scalar
//! scalar ⊗ matrix -> matrix of the other operand's shape, every element scaled
//! matrix ⊗ matrix -> operation specific
//! ```
//!
//! A 1x1 result is returned as [`Value::Scalar`].

use crate::error::{Error, Result};
use crate::kernels::{matmul_kernel, matmul_transposed_b_kernel};
use crate::matrix::{Matrix, Shape};
use crate::operand::{Operand, Value};

/// Resolve both operands, rejecting non-finite scalars.
fn resolve<'a, 'b>(
    op: &'static str,
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
) -> Result<(Operand<'a>, Operand<'b>)> {
    Ok((a.into().validate(op)?, b.into().validate(op)?))
}

fn scale(m: &Matrix, s: f64) -> Matrix {
    m.map(|v| s * v)
}

impl Matrix {
    /// Matrix product `self @ rhs`; requires `self.cols() == rhs.rows()`
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        matmul_checked("matmul", self, rhs)
    }
}

fn matmul_checked(op: &'static str, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let (m, k) = a.shape().as_tuple();
    let (k2, n) = b.shape().as_tuple();
    if k != k2 {
        return Err(Error::shape_mismatch(op, (m, k), (k2, n)));
    }

    let shape = Shape::new(m, n).validate()?;
    let mut out = vec![0.0; shape.numel()];
    matmul_kernel(a.data(), b.data(), &mut out, m, n, k);
    Ok(Matrix::from_parts(shape, out))
}

/// Dot product of two operands
///
/// - scalar × scalar: ordinary product
/// - scalar × matrix: scaled copy of the matrix
/// - matrix × matrix: matrix multiplication, requires `a.cols() == b.rows()`
pub fn dot<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
    match resolve("dot", a, b)? {
        (Operand::Scalar(x), Operand::Scalar(y)) => Ok(Value::Scalar(x * y)),
        (Operand::Scalar(s), Operand::Matrix(m)) | (Operand::Matrix(m), Operand::Scalar(s)) => {
            Ok(Value::from_matrix(scale(m, s)))
        }
        (Operand::Matrix(x), Operand::Matrix(y)) => {
            matmul_checked("dot", x, y).map(Value::from_matrix)
        }
    }
}

/// Matrix multiplication of two matrix operands
///
/// Unlike [`dot`], both operands must be matrices; a scalar is an
/// [`Error::InvalidOperand`]. The result is always a matrix, 1x1 included.
pub fn matrix_mul<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Matrix> {
    match resolve("matrix_mul", a, b)? {
        (Operand::Matrix(x), Operand::Matrix(y)) => matmul_checked("matrix_mul", x, y),
        _ => Err(Error::invalid_operand(
            "matrix_mul",
            "both operands must be matrices",
        )),
    }
}

/// Inner product of two operands
///
/// Two vectors (a single row or a single column each) of equal length give
/// the ordinary sum of products. Otherwise the last axis of each matrix is
/// contracted: `out[i, j] = Σ_k a[i, k] * b[j, k]`, requiring
/// `a.cols() == b.cols()`. Scalars broadcast as in [`dot`].
pub fn inner<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
    match resolve("inner", a, b)? {
        (Operand::Scalar(x), Operand::Scalar(y)) => Ok(Value::Scalar(x * y)),
        (Operand::Scalar(s), Operand::Matrix(m)) | (Operand::Matrix(m), Operand::Scalar(s)) => {
            Ok(Value::from_matrix(scale(m, s)))
        }
        (Operand::Matrix(x), Operand::Matrix(y)) => {
            if x.is_vector() && y.is_vector() && x.numel() == y.numel() {
                let sum = x
                    .data()
                    .iter()
                    .zip(y.data())
                    .fold(0.0, |acc, (p, q)| acc + p * q);
                return Ok(Value::Scalar(sum));
            }

            let (m, k) = x.shape().as_tuple();
            let (n, k2) = y.shape().as_tuple();
            if k != k2 {
                return Err(Error::shape_mismatch("inner", (m, k), (n, k2)));
            }
            let shape = Shape::new(m, n).validate()?;
            let mut out = vec![0.0; shape.numel()];
            matmul_transposed_b_kernel(x.data(), y.data(), &mut out, m, n, k);
            Ok(Value::from_matrix(Matrix::from_parts(shape, out)))
        }
    }
}

/// Outer product of two operands
///
/// Matrices are flattened in row-major order first; the result is
/// `len(a) x len(b)` with `out[i, j] = a[i] * b[j]`. Scalars broadcast as
/// an ordinary product.
pub fn outer<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
    match resolve("outer", a, b)? {
        (Operand::Scalar(x), Operand::Scalar(y)) => Ok(Value::Scalar(x * y)),
        (Operand::Scalar(s), Operand::Matrix(m)) | (Operand::Matrix(m), Operand::Scalar(s)) => {
            Ok(Value::from_matrix(scale(m, s)))
        }
        (Operand::Matrix(x), Operand::Matrix(y)) => {
            let (xs, ys) = (x.data(), y.data());
            let shape = Shape::new(xs.len(), ys.len()).validate()?;
            let mut out = Vec::with_capacity(shape.numel());
            for &p in xs {
                out.extend(ys.iter().map(|&q| p * q));
            }
            Ok(Value::from_matrix(Matrix::from_parts(shape, out)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn mat(rows: usize, cols: usize, data: &[f64]) -> Matrix {
        Matrix::from_slice(rows, cols, data).unwrap()
    }

    #[test]
    fn test_dot_scalars() {
        assert_eq!(dot(7.0, 3.0).unwrap(), Value::Scalar(21.0));
    }

    #[test]
    fn test_dot_row_by_column_is_scalar() {
        let a = mat(1, 4, &[1.0, 1.0, 1.0, 1.0]);
        let b = mat(4, 1, &[2.0, 2.0, 1.0, 1.0]);
        assert_eq!(dot(&a, &b).unwrap(), Value::Scalar(6.0));
    }

    #[test]
    fn test_dot_scalar_matrix_both_orders() {
        let b = mat(4, 1, &[2.0, 2.0, 1.0, 1.0]);
        let left = dot(3.0, &b).unwrap();
        let right = dot(&b, 3.0).unwrap();
        assert_eq!(left, right);
        let m = left.as_matrix().unwrap();
        assert_eq!(m.shape().as_tuple(), (4, 1));
        assert_eq!(m.data(), &[6.0, 6.0, 3.0, 3.0]);
    }

    #[test]
    fn test_dot_2x2() {
        let a = mat(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let b = mat(2, 2, &[2.0, 2.0, 1.0, 1.0]);
        let c = dot(&a, &b).unwrap().into_matrix();
        assert_eq!(c.data(), &[3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_dot_shape_mismatch() {
        let a = mat(2, 3, &[1.0; 6]);
        let err = dot(&a, &a).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_dot_rejects_nan_scalar() {
        let a = mat(2, 2, &[1.0; 4]);
        assert_eq!(dot(f64::NAN, &a).unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn test_matrix_mul_requires_matrices() {
        let a = mat(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(matrix_mul(2.0, &a).unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(matrix_mul(&a, 2.0).unwrap_err().kind(), ErrorKind::Type);

        let one = matrix_mul(&mat(1, 2, &[1.0, 2.0]), &mat(2, 1, &[3.0, 4.0])).unwrap();
        assert_eq!(one.shape().as_tuple(), (1, 1));
        assert_eq!(one[(0, 0)], 11.0);
    }

    #[test]
    fn test_inner_vectors() {
        let a = mat(3, 1, &[1.0, 2.0, 3.0]);
        let b = mat(3, 1, &[4.0, 5.0, 6.0]);
        assert_eq!(inner(&a, &b).unwrap(), Value::Scalar(32.0));

        let row = mat(1, 3, &[4.0, 5.0, 6.0]);
        assert_eq!(inner(&a, &row).unwrap(), Value::Scalar(32.0));
    }

    #[test]
    fn test_inner_contracts_last_axis() {
        // a: 2x3, b: 3x3 -> 2x3 with out[i, j] = a[i, :] . b[j, :]
        let a = mat(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = mat(3, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0]);
        let out = inner(&a, &b).unwrap().into_matrix();
        assert_eq!(out.shape().as_tuple(), (2, 3));
        assert_eq!(out.data(), &[1.0, 2.0, 6.0, 4.0, 5.0, 15.0]);

        let bad = mat(2, 2, &[1.0; 4]);
        assert_eq!(inner(&a, &bad).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_outer_flattens() {
        let a = mat(2, 1, &[1.0, 2.0]);
        let b = mat(1, 3, &[1.0, 10.0, 100.0]);
        let out = outer(&a, &b).unwrap().into_matrix();
        assert_eq!(out.shape().as_tuple(), (2, 3));
        assert_eq!(out.data(), &[1.0, 10.0, 100.0, 2.0, 20.0, 200.0]);

        let sq = mat(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let out = outer(&sq, &mat(1, 1, &[2.0])).unwrap().into_matrix();
        assert_eq!(out.shape().as_tuple(), (4, 1));
        assert_eq!(out.data(), &[2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_scalar_identities() {
        for (a, b) in [(2.0, 3.5), (-1.25, 4.0), (0.0, 9.0)] {
            let p = a * b;
            assert_eq!(dot(a, b).unwrap().as_scalar(), Some(p));
            assert_eq!(inner(a, b).unwrap().as_scalar(), Some(p));
            assert_eq!(outer(a, b).unwrap().as_scalar(), Some(p));
        }
    }
}
