//! Scalar/matrix operands and results for the product family
//!
//! Binary operations accept an [`Operand`] on each side and dispatch by
//! pattern matching. Results come back as a [`Value`]; a 1x1 result is
//! always reported as [`Value::Scalar`].

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Input to a binary numeric operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    /// A bare scalar, broadcast against the other operand
    Scalar(f64),
    /// A borrowed matrix
    Matrix(&'a Matrix),
}

impl Operand<'_> {
    /// Reject non-finite scalars.
    pub(crate) fn validate(self, op: &'static str) -> Result<Self> {
        match self {
            Operand::Scalar(v) if !v.is_finite() => Err(Error::invalid_operand(
                op,
                format!("scalar operand must be finite, got {}", v),
            )),
            other => Ok(other),
        }
    }
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Operand::Scalar(v)
    }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(m: &'a Matrix) -> Self {
        Operand::Matrix(m)
    }
}

/// Result of a binary numeric operation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Scalar result (including collapsed 1x1 matrices)
    Scalar(f64),
    /// Matrix result with at least two elements
    Matrix(Matrix),
}

impl Value {
    /// Wrap a matrix, collapsing a 1x1 result to a scalar.
    pub fn from_matrix(m: Matrix) -> Self {
        if m.numel() == 1 {
            Value::Scalar(m.data()[0])
        } else {
            Value::Matrix(m)
        }
    }

    /// The scalar, if this is a scalar result
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Matrix(_) => None,
        }
    }

    /// The matrix, if this is a matrix result
    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Scalar(_) => None,
            Value::Matrix(m) => Some(m),
        }
    }

    /// Convert to a matrix; a scalar becomes a 1x1 matrix.
    pub fn into_matrix(self) -> Matrix {
        match self {
            Value::Scalar(v) => Matrix::from_parts((1, 1).into(), vec![v]),
            Value::Matrix(m) => m,
        }
    }

    /// Whether this is a scalar result
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::from_matrix(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_one_by_one_collapses() {
        let m = Matrix::from_rows(&[[6.0]]).unwrap();
        assert_eq!(Value::from_matrix(m), Value::Scalar(6.0));
    }

    #[test]
    fn test_into_matrix() {
        let v = Value::Scalar(2.5);
        let m = v.into_matrix();
        assert_eq!(m.shape().as_tuple(), (1, 1));
        assert_eq!(m[(0, 0)], 2.5);
    }

    #[test]
    fn test_non_finite_scalar_rejected() {
        let err = Operand::Scalar(f64::NAN).validate("dot").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(Operand::Scalar(f64::INFINITY).validate("dot").is_err());
        assert!(Operand::Scalar(1.0).validate("dot").is_ok());
    }
}
