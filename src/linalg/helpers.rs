//! Validation helpers shared by the factorizations

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Validate matrix is square, returning its order
pub(crate) fn validate_square(op: &'static str, a: &Matrix) -> Result<usize> {
    let (rows, cols) = a.shape().as_tuple();
    if rows != cols {
        return Err(Error::NotSquare { op, rows, cols });
    }
    Ok(rows)
}

/// Largest absolute entry (NaN entries are ignored)
pub(crate) fn max_abs(data: &[f64]) -> f64 {
    data.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_square() {
        let sq = Matrix::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(validate_square("det", &sq).unwrap(), 2);

        let rect = Matrix::from_slice(1, 2, &[1.0, 2.0]).unwrap();
        assert_eq!(
            validate_square("det", &rect).unwrap_err(),
            Error::NotSquare {
                op: "det",
                rows: 1,
                cols: 2
            }
        );
    }

    #[test]
    fn test_max_abs() {
        assert_eq!(max_abs(&[1.0, -3.0, 2.0]), 3.0);
        assert_eq!(max_abs(&[0.0, f64::NAN]), 0.0);
    }
}
