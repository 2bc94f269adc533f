//! Elementary constructors: zeros, ones, empty, identity, eye, tri, diagflat
//!
//! Every constructor validates its shape first; a zero dimension is an
//! [`Error::InvalidDimensions`](crate::error::Error::InvalidDimensions).
//! Shapes are taken as `impl Into<Shape>`, so `zeros(3)` is 3x3 and
//! `zeros((2, 3))` is 2x3.

use crate::error::Result;
use crate::matrix::{Matrix, Shape};

fn filled(shape: impl Into<Shape>, value: f64) -> Result<Matrix> {
    let shape = shape.into().validate()?;
    Ok(Matrix::from_parts(shape, vec![value; shape.numel()]))
}

/// Matrix filled with `0.0`
pub fn zeros(shape: impl Into<Shape>) -> Result<Matrix> {
    filled(shape, 0.0)
}

/// Matrix filled with `1.0`
pub fn ones(shape: impl Into<Shape>) -> Result<Matrix> {
    filled(shape, 1.0)
}

/// Freshly allocated matrix whose contents callers must not rely on.
///
/// The storage is zero-filled; it is only guaranteed to have the requested shape.
pub fn empty(shape: impl Into<Shape>) -> Result<Matrix> {
    filled(shape, 0.0)
}

/// `n x n` identity matrix
pub fn identity(n: usize) -> Result<Matrix> {
    eye(n, n)
}

/// `rows x cols` matrix with ones on the main diagonal
pub fn eye(rows: usize, cols: usize) -> Result<Matrix> {
    let mut m = zeros((rows, cols))?.into_data();
    for i in 0..rows.min(cols) {
        m[i * cols + i] = 1.0;
    }
    Ok(Matrix::from_parts(Shape::new(rows, cols), m))
}

/// `rows x cols` matrix with ones at and below the main diagonal
pub fn tri(rows: usize, cols: usize) -> Result<Matrix> {
    Matrix::from_fn((rows, cols), |i, j| if j <= i { 1.0 } else { 0.0 })
}

/// Square matrix with `values` on the main diagonal
pub fn diagflat(values: &[f64]) -> Result<Matrix> {
    let n = values.len();
    let mut m = zeros(n)?.into_data();
    for (i, &v) in values.iter().enumerate() {
        m[i * n + i] = v;
    }
    Ok(Matrix::from_parts(Shape::new(n, n), m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_zeros_ones_default_square() {
        let z = zeros(3).unwrap();
        assert_eq!(z.shape().as_tuple(), (3, 3));
        assert!(z.data().iter().all(|&v| v == 0.0));

        let o = ones((2, 4)).unwrap();
        assert_eq!(o.shape().as_tuple(), (2, 4));
        assert!(o.data().iter().all(|&v| v == 1.0));

        assert_eq!(empty((5, 1)).unwrap().numel(), 5);
    }

    #[test]
    fn test_non_positive_dimensions() {
        assert!(matches!(zeros(0), Err(Error::InvalidDimensions { .. })));
        assert!(ones((2, 0)).is_err());
        assert!(empty((0, 2)).is_err());
        assert!(identity(0).is_err());
        assert!(tri(0, 1).is_err());
        assert!(diagflat(&[]).is_err());
    }

    #[test]
    fn test_overflowing_shape_rejected() {
        assert!(matches!(
            zeros((usize::MAX / 2, 3)),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(ones((usize::MAX, usize::MAX)).is_err());
        assert!(eye(usize::MAX, 2).is_err());
        assert!(Matrix::new(usize::MAX, 2, vec![]).is_err());
    }

    #[test]
    fn test_eye_rectangular() {
        let e = eye(2, 3).unwrap();
        assert_eq!(e.data(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        let e = eye(3, 2).unwrap();
        assert_eq!(e.data(), &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(identity(2).unwrap(), eye(2, 2).unwrap());
    }

    #[test]
    fn test_tri() {
        let t = tri(3, 2).unwrap();
        assert_eq!(t.data(), &[1.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        let t = tri(2, 3).unwrap();
        assert_eq!(t.data(), &[1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_diagflat() {
        let d = diagflat(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(d.shape().as_tuple(), (3, 3));
        assert_eq!(d[(1, 1)], 2.0);
        assert_eq!(d[(0, 1)], 0.0);
    }
}
