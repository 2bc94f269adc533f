//! Dense row-major matrix storage
//!
//! A [`Matrix`] owns a contiguous `f64` buffer with `rows * cols` elements.
//! Element `(i, j)` lives at index `i * cols + j`. Every operation in this
//! crate takes matrices by reference and allocates fresh output storage.

mod shape;

pub use shape::Shape;

use crate::error::{Error, Result};
use std::ops::Index;

/// Dense row-major `f64` matrix with positive dimensions
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    shape: Shape,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from an owned row-major buffer.
    ///
    /// An empty `data` vector is accepted and yields a zero-filled matrix.
    /// Any other length must equal `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let shape = Shape::new(rows, cols).validate()?;
        if data.is_empty() {
            return Ok(Self::from_parts(shape, vec![0.0; shape.numel()]));
        }
        if data.len() != shape.numel() {
            return Err(Error::DataLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self::from_parts(shape, data))
    }

    /// Create a matrix by copying a row-major slice.
    pub fn from_slice(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        Self::new(rows, cols, data.to_vec())
    }

    /// Create a matrix from a list of equally long rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let shape = Shape::new(n_rows, n_cols).validate()?;

        let mut data = Vec::with_capacity(shape.numel());
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(Error::shape_mismatch(
                    "from_rows",
                    (1, n_cols),
                    (1, row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_parts(shape, data))
    }

    /// Create a matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(shape: impl Into<Shape>, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let shape = shape.into().validate()?;
        let mut data = Vec::with_capacity(shape.numel());
        for i in 0..shape.rows {
            for j in 0..shape.cols {
                data.push(f(i, j));
            }
        }
        Ok(Self::from_parts(shape, data))
    }

    /// Create a matrix from a native-endian `f64` byte buffer.
    ///
    /// The buffer does not need to be 8-byte aligned.
    pub fn from_bytes(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self> {
        let shape = Shape::new(rows, cols).validate()?;
        let expected = shape.numel() * std::mem::size_of::<f64>();
        if bytes.len() != expected {
            return Err(Error::DataLength {
                rows,
                cols,
                len: bytes.len() / std::mem::size_of::<f64>(),
            });
        }
        let mut data = vec![0.0f64; shape.numel()];
        bytemuck::cast_slice_mut::<f64, u8>(&mut data).copy_from_slice(bytes);
        Ok(Self::from_parts(shape, data))
    }

    /// Assemble a matrix from parts already known to be consistent.
    #[inline]
    pub(crate) fn from_parts(shape: Shape, data: Vec<f64>) -> Self {
        debug_assert!(shape.rows > 0 && shape.cols > 0);
        debug_assert_eq!(data.len(), shape.numel());
        Self { shape, data }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Matrix dimensions
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Total number of elements (`rows * cols`)
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Whether rows == cols
    #[inline]
    pub fn is_square(&self) -> bool {
        self.shape.is_square()
    }

    /// Whether the matrix is a single row or a single column
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.shape.rows == 1 || self.shape.cols == 1
    }

    /// Row-major element buffer
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Consume the matrix and return its row-major buffer
    #[inline]
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Copy of the row-major buffer
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Element `(i, j)`, or `None` when out of bounds
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.shape.rows && j < self.shape.cols {
            Some(self.data[i * self.shape.cols + j])
        } else {
            None
        }
    }

    /// Row `i` as a slice
    ///
    /// # Panics
    /// Panics if `i >= rows`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.shape.cols;
        &self.data[i * n..(i + 1) * n]
    }

    /// Raw native-endian bytes of the element buffer
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Apply `f` to every element, producing a new matrix of the same shape
    pub fn map<F: FnMut(f64) -> f64>(&self, f: F) -> Matrix {
        Matrix::from_parts(self.shape, self.data.iter().copied().map(f).collect())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(
            i < self.shape.rows && j < self.shape.cols,
            "index ({}, {}) out of bounds for {} matrix",
            i,
            j,
            self.shape
        );
        &self.data[i * self.shape.cols + j]
    }
}
