//! Shape type: dimensions of a matrix

use crate::error::{Error, Result};
use std::fmt;

/// Dimensions of a 2-D matrix
///
/// Constructors accept `impl Into<Shape>`: a bare `usize` means a square
/// shape, a `(rows, cols)` tuple is used as given.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl Shape {
    /// Create a shape without validation.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of elements.
    #[inline]
    pub const fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Smaller of the two dimensions.
    #[inline]
    pub fn min_dim(&self) -> usize {
        self.rows.min(self.cols)
    }

    /// Whether rows == cols.
    #[inline]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Reject shapes with a zero dimension, or too many elements for an
    /// `f64` buffer to be addressable.
    pub fn validate(self) -> Result<Self> {
        let addressable = self
            .rows
            .checked_mul(self.cols)
            .and_then(|n| n.checked_mul(std::mem::size_of::<f64>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if self.rows == 0 || self.cols == 0 || !addressable {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self)
    }

    /// Shape as a `(rows, cols)` tuple.
    #[inline]
    pub const fn as_tuple(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl From<usize> for Shape {
    fn from(n: usize) -> Self {
        Self::new(n, n)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::new(rows, cols)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
