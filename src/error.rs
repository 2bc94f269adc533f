//! Error types for denso

use thiserror::Error;

/// Result type alias using denso's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in denso operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Operand dimensions are incompatible for an operation
    #[error("Shape mismatch in '{op}': {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        /// The operation name
        op: &'static str,
        /// Left-hand side shape (rows, cols)
        lhs: (usize, usize),
        /// Right-hand side shape (rows, cols)
        rhs: (usize, usize),
    },

    /// A square matrix was required
    #[error("'{op}' requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// The operation name
        op: &'static str,
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Zero rows or columns
    #[error("Matrix dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Buffer length does not match rows * cols
    #[error("Data length {len} does not match {rows}x{cols}")]
    DataLength {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
        /// Provided length
        len: usize,
    },

    /// Operand is neither a finite scalar nor a matrix of the required kind
    #[error("Invalid operand for '{op}': {reason}")]
    InvalidOperand {
        /// The operation name
        op: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Matrix is singular to working precision
    #[error("Matrix is singular in '{op}'")]
    Singular {
        /// The operation name
        op: &'static str,
    },

    /// Cholesky factorization met a non-positive pivot
    #[error("Matrix is not positive definite (pivot {pivot})")]
    NotPositiveDefinite {
        /// Index of the failing diagonal pivot
        pivot: usize,
    },

    /// Iterative algorithm ran out of iterations
    #[error("'{op}' did not converge after {iterations} iterations")]
    NoConvergence {
        /// The operation name
        op: &'static str,
        /// Iterations performed
        iterations: usize,
    },
}

/// Coarse error classes exposed at the caller boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Dimension mismatch, non-square input, or non-positive dimensions
    Shape,
    /// Operand is neither a finite scalar nor a matrix, or an argument is malformed
    Type,
    /// Operation undefined for a singular or indefinite matrix
    Singularity,
    /// Iterative algorithm failed to converge
    Convergence,
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ShapeMismatch { .. }
            | Self::NotSquare { .. }
            | Self::InvalidDimensions { .. }
            | Self::DataLength { .. } => ErrorKind::Shape,
            Self::InvalidOperand { .. } | Self::InvalidArgument { .. } => ErrorKind::Type,
            Self::Singular { .. } | Self::NotPositiveDefinite { .. } => ErrorKind::Singularity,
            Self::NoConvergence { .. } => ErrorKind::Convergence,
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Self::ShapeMismatch { op, lhs, rhs }
    }

    /// Create an invalid operand error
    pub fn invalid_operand(op: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            op,
            reason: reason.into(),
        }
    }
}
