//! # denso
//!
//! **Dense `f64` linear algebra on row-major matrices.**
//!
//! denso computes matrix products, determinants, inverses, rank, eigenvalues,
//! linear-system solutions, Cholesky and singular-value decompositions, and
//! structural transforms. Every operation takes immutable inputs and returns
//! freshly owned outputs; there is no global state.
//!
//! ## Features
//!
//! - **Storage**: [`Matrix`], a flat row-major `f64` buffer with validated dimensions
//! - **Products**: [`dot`], [`matrix_mul`], [`inner`], [`outer`] over scalar/matrix operands
//! - **Factorizations**: LU, Cholesky, Householder QR, one-sided Jacobi SVD
//! - **Derived operations**: [`det`], [`inv`], [`matrix_rank`], [`matrix_power`],
//!   [`matrix_solve_linear`], [`matrix_eigen_values`]
//! - **Structure**: [`tril`], [`triu`], [`transpose`], [`trace`], [`diag`]
//!
//! ## Quick Start
//!
//! ```rust
//! use denso::prelude::*;
//!
//! # fn main() -> denso::Result<()> {
//! let a = Matrix::from_rows(&[[2.0, -1.0], [1.0, 3.0]])?;
//! assert!((det(&a)? - 7.0).abs() < 1e-12);
//!
//! let row = Matrix::from_slice(1, 4, &[1.0, 1.0, 1.0, 1.0])?;
//! let col = Matrix::from_slice(4, 1, &[2.0, 2.0, 1.0, 1.0])?;
//! assert_eq!(dot(&row, &col)?, Value::Scalar(6.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded matrix multiplication for large products

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod construct;
pub mod dtype;
pub mod error;
pub mod kernels;
pub mod linalg;
pub mod matrix;
pub mod operand;
pub mod ops;
pub mod options;
pub mod structure;

pub use construct::{diagflat, empty, eye, identity, ones, tri, zeros};
pub use error::{Error, ErrorKind, Result};
pub use linalg::{
    LuDecomposition, QrDecomposition, Svd, cholesky, det, inv, lu, matrix_eigen_values,
    matrix_eigen_values_with, matrix_power, matrix_rank, matrix_solve_linear,
    matrix_solve_linear_checked, qr, svd, svd_with,
};
pub use matrix::{Matrix, Shape};
pub use operand::{Operand, Value};
pub use ops::{dot, inner, matrix_mul, outer};
pub use options::{EigenOptions, SvdOptions};
pub use structure::{diag, frobenius_norm, trace, transpose, tril, triu};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::construct::{diagflat, empty, eye, identity, ones, tri, zeros};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::linalg::*;
    pub use crate::matrix::{Matrix, Shape};
    pub use crate::operand::{Operand, Value};
    pub use crate::ops::{dot, inner, matrix_mul, outer};
    pub use crate::options::{EigenOptions, SvdOptions};
    pub use crate::structure::{diag, frobenius_norm, trace, transpose, tril, triu};
}
