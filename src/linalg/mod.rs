//! Dense factorizations and the operations built on them
//!
//! | Operation | Method |
//! |-----------|--------|
//! | [`det`], [`inv`], [`lu`] | LU with partial pivoting |
//! | [`cholesky`] | Cholesky-Banachiewicz |
//! | [`qr`], [`matrix_solve_linear`] | Householder QR |
//! | [`svd`], [`matrix_rank`] | One-sided Jacobi |
//! | [`matrix_eigen_values`] | Balancing, Hessenberg reduction, Francis double-shift QR |
//! | [`matrix_power`] | Binary exponentiation (through [`inv`] for negative powers) |

mod decompositions;
mod eig_general;
mod helpers;
mod jacobi;
mod matrix_ops;
mod solvers;
mod svd;


pub use decompositions::{LuDecomposition, QrDecomposition, cholesky, lu, qr};
pub use eig_general::{matrix_eigen_values, matrix_eigen_values_with};
pub use matrix_ops::{det, inv, matrix_power, matrix_rank};
pub use solvers::{matrix_solve_linear, matrix_solve_linear_checked};
pub use svd::{Svd, svd, svd_with};
