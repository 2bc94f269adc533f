//! Per-call options for the iterative factorizations

/// Options for [`svd_with`](crate::linalg::svd_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvdOptions {
    /// Return full orthonormal bases (U: rows×rows, V: cols×cols) instead of
    /// the thin factors (U: rows×k, V: cols×k) (default: true)
    pub full_matrices: bool,
    /// Compute U and V; when false only the singular values are produced
    /// and the rotation accumulation is skipped entirely (default: true)
    pub compute_uv: bool,
    /// Maximum number of one-sided Jacobi sweeps (default: 60)
    pub max_sweeps: usize,
}

impl Default for SvdOptions {
    fn default() -> Self {
        Self {
            full_matrices: true,
            compute_uv: true,
            max_sweeps: 60,
        }
    }
}

impl SvdOptions {
    /// Singular values only
    pub fn values_only() -> Self {
        Self {
            compute_uv: false,
            ..Self::default()
        }
    }

    /// Thin factors
    pub fn thin() -> Self {
        Self {
            full_matrices: false,
            ..Self::default()
        }
    }
}

/// Options for [`matrix_eigen_values_with`](crate::linalg::matrix_eigen_values_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EigenOptions {
    /// QR iterations allowed per eigenvalue before giving up (default: 30)
    pub max_iterations: usize,
    /// Balance the matrix by diagonal similarity before reduction (default: true)
    pub balance: bool,
}

impl Default for EigenOptions {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            balance: true,
        }
    }
}
