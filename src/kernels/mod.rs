//! Low-level slice kernels shared by the product family and the factorizations

pub mod matmul;

pub use matmul::{matmul_kernel, matmul_transposed_b_kernel};
