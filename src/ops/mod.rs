//! Binary numeric operations over scalar/matrix operands

mod product;

pub use product::{dot, inner, matrix_mul, outer};
