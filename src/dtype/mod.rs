//! Element types for denso kernels
//!
//! Public matrices store `f64`, the only implemented element type. The
//! crate-internal kernels are written against [`LinalgElement`] rather than
//! `f64` directly.

mod element;

pub use element::{Element, LinalgElement};
