//! # simplealg-linalg
//!
//! Sparse square matrices over arbitrary rings, and their inversion.
//!
//! This crate provides:
//! - `SquareMatrix<R>`: a sparse matrix storing only non-zero entries
//! - Gauss-Jordan inversion that never assumes entries commute, in four
//!   modes (left, right, and their reversed-coefficient forms)
//! - Parallel elimination updates and batch inversion via rayon
//!
//! A `SquareMatrix<R>` is itself a `RingElement`, so matrices nest:
//! inverting a matrix of matrices inverts the pivot blocks recursively.
//!
//! ## Choosing a Mode
//!
//! - `invert_left`: `inv * m == I`
//! - `invert_right`: `m * inv == I`
//! - `invert_left_rev_coeff` / `invert_right_rev_coeff`: identity under
//!   `multiply_rev_coeff`, for algebras whose natural product composes
//!   entry coefficients in the opposite order
//!
//! Over a commutative entry ring all four agree.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod elimination;
pub mod parallel;
pub mod square_matrix;

pub use elimination::{EliminationConfig, Inversion, PivotStrategy};
pub use parallel::par_invert;
pub use square_matrix::{SquareMatrix, SquareMatrixFactory};

#[cfg(test)]
mod proptests;
