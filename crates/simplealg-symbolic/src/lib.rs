//! # simplealg-symbolic
//!
//! Symbolic ring elements for simplealg.
//!
//! This crate provides:
//! - `Symbolic<R>`: an expression tree over a base ring `R` that is itself
//!   a ring element, so it can fill a `SquareMatrix`
//! - Simplifying constructors that never reorder a product
//! - Evaluation against variable bindings, and substitution
//! - Named variables and infix display
//!
//! ## Design Principles
//!
//! - **Immutable sharing**: subtrees live behind `Arc`, so clones are cheap
//!   and elements are `Send + Sync`
//! - **Deferred inverses**: `invert_left`/`invert_right` on a variable
//!   build an inverse node; it only fails once evaluated

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod eval;
pub mod expr;
pub mod symbols;

#[cfg(test)]
mod proptests;

pub use error::EvalError;
pub use eval::Bindings;
pub use expr::{Operands, SymbolId, Symbolic, SymbolicFactory, SymbolicNode};
pub use symbols::{Named, SymbolTable};
