//! # simplealg-rings
//!
//! Ring elements for simplealg.
//!
//! This crate provides:
//! - The element contract: `RingElement`, `RingFactory`
//! - The failure type shared by elements and matrices: `NotInvertible`
//! - Concrete rings: `f64`/`f32`, exact rationals Q, Z_p, quaternions
//!
//! ## Trait Hierarchy
//!
//! ```text
//! RingElement ── Factory: RingFactory
//!  └── CommutativeRing
//! ```
//!
//! Multiplication is never assumed to commute. Code that needs commutativity
//! asks for `CommutativeRing` explicitly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod finite_field;
pub mod float;
pub mod quaternion;
pub mod rational;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use error::{Axis, NotInvertible};
pub use finite_field::{FiniteField, FiniteFieldFactory};
pub use float::{F32Factory, F64Factory, FloatFactory};
pub use quaternion::{Quaternion, QuaternionFactory};
pub use rational::{Q, QFactory};
pub use traits::{ApproxEq, CommutativeRing, RingElement, RingFactory};
