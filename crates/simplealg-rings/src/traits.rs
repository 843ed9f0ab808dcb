//! Algebraic structure traits.
//!
//! This module defines the contract every matrix entry type must honor.
//! Nothing here assumes multiplication commutes: `a.multiply(&b)` and
//! `b.multiply(&a)` are distinct operations, and an element may have a
//! left inverse, a right inverse, both, or neither.

use std::fmt::Debug;

use crate::error::NotInvertible;

/// An element of a (possibly non-commutative) ring.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative with identity `identity()`
/// - Multiplication distributes over addition on both sides
/// - Every element has an additive inverse (`negate`)
///
/// Elements are values: operations never mutate their operands.
pub trait RingElement: Clone + Debug + PartialEq + Send + Sync {
    /// The factory producing the distinguished elements of this ring.
    type Factory: RingFactory<Element = Self>;

    /// Returns `self + other`.
    fn add(&self, other: &Self) -> Self;

    /// Returns `-self`.
    fn negate(&self) -> Self;

    /// Returns `self * other`. Operand order is significant.
    fn multiply(&self, other: &Self) -> Self;

    /// Returns `x` such that `x * self` is the identity.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] if no left inverse exists.
    fn invert_left(&self) -> Result<Self, NotInvertible>;

    /// Returns `x` such that `self * x` is the identity.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] if no right inverse exists.
    fn invert_right(&self) -> Result<Self, NotInvertible>;

    /// Returns true if this is the additive identity.
    ///
    /// For floating representations this is an exact test.
    fn is_zero(&self) -> bool;

    /// Returns the factory of the ring this element belongs to.
    fn parent(&self) -> Self::Factory;

    /// Returns true if this is the multiplicative identity.
    ///
    /// Exact, like [`is_zero`](Self::is_zero).
    fn is_identity(&self) -> bool {
        *self == self.parent().identity()
    }

    /// Returns `self - other`.
    fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }
}

/// Produces the distinguished elements of a ring.
///
/// Rings whose zero and identity depend on runtime data (a matrix
/// dimension, for instance) carry that data in the factory.
pub trait RingFactory: Clone + Debug + Send + Sync {
    /// The element type produced by this factory.
    type Element;

    /// The additive identity.
    fn zero(&self) -> Self::Element;

    /// The multiplicative identity.
    fn identity(&self) -> Self::Element;
}

/// Marker for rings whose multiplication commutes.
///
/// For these rings left and right inverses coincide.
pub trait CommutativeRing: RingElement {}

/// Equality up to an absolute tolerance.
///
/// Exact rings ignore the tolerance.
pub trait ApproxEq {
    /// Returns true if `self` and `other` differ by at most `tolerance`
    /// in every scalar component.
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool;
}
