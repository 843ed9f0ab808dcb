//! Quaternions over a floating-point type.
//!
//! The Hamilton product does not commute (`i * j = k` but `j * i = -k`),
//! which makes quaternion matrices the smallest practical check that an
//! algorithm respects operand order.

use std::marker::PhantomData;

use num_traits::Float;

use crate::error::NotInvertible;
use crate::traits::{ApproxEq, RingElement, RingFactory};

/// A quaternion `w + x·i + y·j + z·k`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Quaternion<T> {
    /// Real part.
    pub w: T,
    /// Coefficient of `i`.
    pub x: T,
    /// Coefficient of `j`.
    pub y: T,
    /// Coefficient of `k`.
    pub z: T,
}

impl<T: Float> Quaternion<T> {
    /// Creates a quaternion from its four components.
    #[must_use]
    pub const fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// Creates a purely real quaternion.
    #[must_use]
    pub fn real(w: T) -> Self {
        Self::new(w, T::zero(), T::zero(), T::zero())
    }

    /// The unit `i`.
    #[must_use]
    pub fn i() -> Self {
        Self::new(T::zero(), T::one(), T::zero(), T::zero())
    }

    /// The unit `j`.
    #[must_use]
    pub fn j() -> Self {
        Self::new(T::zero(), T::zero(), T::one(), T::zero())
    }

    /// The unit `k`.
    #[must_use]
    pub fn k() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Returns the conjugate `w - x·i - y·j - z·k`.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Returns the squared norm.
    #[must_use]
    pub fn norm_sqr(&self) -> T {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    fn scale(&self, s: T) -> Self {
        Self::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }

    fn reciprocal(&self) -> Result<Self, NotInvertible> {
        let n = self.norm_sqr();
        if n == T::zero() {
            return Err(NotInvertible::Zero);
        }
        Ok(self.conjugate().scale(n.recip()))
    }
}

/// Factory for [`Quaternion`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuaternionFactory<T>(PhantomData<T>);

impl<T> QuaternionFactory<T> {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Float + std::fmt::Debug + Send + Sync> RingFactory for QuaternionFactory<T> {
    type Element = Quaternion<T>;

    fn zero(&self) -> Quaternion<T> {
        Quaternion::real(T::zero())
    }

    fn identity(&self) -> Quaternion<T> {
        Quaternion::real(T::one())
    }
}

impl<T: Float + std::fmt::Debug + Send + Sync> RingElement for Quaternion<T> {
    type Factory = QuaternionFactory<T>;

    fn add(&self, other: &Self) -> Self {
        Self::new(
            self.w + other.w,
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
        )
    }

    fn negate(&self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }

    fn multiply(&self, o: &Self) -> Self {
        Self::new(
            self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
            self.w * o.x + self.x * o.w + self.y * o.z - self.z * o.y,
            self.w * o.y - self.x * o.z + self.y * o.w + self.z * o.x,
            self.w * o.z + self.x * o.y - self.y * o.x + self.z * o.w,
        )
    }

    // A division ring: the one inverse serves on both sides.
    fn invert_left(&self) -> Result<Self, NotInvertible> {
        self.reciprocal()
    }

    fn invert_right(&self) -> Result<Self, NotInvertible> {
        self.reciprocal()
    }

    fn is_zero(&self) -> bool {
        self.w == T::zero() && self.x == T::zero() && self.y == T::zero() && self.z == T::zero()
    }

    fn parent(&self) -> QuaternionFactory<T> {
        QuaternionFactory::new()
    }

    fn is_identity(&self) -> bool {
        self.w == T::one() && self.x == T::zero() && self.y == T::zero() && self.z == T::zero()
    }
}

impl<T: Float> ApproxEq for Quaternion<T> {
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        let close = |a: T, b: T| (a - b).abs().to_f64().is_some_and(|d| d <= tolerance);
        close(self.w, other.w) && close(self.x, other.x) && close(self.y, other.y) && close(self.z, other.z)
    }
}
