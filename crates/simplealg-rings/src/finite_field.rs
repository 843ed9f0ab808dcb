//! Finite fields Z_p.

use std::fmt;

use crate::error::NotInvertible;
use crate::traits::{ApproxEq, CommutativeRing, RingElement, RingFactory};

/// An integer modulo `P`.
///
/// For prime `P` this is a field and every non-zero element is a unit. A
/// composite modulus is allowed; its zero divisors report
/// [`NotInvertible::NonUnit`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FiniteField<const P: u64>(u64);

impl<const P: u64> FiniteField<P> {
    /// Creates a new field element.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value % P)
    }

    /// Creates a field element from a signed value.
    #[must_use]
    pub fn from_signed(value: i64) -> Self {
        let magnitude = Self::new(value.unsigned_abs());
        if value < 0 {
            magnitude.negate()
        } else {
            magnitude
        }
    }

    /// Returns the canonical representative in `[0, P)`.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the characteristic.
    #[must_use]
    pub const fn characteristic() -> u64 {
        P
    }

    /// Computes the inverse with the extended Euclidean algorithm.
    ///
    /// Returns `None` when `gcd(self, P) != 1`.
    #[must_use]
    pub fn inv(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }

        let mut t = 0i128;
        let mut new_t = 1i128;
        let mut r = i128::from(P);
        let mut new_r = i128::from(self.0);

        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }

        if r > 1 {
            return None;
        }

        let t = t.rem_euclid(i128::from(P));
        u64::try_from(t).ok().map(Self)
    }
}

/// Factory for [`FiniteField`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FiniteFieldFactory<const P: u64>;

impl<const P: u64> RingFactory for FiniteFieldFactory<P> {
    type Element = FiniteField<P>;

    fn zero(&self) -> FiniteField<P> {
        FiniteField::new(0)
    }

    fn identity(&self) -> FiniteField<P> {
        FiniteField::new(1)
    }
}

impl<const P: u64> RingElement for FiniteField<P> {
    type Factory = FiniteFieldFactory<P>;

    fn add(&self, other: &Self) -> Self {
        let sum = (u128::from(self.0) + u128::from(other.0)) % u128::from(P);
        Self(sum as u64)
    }

    fn negate(&self) -> Self {
        if self.0 == 0 {
            *self
        } else {
            Self(P - self.0)
        }
    }

    fn multiply(&self, other: &Self) -> Self {
        let prod = (u128::from(self.0) * u128::from(other.0)) % u128::from(P);
        Self(prod as u64)
    }

    fn invert_left(&self) -> Result<Self, NotInvertible> {
        if self.0 == 0 {
            return Err(NotInvertible::Zero);
        }
        self.inv()
            .ok_or_else(|| NotInvertible::NonUnit(format!("{self:?}")))
    }

    fn invert_right(&self) -> Result<Self, NotInvertible> {
        self.invert_left()
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn parent(&self) -> FiniteFieldFactory<P> {
        FiniteFieldFactory
    }

    fn is_identity(&self) -> bool {
        self.0 == 1 % P
    }
}

impl<const P: u64> CommutativeRing for FiniteField<P> {}

impl<const P: u64> ApproxEq for FiniteField<P> {
    fn approx_eq(&self, other: &Self, _tolerance: f64) -> bool {
        self == other
    }
}

impl<const P: u64> fmt::Debug for FiniteField<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.0, P)
    }
}

impl<const P: u64> fmt::Display for FiniteField<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
