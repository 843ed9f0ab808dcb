//! The field of rational numbers Q.
//!
//! Arithmetic is exact and arbitrary precision, which makes `Q` the ring of
//! choice when an inverse must be checked for equality rather than
//! closeness.

use dashu::base::Inverse;
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;

use crate::error::NotInvertible;
use crate::traits::{ApproxEq, CommutativeRing, RingElement, RingFactory};

/// An arbitrary precision rational number.
///
/// Always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Q(pub RBig);

impl Q {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        let num = if den < 0 { -IBig::from(num) } else { IBig::from(num) };
        Self(RBig::from_parts(num, UBig::from(den.unsigned_abs())))
    }

    /// Creates a rational from an integer.
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(RBig::from(IBig::from(n)))
    }

    /// Returns the inner `dashu` rational.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }

    /// Returns a reference to the inner `dashu` rational.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }
}

/// Factory for [`Q`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QFactory;

impl RingFactory for QFactory {
    type Element = Q;

    fn zero(&self) -> Q {
        Q(RBig::ZERO)
    }

    fn identity(&self) -> Q {
        Q(RBig::ONE)
    }
}

impl RingElement for Q {
    type Factory = QFactory;

    fn add(&self, other: &Self) -> Self {
        Self(&self.0 + &other.0)
    }

    fn negate(&self) -> Self {
        Self(-&self.0)
    }

    fn multiply(&self, other: &Self) -> Self {
        Self(&self.0 * &other.0)
    }

    fn invert_left(&self) -> Result<Self, NotInvertible> {
        if self.0.is_zero() {
            Err(NotInvertible::Zero)
        } else {
            Ok(Self(self.0.clone().inv()))
        }
    }

    fn invert_right(&self) -> Result<Self, NotInvertible> {
        self.invert_left()
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn parent(&self) -> QFactory {
        QFactory
    }

    fn is_identity(&self) -> bool {
        self.0 == RBig::ONE
    }

    fn subtract(&self, other: &Self) -> Self {
        Self(&self.0 - &other.0)
    }
}

impl CommutativeRing for Q {}

impl ApproxEq for Q {
    fn approx_eq(&self, other: &Self, _tolerance: f64) -> bool {
        self == other
    }
}

impl From<i64> for Q {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl std::fmt::Display for Q {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
