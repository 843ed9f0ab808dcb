//! Floating-point scalars as ring elements.
//!
//! Zero-testing is exact: `1e-300` is a perfectly good pivot. Any tolerance
//! belongs to the caller, not to the ring.

use std::marker::PhantomData;

use crate::error::NotInvertible;
use crate::traits::{ApproxEq, CommutativeRing, RingElement, RingFactory};

/// Factory for a primitive float ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloatFactory<T>(PhantomData<T>);

impl<T> FloatFactory<T> {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

/// Factory for `f64` entries.
pub type F64Factory = FloatFactory<f64>;

/// Factory for `f32` entries.
pub type F32Factory = FloatFactory<f32>;

macro_rules! float_ring {
    ($t:ty) => {
        impl RingElement for $t {
            type Factory = FloatFactory<$t>;

            fn add(&self, other: &Self) -> Self {
                self + other
            }

            fn negate(&self) -> Self {
                -self
            }

            fn multiply(&self, other: &Self) -> Self {
                self * other
            }

            fn invert_left(&self) -> Result<Self, NotInvertible> {
                if *self == 0.0 {
                    Err(NotInvertible::Zero)
                } else {
                    Ok(self.recip())
                }
            }

            fn invert_right(&self) -> Result<Self, NotInvertible> {
                RingElement::invert_left(self)
            }

            fn is_zero(&self) -> bool {
                *self == 0.0
            }

            fn parent(&self) -> FloatFactory<$t> {
                FloatFactory::new()
            }

            fn is_identity(&self) -> bool {
                *self == 1.0
            }

            fn subtract(&self, other: &Self) -> Self {
                self - other
            }
        }

        impl CommutativeRing for $t {}

        impl RingFactory for FloatFactory<$t> {
            type Element = $t;

            fn zero(&self) -> $t {
                0.0
            }

            fn identity(&self) -> $t {
                1.0
            }
        }

        impl ApproxEq for $t {
            #[allow(clippy::cast_lossless, clippy::unnecessary_cast)]
            fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
                ((*self - *other) as f64).abs() <= tolerance
            }
        }
    };
}

float_ring!(f64);
float_ring!(f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert() {
        assert_eq!(RingElement::invert_left(&4.0_f64), Ok(0.25));
        assert_eq!(RingElement::invert_right(&-0.5_f64), Ok(-2.0));
        assert_eq!(RingElement::invert_left(&0.0_f64), Err(NotInvertible::Zero));
    }

    #[test]
    fn test_factory() {
        let fac = F64Factory::new();
        assert_eq!(fac.zero(), 0.0);
        assert_eq!(fac.identity(), 1.0);
        assert!(RingElement::is_zero(&F32Factory::new().zero()));
    }

    #[test]
    fn test_approx_eq() {
        assert!(1.0_f64.approx_eq(&(1.0 + 1e-12), 1e-9));
        assert!(!1.0_f64.approx_eq(&1.1, 1e-9));
        assert!(2.0_f32.approx_eq(&2.000_001, 1e-5));
    }
}
