//! Property-based tests for the ring contract.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{ApproxEq, FiniteField, Q, Quaternion, RingElement};

    type F101 = FiniteField<101>;

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn quaternion() -> impl Strategy<Value = Quaternion<f64>> {
        (-10.0..10.0, -10.0..10.0, -10.0..10.0, -10.0..10.0)
            .prop_map(|(w, x, y, z)| Quaternion::new(w, x, y, z))
    }

    proptest! {
        #[test]
        fn rational_distributive(a in small_int(), b in small_int(), c in non_zero_int()) {
            let a = Q::new(a, c);
            let b = Q::from_integer(b);
            let c = Q::from_integer(c);
            prop_assert_eq!(
                a.multiply(&b.add(&c)),
                a.multiply(&b).add(&a.multiply(&c))
            );
        }

        #[test]
        fn rational_inverse_two_sided(n in non_zero_int(), d in non_zero_int()) {
            let a = Q::new(n, d);
            let left = a.invert_left().unwrap();
            let right = a.invert_right().unwrap();
            prop_assert_eq!(&left, &right);
            prop_assert_eq!(left.multiply(&a), Q::from_integer(1));
        }

        #[test]
        fn finite_field_inverse(v in 1u64..101) {
            let a = F101::new(v);
            let inv = a.invert_left().unwrap();
            prop_assert_eq!(inv.multiply(&a), F101::new(1));
            prop_assert_eq!(a.multiply(&inv), F101::new(1));
        }

        #[test]
        fn finite_field_negate(v in small_int()) {
            let a = F101::from_signed(v);
            prop_assert!(a.add(&a.negate()).is_zero());
        }

        #[test]
        fn quaternion_associative(a in quaternion(), b in quaternion(), c in quaternion()) {
            let lhs = a.multiply(&b).multiply(&c);
            let rhs = a.multiply(&b.multiply(&c));
            prop_assert!(lhs.approx_eq(&rhs, 1e-9));
        }

        #[test]
        fn quaternion_inverse_reverses_products(a in quaternion(), b in quaternion()) {
            prop_assume!(a.norm_sqr() > 1e-3 && b.norm_sqr() > 1e-3);
            // (ab)^-1 = b^-1 a^-1
            let lhs = a.multiply(&b).invert_left().unwrap();
            let rhs = b.invert_left().unwrap().multiply(&a.invert_left().unwrap());
            prop_assert!(lhs.approx_eq(&rhs, 1e-9));
        }
    }
}
