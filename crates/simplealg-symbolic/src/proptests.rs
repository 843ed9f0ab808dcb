//! Property-based tests: simplification never changes a value.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::eval::Bindings;
    use crate::expr::Symbolic;
    use simplealg_rings::{FiniteField, FiniteFieldFactory, RingElement};

    type F101 = FiniteField<101>;
    type S = Symbolic<F101>;

    const FACTORY: FiniteFieldFactory<101> = FiniteFieldFactory;

    fn leaf() -> impl Strategy<Value = S> {
        prop_oneof![
            Just(S::zero()),
            Just(S::identity()),
            (0u64..101).prop_map(|v| S::constant(F101::new(v))),
            (0u32..3).prop_map(S::variable),
        ]
    }

    fn expr() -> impl Strategy<Value = S> {
        leaf().prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a.add(&b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a.multiply(&b)),
                inner.clone().prop_map(|a| a.negate()),
                inner.clone().prop_map(|a| a.invert_left().unwrap_or(a)),
                inner.prop_map(|a| a.invert_right().unwrap_or(a)),
            ]
        })
    }

    fn bindings() -> impl Strategy<Value = Bindings<F101>> {
        prop::collection::vec(0u64..101, 3).prop_map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(id, v)| (id as u32, F101::new(v)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn sum_evaluates_to_sum(a in expr(), b in expr(), env in bindings()) {
            if let (Ok(x), Ok(y)) = (a.evaluate(&FACTORY, &env), b.evaluate(&FACTORY, &env)) {
                prop_assert_eq!(a.add(&b).evaluate(&FACTORY, &env), Ok(x.add(&y)));
            }
        }

        #[test]
        fn product_evaluates_to_product(a in expr(), b in expr(), env in bindings()) {
            if let (Ok(x), Ok(y)) = (a.evaluate(&FACTORY, &env), b.evaluate(&FACTORY, &env)) {
                prop_assert_eq!(a.multiply(&b).evaluate(&FACTORY, &env), Ok(x.multiply(&y)));
            }
        }

        #[test]
        fn negation_evaluates_to_negation(a in expr(), env in bindings()) {
            if let Ok(x) = a.evaluate(&FACTORY, &env) {
                prop_assert_eq!(a.negate().evaluate(&FACTORY, &env), Ok(x.negate()));
            }
        }

        #[test]
        fn inverse_evaluates_to_inverse(a in expr(), env in bindings()) {
            if let Ok(Ok(inv)) = a.evaluate(&FACTORY, &env).map(|x| x.invert_left()) {
                let symbolic = a.invert_left();
                prop_assert!(symbolic.is_ok());
                if let Ok(symbolic) = symbolic {
                    prop_assert_eq!(symbolic.evaluate(&FACTORY, &env), Ok(inv));
                }
            }
        }
    }
}
