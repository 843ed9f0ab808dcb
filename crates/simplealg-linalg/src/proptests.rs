//! Property-based tests for matrix inversion.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::elimination::Inversion;
    use crate::square_matrix::SquareMatrix;
    use simplealg_rings::{FiniteField, FiniteFieldFactory, Q, QFactory, RingElement};

    type F7 = FiniteField<7>;

    /// Small sparse integer matrices of dimension 1 to 4.
    fn dense_ints() -> impl Strategy<Value = Vec<Vec<i64>>> {
        (1usize..=4).prop_flat_map(|n| {
            let cell = prop_oneof![3 => Just(0i64), 2 => -3i64..=3];
            prop::collection::vec(prop::collection::vec(cell, n), n)
        })
    }

    fn dense_pair() -> impl Strategy<Value = (Vec<Vec<i64>>, Vec<Vec<i64>>)> {
        (1usize..=4).prop_flat_map(|n| {
            let cell = || prop_oneof![3 => Just(0i64), 2 => -3i64..=3];
            (
                prop::collection::vec(prop::collection::vec(cell(), n), n),
                prop::collection::vec(prop::collection::vec(cell(), n), n),
            )
        })
    }

    fn q_matrix(dense: &[Vec<i64>]) -> SquareMatrix<Q> {
        let rows = dense
            .iter()
            .map(|r| r.iter().map(|&v| Q::from_integer(v)).collect())
            .collect();
        SquareMatrix::from_rows(rows, &QFactory)
    }

    fn f7_matrix(dense: &[Vec<i64>]) -> SquareMatrix<F7> {
        let rows = dense
            .iter()
            .map(|r| r.iter().map(|&v| F7::from_signed(v)).collect())
            .collect();
        SquareMatrix::from_rows(rows, &FiniteFieldFactory::<7>)
    }

    proptest! {
        #[test]
        fn invertible_iff_nonzero_determinant(dense in dense_ints()) {
            let m = q_matrix(&dense);
            let singular = m.determinant().is_zero();
            for mode in Inversion::ALL {
                match m.invert(mode) {
                    Ok(inv) => {
                        prop_assert!(!singular);
                        prop_assert!(mode.verify(&m, &inv, 0.0));
                    }
                    Err(_) => prop_assert!(singular),
                }
            }
        }

        #[test]
        fn sides_agree_over_q(dense in dense_ints()) {
            let m = q_matrix(&dense);
            prop_assert_eq!(m.invert_left().ok(), m.invert_right().ok());
        }

        #[test]
        fn finite_field_inverse(dense in dense_ints()) {
            let m = f7_matrix(&dense);
            let singular = m.determinant().is_zero();
            match m.invert_left() {
                Ok(inv) => {
                    prop_assert!(!singular);
                    prop_assert_eq!(inv.multiply(&m), SquareMatrix::identity(m.dimension(), &FiniteFieldFactory::<7>));
                }
                Err(_) => prop_assert!(singular),
            }
        }

        #[test]
        fn transpose_swaps_sides(dense in dense_ints()) {
            let m = q_matrix(&dense);
            let via_rows = m.transpose().invert_left().ok().map(|inv| inv.transpose());
            prop_assert_eq!(via_rows, m.invert_right().ok());
        }

        #[test]
        fn inverse_reverses_products((a, b) in dense_pair()) {
            let (a, b) = (q_matrix(&a), q_matrix(&b));
            if let (Ok(a_inv), Ok(b_inv)) = (a.invert_left(), b.invert_left()) {
                let ab_inv = a.multiply(&b).invert_left();
                prop_assert_eq!(ab_inv, Ok(b_inv.multiply(&a_inv)));
            }
        }
    }
}
