//! Property-based tests for linear polynomial arithmetic.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use lineq_integers::Rational;
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::{LinearPoly, VarId};

    fn small_coeff() -> impl Strategy<Value = Rational> {
        (-10i64..=10i64).prop_map(Rational::from)
    }

    fn non_zero_coeff() -> impl Strategy<Value = Rational> {
        prop_oneof![(-10i64..=-1i64), (1i64..=10i64)].prop_map(Rational::from)
    }

    // Polynomials in up to six variables.
    fn small_poly() -> impl Strategy<Value = LinearPoly> {
        (
            small_coeff(),
            proptest::collection::vec((1u32..=6u32, small_coeff()), 0..=6),
        )
            .prop_map(|(c, terms)| LinearPoly::new(c, terms))
    }

    fn assignment() -> impl Strategy<Value = BTreeMap<VarId, Rational>> {
        proptest::collection::vec(small_coeff(), 6).prop_map(|values| {
            (1u32..).zip(values).collect::<BTreeMap<_, _>>()
        })
    }

    fn well_formed(p: &LinearPoly) -> bool {
        let terms = p.terms();
        terms.iter().all(|(vid, c)| *vid != 0 && !c.is_zero())
            && terms.windows(2).all(|w| w[0].0 < w[1].0)
    }

    proptest! {
        #[test]
        fn add_negation_is_zero(p in small_poly()) {
            let sum = p.add(&p.neg());
            prop_assert!(sum.is_constant());
            prop_assert!(sum.constant_term().is_zero());
        }

        #[test]
        fn sub_then_add_is_identity(p in small_poly(), q in small_poly()) {
            prop_assert_eq!(p.sub(&q).add(&q), p);
        }

        #[test]
        fn scale_then_divide_is_identity(p in small_poly(), k in non_zero_coeff()) {
            prop_assert_eq!(p.scale(&k).divide(&k).unwrap(), p);
        }

        #[test]
        fn add_commutative(p in small_poly(), q in small_poly()) {
            prop_assert_eq!(p.add(&q), q.add(&p));
        }

        #[test]
        fn operations_keep_terms_sorted_and_non_zero(
            p in small_poly(),
            q in small_poly(),
            k in small_coeff(),
        ) {
            prop_assert!(well_formed(&p.add(&q)));
            prop_assert!(well_formed(&p.sub(&q)));
            prop_assert!(well_formed(&p.scale(&k)));
            let mut r = p.clone();
            r += &q;
            prop_assert!(well_formed(&r));
        }

        #[test]
        fn substitute_agrees_with_evaluation(
            p in small_poly(),
            vid in 1u32..=6u32,
            c in small_coeff(),
            values in assignment(),
        ) {
            let substituted = p.substitute(vid, &LinearPoly::constant(c.clone()));
            prop_assert!(!substituted.contains(vid));

            let direct = p.evaluate(|v| if v == vid { c.clone() } else { values[&v].clone() });
            let via_substitution = substituted.evaluate(|v| values[&v].clone());
            prop_assert_eq!(direct, via_substitution);
        }

        #[test]
        fn substitute_polynomial_agrees_with_evaluation(
            p in small_poly(),
            q in small_poly(),
            values in assignment(),
        ) {
            // replace x.1 by q, where q must not mention x.1
            let mut q = q;
            q.set_term(1, Rational::zero());
            let substituted = p.substitute(1, &q);

            let q_value = q.evaluate(|v| values[&v].clone());
            let direct = p.evaluate(|v| if v == 1 { q_value.clone() } else { values[&v].clone() });
            prop_assert_eq!(direct, substituted.evaluate(|v| values[&v].clone()));
        }

        #[test]
        fn max_abs_coeff_is_maximal(p in small_poly()) {
            let (vid, c) = p.max_abs_coeff(|_| false);
            if p.is_constant() {
                prop_assert_eq!(vid, 0);
            } else {
                prop_assert_eq!(p.coeff(vid), c.clone());
                for (other, oc) in p.terms() {
                    prop_assert!(oc.abs() <= c.abs());
                    if oc.abs() == c.abs() {
                        prop_assert!(*other >= vid);
                    }
                }
            }
        }
    }
}
