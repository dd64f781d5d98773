//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::Rational;

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn non_zero_rational() -> impl Strategy<Value = Rational> {
        (non_zero_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    proptest! {
        #[test]
        fn construction_matches_quotient(n in small_int(), d in non_zero_int()) {
            let a = Rational::from_i64(n, d);
            prop_assert_eq!(&a * &Rational::from(d), Rational::from(n));
            prop_assert_eq!(Rational::from_ratio(n, d).unwrap(), a);
        }

        #[test]
        fn construction_sign_follows_operands(n in small_int(), d in non_zero_int()) {
            let a = Rational::from_ratio(n, d).unwrap();
            let expected = i8::try_from(n.signum() * d.signum()).unwrap();
            prop_assert_eq!(a.signum(), expected);
            prop_assert!(!a.denominator().is_negative());
        }

        #[test]
        fn rational_add_commutative(a in rational(), b in rational()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn rational_mul_commutative(a in rational(), b in rational()) {
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn rational_distributive(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(&a * &(&b + &c), &a * &b + &a * &c);
        }

        #[test]
        fn rational_additive_inverse(a in rational()) {
            prop_assert!((a.clone() + (-a)).is_zero());
        }

        #[test]
        fn rational_multiplicative_inverse(a in non_zero_rational()) {
            let inv = a.recip();
            prop_assert!((a * inv).is_one());
        }

        #[test]
        fn checked_div_undoes_mul(a in rational(), b in non_zero_rational()) {
            let product = &a * &b;
            prop_assert_eq!(product.checked_div(&b).unwrap(), a);
        }

        #[test]
        fn sign_matches_comparison(a in rational()) {
            let expected = match a.cmp(&Rational::zero()) {
                std::cmp::Ordering::Less => -1,
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Greater => 1,
            };
            prop_assert_eq!(a.signum(), expected);
        }

        #[test]
        fn zap_only_removes_small_values(a in rational()) {
            let eps = Rational::from_i64(1, 100);
            let zapped = a.clone().zap(&eps);
            if a.abs() < eps {
                prop_assert!(zapped.is_zero());
            } else {
                prop_assert_eq!(zapped, a);
            }
        }

        #[test]
        fn text_round_trips_through_f64(n in small_int(), d in non_zero_int()) {
            let a = Rational::from_i64(n, d);
            let parsed: f64 = a.to_text().parse().unwrap();
            prop_assert!((parsed - a.to_f64()).abs() < 1e-6);
        }
    }
}
