//! Normalization of rational directions to primitive integer vectors.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Positive factor `λ` such that `λ·v` is an integer vector whose entries
/// have gcd 1. Returns 1 for the zero vector.
pub fn clearing_factor(v: &[BigRational]) -> BigRational {
    let lcm = v
        .iter()
        .fold(BigInt::one(), |acc, x| acc.lcm(x.denom()));
    let gcd = v.iter().fold(BigInt::zero(), |acc, x| {
        let scaled = (x.numer() * &lcm) / x.denom();
        acc.gcd(&scaled)
    });
    if gcd.is_zero() {
        return BigRational::one();
    }
    BigRational::new(lcm, gcd)
}

/// Scale `v` by a positive factor to a primitive integer vector, keeping its
/// orientation.
pub fn clear_denominators(v: &[BigRational]) -> Vec<BigInt> {
    let factor = clearing_factor(v);
    v.iter().map(|x| (x * &factor).to_integer()).collect()
}

/// Primitive integer vector on the line through `v`, with its first nonzero
/// entry positive. The zero vector maps to itself.
pub fn primitive(v: &[BigRational]) -> Vec<BigInt> {
    let mut out = clear_denominators(v);
    if out.iter().find(|x| !x.is_zero()).is_some_and(|x| x.is_negative()) {
        for x in out.iter_mut() {
            *x = -&*x;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn ints(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&a| BigInt::from(a)).collect()
    }

    fn to_rational(v: &[BigInt]) -> Vec<BigRational> {
        v.iter().cloned().map(BigRational::from_integer).collect()
    }

    /// The rational `λ` with `p = λ·v`, if one exists.
    fn ratio(p: &[BigInt], v: &[BigRational]) -> Option<BigRational> {
        let i = v.iter().position(|x| !x.is_zero())?;
        let lambda = BigRational::from_integer(p[i].clone()) / &v[i];
        p.iter()
            .zip(v)
            .all(|(pi, vi)| BigRational::from_integer(pi.clone()) == vi * &lambda)
            .then_some(lambda)
    }

    #[test]
    fn clears_denominators_and_common_factors() {
        let v = vec![q(1, 2), q(-1, 3), q(0, 1), q(5, 6)];
        assert_eq!(primitive(&v), ints(&[3, -2, 0, 5]));

        let v = vec![q(4, 1), q(6, 1), q(-10, 1)];
        assert_eq!(primitive(&v), ints(&[2, 3, -5]));
    }

    #[test]
    fn first_nonzero_entry_is_made_positive() {
        let v = vec![q(0, 1), q(-6, 1), q(-4, 1), q(2, 1)];
        assert_eq!(primitive(&v), ints(&[0, 3, 2, -1]));
        assert_eq!(clear_denominators(&v), ints(&[0, -3, -2, 1]));
    }

    #[test]
    fn zero_vector_maps_to_itself() {
        let v = vec![q(0, 1); 5];
        assert_eq!(primitive(&v), ints(&[0, 0, 0, 0, 0]));
        assert_eq!(clearing_factor(&v), BigRational::one());
        assert!(primitive(&[]).is_empty());
    }

    fn rational_vec() -> impl Strategy<Value = Vec<BigRational>> {
        prop::collection::vec((-40i64..=40, 1i64..=12), 1..8)
            .prop_map(|pairs| pairs.into_iter().map(|(n, d)| q(n, d)).collect())
    }

    proptest! {
        #[test]
        fn primitive_is_idempotent(v in rational_vec()) {
            let p = primitive(&v);
            prop_assert_eq!(primitive(&to_rational(&p)), p);
        }

        #[test]
        fn primitive_stays_on_the_line(v in rational_vec()) {
            let p = primitive(&v);
            if v.iter().all(|x| x.is_zero()) {
                prop_assert!(p.iter().all(|x| x.is_zero()));
            } else {
                let lambda = ratio(&p, &v);
                prop_assert!(lambda.is_some());
                let lambda = lambda.unwrap();
                prop_assert!(!lambda.is_zero());
                let leading_positive = v.iter().find(|x| !x.is_zero()).map(|x| x.is_positive());
                prop_assert_eq!(lambda.is_positive(), leading_positive == Some(true));
            }
        }

        #[test]
        fn clearing_keeps_orientation(v in rational_vec()) {
            prop_assume!(v.iter().any(|x| !x.is_zero()));
            let c = clear_denominators(&v);
            let lambda = ratio(&c, &v).unwrap();
            prop_assert!(lambda.is_positive());
            let g = c.iter().fold(BigInt::zero(), |acc, x| acc.gcd(x));
            prop_assert_eq!(g, BigInt::one());
        }
    }
}
