use crate::error::{ExponentDefect, Result, WallError};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::fmt;

/// Exponent vector of a monomial: nonnegative entries summing to the degree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExponentVector(Vec<u32>);

impl ExponentVector {
    /// Validate raw entries against the ambient dimension and degree.
    pub fn new(entries: &[i64], dimension: usize, degree: u32) -> Result<Self> {
        let reject = |defect| WallError::InvalidExponentVector {
            entries: entries.to_vec(),
            defect,
        };
        if entries.len() != dimension {
            return Err(reject(ExponentDefect::WrongLength {
                expected: dimension,
            }));
        }
        if let Some(position) = entries.iter().position(|&a| a < 0) {
            return Err(reject(ExponentDefect::NegativeEntry { position }));
        }
        // Bounding every entry by the degree keeps the sum below overflow.
        if let Some(position) = entries.iter().position(|&a| a > degree as i64) {
            return Err(reject(ExponentDefect::ExceedsDegree { position }));
        }
        let total: i64 = entries.iter().sum();
        if total != degree as i64 {
            return Err(reject(ExponentDefect::WrongDegree {
                expected: degree,
                found: total,
            }));
        }
        Ok(Self(entries.iter().map(|&a| a as u32).collect()))
    }

    pub fn entries(&self) -> &[u32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn degree(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Exact pairing `w · e`.
    pub fn dot(&self, w: &[BigRational]) -> BigRational {
        self.0
            .iter()
            .zip(w)
            .filter(|(&a, _)| a != 0)
            .fold(BigRational::zero(), |acc, (&a, wi)| {
                acc + wi * BigRational::from_integer(BigInt::from(a))
            })
    }

    pub fn to_rational(&self) -> Vec<BigRational> {
        self.0
            .iter()
            .map(|&a| BigRational::from_integer(BigInt::from(a)))
            .collect()
    }
}

impl fmt::Display for ExponentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|a| a.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// All exponent vectors of the given length and total degree.
///
/// Ordered with the leading coordinate descending, so `(degree, 0, …, 0)`
/// comes first. The count is `C(dimension + degree - 1, degree)`.
pub fn all_exponents(dimension: usize, degree: u32) -> Vec<ExponentVector> {
    fn fill(prefix: &mut Vec<u32>, remaining: u32, slots: usize, out: &mut Vec<ExponentVector>) {
        if slots == 1 {
            prefix.push(remaining);
            out.push(ExponentVector(prefix.clone()));
            prefix.pop();
            return;
        }
        for a in (0..=remaining).rev() {
            prefix.push(a);
            fill(prefix, remaining - a, slots - 1, out);
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    if dimension == 0 {
        return out;
    }
    fill(&mut Vec::with_capacity(dimension), degree, dimension, &mut out);
    out
}
