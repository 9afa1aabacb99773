use crate::error::{Result, WallError};
use crate::exponent::ExponentVector;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::collections::HashSet;
use std::fmt;

/// Trace-zero rational weight of a one-parameter subgroup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightVector(Vec<BigRational>);

impl WeightVector {
    /// Entries must sum to exactly zero and not all vanish.
    pub fn new(entries: Vec<BigRational>) -> Result<Self> {
        let total = entries.iter().fold(BigRational::zero(), |acc, x| acc + x);
        if !total.is_zero() {
            return Err(WallError::InvalidWeight(format!(
                "entries sum to {}, expected 0",
                total
            )));
        }
        if entries.iter().all(|x| x.is_zero()) {
            return Err(WallError::InvalidWeight("all entries are zero".into()));
        }
        Ok(Self(entries))
    }

    /// Build from `(numerator, denominator)` pairs.
    pub fn from_fractions(pairs: &[(i64, i64)]) -> Result<Self> {
        if let Some(&(n, _)) = pairs.iter().find(|&&(_, d)| d == 0) {
            return Err(WallError::InvalidWeight(format!("{}/0 has a zero denominator", n)));
        }
        Self::new(
            pairs
                .iter()
                .map(|&(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[BigRational] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn is_orthogonal_to(&self, e: &ExponentVector) -> bool {
        e.dot(&self.0).is_zero()
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|x| x.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Ordered, duplicate-free set of exponent vectors fed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexSet {
    points: Vec<ExponentVector>,
}

impl IndexSet {
    /// Keeps the first occurrence of each point.
    pub fn new(points: Vec<ExponentVector>) -> Self {
        let mut seen = HashSet::new();
        let points = points
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();
        Self { points }
    }

    /// Validate literal rows; any bad row aborts construction.
    pub fn from_literals<R: AsRef<[i64]>>(rows: &[R], dimension: usize, degree: u32) -> Result<Self> {
        let points = rows
            .iter()
            .map(|r| ExponentVector::new(r.as_ref(), dimension, degree))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(points))
    }

    /// Members of `universe` orthogonal to `weight`, in universe order.
    pub fn zero_weight(weight: &WeightVector, universe: &[ExponentVector]) -> Self {
        Self {
            points: universe
                .iter()
                .filter(|e| weight.is_orthogonal_to(e))
                .cloned()
                .collect(),
        }
    }

    pub fn points(&self) -> &[ExponentVector] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Common length of the members, if the set is nonempty.
    pub fn dimension(&self) -> Option<usize> {
        self.points.first().map(|p| p.dimension())
    }

    /// Same points, reverse order.
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().cloned().collect(),
        }
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.points {
            writeln!(f, "{}", p)?;
        }
        Ok(())
    }
}
