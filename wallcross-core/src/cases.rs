//! Fixed table of 1-PS weight vectors and curated index sets.
//!
//! Case 22 repeats case 13 and is only visited when asked for explicitly.

use crate::engine::{EngineConfig, NormalVectorEngine};
use crate::error::{Result, WallError};
use crate::exponent::all_exponents;
use crate::index_set::{IndexSet, WeightVector};
use crate::linear_system::dot;
use crate::primitive::clear_denominators;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::collections::BTreeMap;

/// Index of the redundant duplicate entry.
pub const DUPLICATE_CASE: usize = 22;

/// Which engine mode a curated index set feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuratedMode {
    SingleShot,
    Enumerative,
}

#[derive(Debug, Clone, Copy)]
pub struct CuratedSet {
    pub mode: CuratedMode,
    pub points: &'static [[i64; 7]],
}

/// One row of the weight table.
#[derive(Debug, Clone, Copy)]
pub struct CaseSpec {
    pub k: usize,
    /// `(numerator, denominator)` per coordinate.
    pub weight: &'static [(i64, i64)],
    pub curated: Option<CuratedSet>,
}

impl CaseSpec {
    pub fn weight_vector(&self) -> Result<WeightVector> {
        WeightVector::from_fractions(self.weight)
    }

    /// The curated literal set, validated.
    pub fn curated_index_set(&self, config: &EngineConfig) -> Result<IndexSet> {
        let curated = self.curated.ok_or(WallError::MissingCuratedSet(self.k))?;
        IndexSet::from_literals(curated.points, config.dimension, config.degree)
    }

    /// Zero-weight set of this case's weight over the full universe.
    pub fn derived_index_set(&self, config: &EngineConfig) -> Result<IndexSet> {
        let weight = self.weight_vector()?;
        let universe = all_exponents(config.dimension, config.degree);
        Ok(IndexSet::zero_weight(&weight, &universe))
    }

    /// Curated set when the case has one, otherwise the derived set.
    pub fn index_set(&self, config: &EngineConfig) -> Result<IndexSet> {
        match self.curated {
            Some(_) => self.curated_index_set(config),
            None => self.derived_index_set(config),
        }
    }
}

/// Equality set of the case-2 wall. The points sit off the case-2 zero-weight
/// slice; the case-2 weight is orthogonal to their wall normal instead, so
/// every five-point subset recovers that one wall.
const CASE_2_POINTS: [[i64; 7]; 6] = [
    [0, 0, 2, 0, 1, 0, 0],
    [0, 1, 0, 0, 2, 0, 0],
    [0, 1, 0, 1, 0, 1, 0],
    [1, 0, 0, 0, 0, 2, 0],
    [0, 1, 1, 0, 0, 0, 1],
    [1, 0, 0, 1, 0, 0, 1],
];

const CASE_6_POINTS: [[i64; 7]; 6] = [
    [1, 0, 2, 0, 0, 0, 0],
    [1, 0, 0, 1, 0, 0, 1],
    [1, 0, 0, 0, 1, 1, 0],
    [0, 1, 0, 1, 1, 0, 0],
    [0, 1, 0, 0, 0, 0, 2],
    [0, 0, 1, 0, 0, 2, 0],
];

const CASE_8_POINTS: [[i64; 7]; 16] = [
    [2, 0, 0, 0, 0, 0, 1],
    [1, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 2, 0, 0],
    [1, 0, 0, 0, 1, 1, 0],
    [1, 0, 0, 0, 0, 2, 0],
    [0, 2, 0, 0, 0, 0, 1],
    [0, 1, 1, 0, 0, 0, 1],
    [0, 1, 0, 0, 2, 0, 0],
    [0, 1, 0, 0, 1, 1, 0],
    [0, 1, 0, 0, 0, 2, 0],
    [0, 0, 2, 0, 0, 0, 1],
    [0, 0, 1, 0, 2, 0, 0],
    [0, 0, 1, 0, 1, 1, 0],
    [0, 0, 1, 0, 0, 2, 0],
    [0, 0, 0, 3, 0, 0, 0],
];

const fn int(n: i64) -> (i64, i64) {
    (n, 1)
}

static CASES: [CaseSpec; 22] = [
    CaseSpec {
        k: 1,
        weight: &[int(1), int(1), int(1), int(0), int(0), int(-1), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 2,
        weight: &[int(-3), int(1), int(3), int(2), int(0), int(-1), int(-2)],
        curated: Some(CuratedSet {
            mode: CuratedMode::Enumerative,
            points: &CASE_2_POINTS,
        }),
    },
    CaseSpec {
        k: 3,
        weight: &[int(2), int(1), int(1), int(0), int(-1), int(-1), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 4,
        weight: &[int(1), int(1), int(0), int(0), int(0), int(-1), int(-1)],
        curated: None,
    },
    CaseSpec {
        k: 5,
        weight: &[int(3), int(1), int(1), int(-1), int(-1), int(-1), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 6,
        weight: &[(-2, 3), int(-1), (1, 3), (1, 6), (5, 6), (-1, 6), (1, 2)],
        curated: Some(CuratedSet {
            mode: CuratedMode::SingleShot,
            points: &CASE_6_POINTS,
        }),
    },
    CaseSpec {
        k: 7,
        weight: &[(3, 2), (1, 2), (1, 2), int(0), (-1, 2), int(-1), int(-1)],
        curated: None,
    },
    CaseSpec {
        k: 8,
        weight: &[(2, 3), (2, 3), (2, 3), int(0), (-1, 3), (-1, 3), (-4, 3)],
        curated: Some(CuratedSet {
            mode: CuratedMode::SingleShot,
            points: &CASE_8_POINTS,
        }),
    },
    CaseSpec {
        k: 9,
        weight: &[int(4), int(2), int(1), int(0), int(-1), int(-2), int(-4)],
        curated: None,
    },
    CaseSpec {
        k: 10,
        weight: &[int(2), int(2), int(0), int(0), int(-1), int(-1), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 11,
        weight: &[int(3), int(2), int(0), int(-1), int(-1), int(-1), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 12,
        weight: &[int(1), int(1), int(1), int(1), int(-1), int(-1), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 13,
        weight: &[int(5), int(3), int(1), int(-1), int(-2), int(-2), int(-4)],
        curated: None,
    },
    CaseSpec {
        k: 14,
        weight: &[int(3), int(2), int(0), int(0), int(-1), int(-2), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 15,
        weight: &[int(3), int(3), int(0), int(-1), int(-1), int(-2), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 16,
        weight: &[int(4), int(2), int(0), int(0), int(-1), int(-1), int(-4)],
        curated: None,
    },
    CaseSpec {
        k: 17,
        weight: &[int(4), int(1), int(1), int(-1), int(-1), int(-2), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 18,
        weight: &[int(2), int(2), int(1), int(-1), int(-1), int(-1), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 19,
        weight: &[int(5), int(2), int(0), int(-1), int(-1), int(-2), int(-3)],
        curated: None,
    },
    CaseSpec {
        k: 20,
        weight: &[int(3), int(1), int(0), int(0), int(-1), int(-1), int(-2)],
        curated: None,
    },
    CaseSpec {
        k: 21,
        weight: &[int(6), int(2), int(1), int(-1), int(-2), int(-2), int(-4)],
        curated: None,
    },
    CaseSpec {
        k: DUPLICATE_CASE,
        weight: &[int(5), int(3), int(1), int(-1), int(-2), int(-2), int(-4)],
        curated: None,
    },
];

/// Process-wide constant table of cases.
#[derive(Debug, Clone, Copy)]
pub struct WeightTable {
    cases: &'static [CaseSpec],
}

impl WeightTable {
    pub fn standard() -> Self {
        Self { cases: &CASES }
    }

    pub fn case(&self, k: usize) -> Result<&'static CaseSpec> {
        self.cases
            .iter()
            .find(|c| c.k == k)
            .ok_or(WallError::UnknownCase(k))
    }

    /// Cases in index order; the duplicate entry only when asked for.
    pub fn cases(&self, include_duplicate: bool) -> impl Iterator<Item = &'static CaseSpec> + '_ {
        self.cases
            .iter()
            .filter(move |c| include_duplicate || c.k != DUPLICATE_CASE)
    }

    /// Check every row: weights trace-zero and of the right length, curated
    /// literals valid, single-shot literals lying on a face through the
    /// barycenter, enumerative weights orthogonal to their curated wall.
    /// Apart from the duplicate entry no two weights may be equivalent.
    pub fn verify(&self, config: &EngineConfig) -> Result<()> {
        let engine = NormalVectorEngine::new(config.clone());
        let mut seen: BTreeMap<Vec<BigInt>, usize> = BTreeMap::new();
        for case in self.cases {
            let weight = case.weight_vector()?;
            if weight.dimension() != config.dimension {
                return Err(WallError::DimensionMismatch {
                    expected: config.dimension,
                    found: weight.dimension(),
                });
            }
            if case.k != DUPLICATE_CASE {
                let key = orbit_key(&weight);
                if let Some(&first) = seen.get(&key) {
                    return Err(WallError::EquivalentWeights { first, second: case.k });
                }
                seen.insert(key, case.k);
            }

            let Some(curated) = case.curated else {
                continue;
            };
            let set = case.curated_index_set(config)?;
            let normal = engine.single_shot_normal(&set)?;
            match curated.mode {
                CuratedMode::SingleShot if !engine.vanishes_on(&normal, &set) => {
                    return Err(WallError::NotThroughBarycenter(case.k));
                }
                CuratedMode::Enumerative => {
                    let normal: Vec<BigRational> =
                        normal.into_iter().map(BigRational::from_integer).collect();
                    if !dot(&normal, weight.entries()).is_zero() {
                        return Err(WallError::WeightOffWall(case.k));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Invariant of a weight under positive or negative scaling and coordinate
/// permutation: the larger of the sorted integer forms of `r` and `-r`.
fn orbit_key(weight: &WeightVector) -> Vec<BigInt> {
    let sorted = |mut v: Vec<BigInt>| {
        v.sort_by(|a, b| b.cmp(a));
        v
    };
    let forward = clear_denominators(weight.entries());
    let backward: Vec<BigInt> = forward.iter().map(|x| -x).collect();
    sorted(forward).max(sorted(backward))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_weight_is_trace_zero() {
        let table = WeightTable::standard();
        for case in table.cases(true) {
            let total = case
                .weight
                .iter()
                .fold(BigRational::zero(), |acc, &(n, d)| {
                    acc + BigRational::new(n.into(), d.into())
                });
            assert!(total.is_zero(), "case {} sums to {}", case.k, total);
            assert_eq!(case.weight.len(), 7, "case {}", case.k);
        }
    }

    #[test]
    fn table_covers_one_to_twenty_one_plus_duplicate() {
        let table = WeightTable::standard();
        let ks: Vec<usize> = table.cases(false).map(|c| c.k).collect();
        assert_eq!(ks, (1..=21).collect::<Vec<_>>());
        assert_eq!(table.cases(true).count(), 22);

        let dup = table.case(DUPLICATE_CASE).unwrap();
        let original = table.case(13).unwrap();
        assert_eq!(dup.weight, original.weight);
        assert_eq!(table.case(23).unwrap_err(), WallError::UnknownCase(23));
    }

    #[test]
    fn table_passes_its_self_check() {
        WeightTable::standard()
            .verify(&EngineConfig::default())
            .unwrap();
    }

    #[test]
    fn curated_sets_choose_their_mode() {
        let table = WeightTable::standard();
        let config = EngineConfig::default();
        assert_eq!(table.case(2).unwrap().curated.unwrap().mode, CuratedMode::Enumerative);
        assert_eq!(table.case(8).unwrap().index_set(&config).unwrap().len(), 16);
        assert_eq!(
            table.case(1).unwrap().curated_index_set(&config).unwrap_err(),
            WallError::MissingCuratedSet(1)
        );
        assert_eq!(table.case(1).unwrap().index_set(&config).unwrap().len(), 16);
    }

    static PROPORTIONAL: [CaseSpec; 2] = [
        CaseSpec {
            k: 1,
            weight: &[(3, 2), (1, 2), (1, 2), int(0), (-1, 2), int(-1), int(-1)],
            curated: None,
        },
        CaseSpec {
            k: 2,
            weight: &[int(3), int(1), int(1), int(0), int(-1), int(-2), int(-2)],
            curated: None,
        },
    ];

    static REVERSED: [CaseSpec; 2] = [
        CaseSpec {
            k: 1,
            weight: &[int(1), int(1), int(1), int(0), int(0), int(-1), int(-2)],
            curated: None,
        },
        CaseSpec {
            k: 2,
            weight: &[int(2), int(1), int(0), int(0), int(-1), int(-1), int(-1)],
            curated: None,
        },
    ];

    static OFF_WALL: [CaseSpec; 1] = [CaseSpec {
        k: 1,
        weight: &[int(0), int(0), int(0), int(0), int(0), int(1), int(-1)],
        curated: Some(CuratedSet {
            mode: CuratedMode::Enumerative,
            points: &CASE_2_POINTS,
        }),
    }];

    #[test]
    fn self_check_rejects_equivalent_weights() {
        let config = EngineConfig::default();
        for cases in [&PROPORTIONAL[..], &REVERSED[..]] {
            let table = WeightTable { cases };
            assert_eq!(
                table.verify(&config),
                Err(WallError::EquivalentWeights { first: 1, second: 2 })
            );
        }
    }

    #[test]
    fn self_check_rejects_weight_off_the_curated_wall() {
        let table = WeightTable { cases: &OFF_WALL };
        assert_eq!(
            table.verify(&EngineConfig::default()),
            Err(WallError::WeightOffWall(1))
        );
    }

    #[test]
    fn case_two_points_lie_on_the_wall_not_the_slice() {
        let config = EngineConfig::default();
        let case = WeightTable::standard().case(2).unwrap();
        let weight = case.weight_vector().unwrap();
        let points = case.curated_index_set(&config).unwrap();
        assert!(!points.points().iter().all(|e| weight.is_orthogonal_to(e)));

        let normal = NormalVectorEngine::new(config).single_shot_normal(&points).unwrap();
        let normal: Vec<BigRational> = normal.into_iter().map(BigRational::from_integer).collect();
        assert!(dot(&normal, weight.entries()).is_zero());
    }

    #[test]
    fn standard_weights_are_pairwise_inequivalent() {
        let table = WeightTable::standard();
        let keys: std::collections::BTreeSet<Vec<BigInt>> = table
            .cases(false)
            .map(|c| orbit_key(&c.weight_vector().unwrap()))
            .collect();
        assert_eq!(keys.len(), 21);
        assert_eq!(
            orbit_key(&table.case(DUPLICATE_CASE).unwrap().weight_vector().unwrap()),
            orbit_key(&table.case(13).unwrap().weight_vector().unwrap())
        );
    }

    #[test]
    fn case_eight_literal_is_the_zero_set_of_its_weight() {
        let config = EngineConfig::default();
        let case = WeightTable::standard().case(8).unwrap();
        assert_eq!(
            case.curated_index_set(&config).unwrap(),
            case.derived_index_set(&config).unwrap()
        );
    }
}
