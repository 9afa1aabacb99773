//! The all-case driver: enumerative facet search on every case of the weight
//! table, aggregated into one report.

use crate::cases::WeightTable;
use crate::engine::{NormalVectorEngine, SearchStats};
use crate::error::WallError;
use crate::fingerprint::{render_fingerprints, Fingerprint};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, warn};

/// Walls detected for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseWalls {
    pub k: usize,
    pub index_set_size: usize,
    pub fingerprints: BTreeSet<Fingerprint>,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyReport {
    pub cases: BTreeMap<usize, CaseWalls>,
    /// Cases whose computation failed, with the reason.
    pub failures: BTreeMap<usize, WallError>,
}

pub struct Survey;

impl Survey {
    /// Run the facet search on each case's zero-weight set.
    pub fn run(engine: &NormalVectorEngine, table: &WeightTable, include_duplicate: bool) -> SurveyReport {
        let cases: Vec<_> = table.cases(include_duplicate).collect();
        let results: Vec<(usize, Result<CaseWalls, WallError>)> = cases
            .par_iter()
            .map(|case| {
                let outcome = case.weight_vector().and_then(|weight| {
                    let index_set = case.derived_index_set(engine.config())?;
                    let search = engine.enumerate_facets(&weight, &index_set)?;
                    Ok(CaseWalls {
                        k: case.k,
                        index_set_size: index_set.len(),
                        fingerprints: search.fingerprints(),
                        stats: search.stats,
                    })
                });
                (case.k, outcome)
            })
            .collect();

        let mut report = SurveyReport::default();
        for (k, outcome) in results {
            match outcome {
                Ok(walls) => {
                    debug!(k, walls = walls.fingerprints.len(), points = walls.index_set_size, "case done");
                    report.cases.insert(k, walls);
                }
                Err(err) => {
                    warn!(k, %err, "case failed");
                    report.failures.insert(k, err);
                }
            }
        }
        report
    }
}

impl SurveyReport {
    /// Cases with at least one wall, in index order.
    pub fn cases_with_walls(&self) -> impl Iterator<Item = &CaseWalls> {
        self.cases.values().filter(|c| !c.fingerprints.is_empty())
    }

    pub fn wall_count(&self) -> usize {
        self.cases_with_walls().count()
    }

    /// Fingerprints found in two or more cases, with those cases.
    pub fn shared_walls(&self) -> BTreeMap<Fingerprint, BTreeSet<usize>> {
        let mut by_fingerprint: BTreeMap<Fingerprint, BTreeSet<usize>> = BTreeMap::new();
        for case in self.cases.values() {
            for fp in &case.fingerprints {
                by_fingerprint.entry(fp.clone()).or_default().insert(case.k);
            }
        }
        by_fingerprint.retain(|_, ks| ks.len() > 1);
        by_fingerprint
    }
}

impl fmt::Display for SurveyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wall_count() == 0 {
            return writeln!(f, "none");
        }
        for case in self.cases_with_walls() {
            writeln!(
                f,
                "k={} -> {}",
                case.k,
                render_fingerprints(case.fingerprints.iter().rev())
            )?;
        }
        writeln!(f, "cases with walls: {}", self.wall_count())
    }
}
