//! Normal-vector engine: single-shot face normals and enumerative facet
//! search over the zero-weight slice of a weight vector.

use crate::affine::affine_dimension;
use crate::error::{Result, WallError};
use crate::exponent::ExponentVector;
use crate::fingerprint::Fingerprint;
use crate::index_set::{IndexSet, WeightVector};
use crate::linear_system::{dot, LinearSystem};
use crate::primitive::{clear_denominators, clearing_factor, primitive};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Ambient configuration of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of variables.
    pub dimension: usize,
    /// Total degree of the hypersurface.
    pub degree: u32,
    /// Spread the subset search over the rayon pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dimension: 7,
            degree: 3,
            parallel: true,
        }
    }
}

impl EngineConfig {
    /// Dimension of the slice `{sum(e) = degree, r·e = 0}`.
    pub fn slice_dimension(&self) -> usize {
        self.dimension.saturating_sub(2)
    }

    /// A facet of the slice has one dimension less.
    pub fn facet_dimension(&self) -> usize {
        self.slice_dimension().saturating_sub(1)
    }

    /// Points per candidate subset, and the minimum equality-set size.
    pub fn facet_points(&self) -> usize {
        self.facet_dimension() + 1
    }
}

/// `{e : normal·e = offset}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperplane {
    pub normal: Vec<BigRational>,
    pub offset: BigRational,
}

impl Hyperplane {
    /// `normal·e - offset`.
    pub fn evaluate(&self, e: &ExponentVector) -> BigRational {
        e.dot(&self.normal) - &self.offset
    }

    fn negated(self) -> Self {
        Self {
            normal: self.normal.into_iter().map(|x| -x).collect(),
            offset: -self.offset,
        }
    }
}

/// An accepted wall of the zero-weight slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    /// Primitive normal, first nonzero entry positive.
    pub normal: Vec<BigInt>,
    /// Primitive normal oriented so the index set lies on its nonnegative
    /// side. Deduplication key and source of the fingerprint.
    pub inward_normal: Vec<BigInt>,
    /// Offset matching `inward_normal`.
    pub offset: BigInt,
    /// Positions in the index set of the points on the hyperplane.
    pub equality_set: BTreeSet<usize>,
}

impl Facet {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.inward_normal)
    }
}

/// Outcome counters of an enumerative search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub subsets: u64,
    pub degenerate: u64,
    pub non_supporting: u64,
    pub low_dimensional: u64,
    pub accepted: u64,
}

impl SearchStats {
    fn merge(self, other: Self) -> Self {
        Self {
            subsets: self.subsets + other.subsets,
            degenerate: self.degenerate + other.degenerate,
            non_supporting: self.non_supporting + other.non_supporting,
            low_dimensional: self.low_dimensional + other.low_dimensional,
            accepted: self.accepted + other.accepted,
        }
    }
}

/// Deduplicated facets found by [`NormalVectorEngine::enumerate_facets`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSearch {
    pub facets: BTreeMap<Vec<BigInt>, Facet>,
    pub stats: SearchStats,
}

impl FacetSearch {
    /// Union of two partial searches. Commutative and associative: the same
    /// inward normal always carries the same facet.
    pub fn merge(mut self, other: Self) -> Self {
        for (key, facet) in other.facets {
            self.facets.entry(key).or_insert(facet);
        }
        self.stats = self.stats.merge(other.stats);
        self
    }

    pub fn fingerprints(&self) -> BTreeSet<Fingerprint> {
        self.facets.values().map(Facet::fingerprint).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Why a candidate subset did not produce a facet.
enum Rejection {
    Degenerate,
    NonSupporting,
    LowDimensional,
}

#[derive(Debug, Clone, Default)]
pub struct NormalVectorEngine {
    config: EngineConfig,
}

impl NormalVectorEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn check_points(&self, index_set: &IndexSet) -> Result<()> {
        match index_set.points().iter().find(|p| p.dimension() != self.config.dimension) {
            Some(p) => Err(WallError::DimensionMismatch {
                expected: self.config.dimension,
                found: p.dimension(),
            }),
            None => Ok(()),
        }
    }

    fn check_weight(&self, weight: &WeightVector) -> Result<()> {
        if weight.dimension() != self.config.dimension {
            return Err(WallError::DimensionMismatch {
                expected: self.config.dimension,
                found: weight.dimension(),
            });
        }
        Ok(())
    }

    /// Normal of the face spanned by `index_set` through the barycenter.
    ///
    /// Solves for `w` with `w·(e_i - e_0) = 0` and `w·(1, …, 1) = 0`; the
    /// solution line must be unique. Returned primitive, first nonzero entry
    /// positive.
    pub fn single_shot_normal(&self, index_set: &IndexSet) -> Result<Vec<BigInt>> {
        self.check_points(index_set)?;
        let Some((base, rest)) = index_set.points().split_first() else {
            return Err(WallError::TooFewPoints { needed: 2, found: 0 });
        };
        if rest.is_empty() {
            return Err(WallError::TooFewPoints { needed: 2, found: 1 });
        }

        let base = base.to_rational();
        let mut rows: Vec<Vec<BigRational>> = rest
            .iter()
            .map(|p| {
                p.to_rational()
                    .into_iter()
                    .zip(&base)
                    .map(|(a, b)| a - b)
                    .collect()
            })
            .collect();
        rows.push(vec![BigRational::one(); self.config.dimension]);

        let kernel = LinearSystem::new(rows).unique_kernel_vector()?;
        let normal = primitive(&kernel);
        debug!(points = index_set.len(), ?normal, "single-shot normal");
        Ok(normal)
    }

    /// Facet search over every `facet_points`-subset of the index set.
    ///
    /// Degenerate subsets and non-supporting hyperplanes are skipped and
    /// counted. The result does not depend on traversal order.
    pub fn enumerate_facets(&self, weight: &WeightVector, index_set: &IndexSet) -> Result<FacetSearch> {
        self.check_weight(weight)?;
        self.check_points(index_set)?;

        let n = index_set.len();
        let k = self.config.facet_points();
        if k == 0 || n < k {
            debug!(points = n, needed = k, "index set too small for a facet");
            return Ok(FacetSearch::default());
        }

        let search_from = |first: usize| {
            let mut local = FacetSearch::default();
            for mut subset in Combinations::new(first + 1, n, k - 1) {
                subset.insert(0, first);
                local.stats.subsets += 1;
                match self.candidate(weight, index_set, &subset) {
                    Ok(facet) => {
                        local.stats.accepted += 1;
                        local.facets.entry(facet.inward_normal.clone()).or_insert(facet);
                    }
                    Err(Rejection::Degenerate) => local.stats.degenerate += 1,
                    Err(Rejection::NonSupporting) => local.stats.non_supporting += 1,
                    Err(Rejection::LowDimensional) => local.stats.low_dimensional += 1,
                }
            }
            local
        };

        let firsts = 0..=(n - k);
        let search = if self.config.parallel {
            firsts
                .into_par_iter()
                .map(search_from)
                .reduce(FacetSearch::default, FacetSearch::merge)
        } else {
            firsts.map(search_from).fold(FacetSearch::default(), FacetSearch::merge)
        };

        debug!(
            points = n,
            subsets = search.stats.subsets,
            degenerate = search.stats.degenerate,
            non_supporting = search.stats.non_supporting,
            low_dimensional = search.stats.low_dimensional,
            facets = search.facets.len(),
            "facet search finished"
        );
        Ok(search)
    }

    /// Hyperplane through the chosen points, tested against the whole set.
    fn candidate(
        &self,
        weight: &WeightVector,
        index_set: &IndexSet,
        subset: &[usize],
    ) -> std::result::Result<Facet, Rejection> {
        let d = self.config.dimension;
        let points = index_set.points();

        let mut rows = Vec::with_capacity(subset.len() + 2);
        let mut ones = vec![BigRational::one(); d];
        ones.push(BigRational::zero());
        rows.push(ones);
        let mut weight_row = weight.entries().to_vec();
        weight_row.push(BigRational::zero());
        rows.push(weight_row);
        for &i in subset {
            let mut row = points[i].to_rational();
            row.push(-BigRational::one());
            rows.push(row);
        }

        let mut solution = match LinearSystem::new(rows).unique_kernel_vector() {
            Ok(v) => v,
            Err(_) => {
                trace!(?subset, "degenerate subset");
                return Err(Rejection::Degenerate);
            }
        };
        let offset = solution.pop().unwrap_or_else(BigRational::zero);
        let mut plane = Hyperplane {
            normal: solution,
            offset,
        };

        let values: Vec<BigRational> = points.iter().map(|e| plane.evaluate(e)).collect();
        if values.iter().any(|v| v.is_negative()) {
            if values.iter().any(|v| v.is_positive()) {
                trace!(?subset, "hyperplane does not support the index set");
                return Err(Rejection::NonSupporting);
            }
            plane = plane.negated();
        }

        let equality_set: BTreeSet<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_zero())
            .map(|(i, _)| i)
            .collect();
        let on_plane: Vec<ExponentVector> =
            equality_set.iter().map(|&i| points[i].clone()).collect();
        if !self.is_facet_equality_set(&on_plane) {
            trace!(?subset, size = on_plane.len(), "equality set spans a lower face");
            return Err(Rejection::LowDimensional);
        }

        let normal = primitive(&plane.normal);
        let mut inward_normal = clear_denominators(&plane.normal);
        // Nothing strictly inside: take the side with the smaller fingerprint,
        // ties broken by the canonical normal.
        if equality_set.len() == points.len() {
            let flipped: Vec<BigInt> = inward_normal.iter().map(|x| -x).collect();
            let kept = Fingerprint::of(&inward_normal);
            let other = Fingerprint::of(&flipped);
            if other < kept || (other == kept && flipped == normal) {
                plane = plane.negated();
                inward_normal = flipped;
            }
        }
        let offset = (&plane.offset * clearing_factor(&plane.normal)).to_integer();
        Ok(Facet {
            normal,
            inward_normal,
            offset,
            equality_set,
        })
    }

    /// Acceptance test on an equality set: enough points, and affine
    /// dimension one less than the slice.
    pub fn is_facet_equality_set(&self, points: &[ExponentVector]) -> bool {
        points.len() >= self.config.facet_points()
            && affine_dimension(points) >= self.config.facet_dimension()
    }

    /// Check that a single-shot normal really is orthogonal to every point.
    pub fn vanishes_on(&self, normal: &[BigInt], index_set: &IndexSet) -> bool {
        let w: Vec<BigRational> = normal.iter().cloned().map(BigRational::from_integer).collect();
        index_set
            .points()
            .iter()
            .all(|e| dot(&w, &e.to_rational()).is_zero())
    }
}

/// Lexicographic `k`-subsets of `start..end`.
struct Combinations {
    end: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    fn new(start: usize, end: usize, k: usize) -> Self {
        let current = (start + k <= end).then(|| (start..start + k).collect());
        Self { end, current }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let out = self.current.take()?;
        let k = out.len();
        let mut next = out.clone();
        // Rightmost position that can still move.
        let movable = (0..k).rev().find(|&i| next[i] < self.end - k + i);
        if let Some(i) = movable {
            next[i] += 1;
            for j in i + 1..k {
                next[j] = next[j - 1] + 1;
            }
            self.current = Some(next);
        }
        Some(out)
    }
}
