// Exact arithmetic subsystem: exponent lattice, rational kernels, normalization
pub mod error;
pub mod exponent;
pub mod linear_system;
pub mod primitive;
pub mod affine;

// Wall detection subsystem: inputs, engine, fingerprints, case table
pub mod index_set;
pub mod engine;
pub mod fingerprint;
pub mod cases;
pub mod survey;

// Public arithmetic API
pub use crate::error::{ExponentDefect, Result, WallError};
pub use crate::exponent::{all_exponents, ExponentVector};
pub use crate::linear_system::LinearSystem;
pub use crate::primitive::{clear_denominators, primitive};
pub use crate::affine::affine_dimension;

// Public engine API
pub use crate::index_set::{IndexSet, WeightVector};
pub use crate::engine::{
	EngineConfig, Facet, FacetSearch, Hyperplane,
	NormalVectorEngine, SearchStats,
};
pub use crate::fingerprint::{render_fingerprints, Fingerprint};
pub use crate::cases::{
	CaseSpec, CuratedMode, CuratedSet, WeightTable,
	DUPLICATE_CASE,
};
pub use crate::survey::{CaseWalls, Survey, SurveyReport};
