use std::fmt;
use thiserror::Error;

/// What is wrong with a rejected exponent vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExponentDefect {
    WrongLength { expected: usize },
    NegativeEntry { position: usize },
    ExceedsDegree { position: usize },
    WrongDegree { expected: u32, found: i64 },
}

impl fmt::Display for ExponentDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExponentDefect::WrongLength { expected } => {
                write!(f, "expected {} entries", expected)
            }
            ExponentDefect::NegativeEntry { position } => {
                write!(f, "entry {} is negative", position)
            }
            ExponentDefect::ExceedsDegree { position } => {
                write!(f, "entry {} exceeds the degree", position)
            }
            ExponentDefect::WrongDegree { expected, found } => {
                write!(f, "entries sum to {}, expected {}", found, expected)
            }
        }
    }
}

/// Errors raised by the wall-detection core.
///
/// Degenerate kernels and non-supporting hyperplanes met during the
/// enumerative facet search are counted in the search statistics and never
/// surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WallError {
    #[error("invalid exponent vector {entries:?}: {defect}")]
    InvalidExponentVector {
        entries: Vec<i64>,
        defect: ExponentDefect,
    },

    #[error("degenerate configuration: kernel dimension {found}, expected {expected}")]
    DegenerateConfiguration { expected: usize, found: usize },

    #[error("need at least {needed} distinct points, got {found}")]
    TooFewPoints { needed: usize, found: usize },

    #[error("dimension mismatch: engine works in dimension {expected}, input has {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid weight vector: {0}")]
    InvalidWeight(String),

    #[error("no case with index {0} in the weight table")]
    UnknownCase(usize),

    #[error("case {0} has no curated index set")]
    MissingCuratedSet(usize),

    #[error("curated face of case {0} does not pass through the barycenter")]
    NotThroughBarycenter(usize),

    #[error("weight of case {0} is not orthogonal to its curated wall")]
    WeightOffWall(usize),

    #[error("cases {first} and {second} have equivalent weights")]
    EquivalentWeights { first: usize, second: usize },
}

pub type Result<T> = std::result::Result<T, WallError>;
