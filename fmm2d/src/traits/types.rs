//! Utility types for trait definitions.
use std::fmt;

/// Type to handle FMM related errors
#[derive(thiserror::Error, Debug)]
pub enum FmmError {
    /// Engine constructed with parameters that would produce a degenerate structure
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Point coordinates outside of the half open unit square [0, 1) x [0, 1)
    #[error("Point {index} at ({x}, {y}) lies outside of the unit square")]
    OutOfDomain {
        /// Identity of the offending point
        index: usize,
        /// x coordinate
        x: f64,
        /// y coordinate
        y: f64,
    },

    /// Failure to run some business logic
    #[error("Failed: {0}")]
    Failed(String),
}

/// Enumeration of operator types for operation accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FmmOperatorType {
    /// particle to multipole
    P2M,

    /// multipole to multipole (level)
    M2M(u64),

    /// multipole to local (level)
    M2L(u64),

    /// local to local (level)
    L2L(u64),

    /// local to particle
    L2P,

    /// particle to particle
    P2P,
}

impl fmt::Display for FmmOperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FmmOperatorType::P2M => write!(f, "P2M"),
            FmmOperatorType::M2M(level) => write!(f, "M2M({})", level),
            FmmOperatorType::M2L(level) => write!(f, "M2L({})", level),
            FmmOperatorType::L2L(level) => write!(f, "L2L({})", level),
            FmmOperatorType::L2P => write!(f, "L2P"),
            FmmOperatorType::P2P => write!(f, "P2P"),
        }
    }
}

/// Operation count of a single FMM operator application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmmOperatorCount {
    /// Operator
    pub operator: FmmOperatorType,

    /// Number of operations consumed
    pub flops: u64,
}

impl FmmOperatorCount {
    /// Constructor
    pub fn new(operator: FmmOperatorType, flops: u64) -> Self {
        Self { operator, flops }
    }
}
