//! Default parameters of the solvers.

/// Default number of levels of the uniform box grid.
pub const DEFAULT_LEVELS: u64 = 4;

/// Default number of expansion coefficients.
pub const DEFAULT_DEGREE: usize = 10;

/// Default maximum depth of the Barnes-Hut quadtree.
pub const DEFAULT_MAX_DEPTH: u64 = 8;

/// Default Barnes-Hut multipole acceptance threshold.
pub const DEFAULT_THETA: f64 = 4.0;

/// Coarsest level at which boxes have a non-empty interaction list, and therefore local expansions.
pub const LOCAL_ROOT_LEVEL: u64 = 2;
