//! Crate wide constants for the quaternary trees.
use num_complex::Complex64;

/// Number of children of a node in a quaternary tree.
pub const NSIBLINGS: usize = 4;

/// Maximum number of levels of a uniform box grid. Every level is allocated eagerly, the finest level
/// holds 4^(MAX_LEVELS-1) boxes.
pub const MAX_LEVELS: u64 = 10;

/// Maximum depth of an adaptive quadtree, beyond this the half extent of a node is no longer
/// representable relative to the unit square.
pub const MAX_QUADTREE_DEPTH: u64 = 52;

/// Center of the root of an adaptive quadtree.
pub const ROOT_CENTER: Complex64 = Complex64::new(0.5, 0.5);

/// Half extent of the root of an adaptive quadtree along the x and y axes.
pub const ROOT_SIZE: Complex64 = Complex64::new(0.5, 0.5);

/// Directions to the eight same level neighbours of a box, x offset then y offset.
pub const DIRECTIONS: [[i64; 2]; 8] = [
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];
