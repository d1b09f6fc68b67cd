//! Data structures for the quaternary trees.
use std::cell::Cell;

use num_complex::Complex64;

/// A source or target particle in the complex plane.
///
/// Points are created and owned by the caller, engines hold shared references to them and write the
/// evaluated potential back through an interior mutable cell.
#[derive(Debug, Clone)]
pub struct Point {
    /// Coordinate of the point, the x component is the real part and the y component the imaginary part.
    pub coordinate: Complex64,

    /// Global index of the point, for book-keeping.
    pub global_index: usize,

    /// Potential evaluated at this point.
    pub(crate) potential: Cell<f64>,
}

/// Represents a Morton key associated with a box of a uniform quaternary tree.
///
/// Pairs the level of the box with its 'anchor', the integer grid coordinate of the box at that level,
/// and the interleaved (Morton) encoding of the anchor, which is also the index of the box within the
/// contiguous storage of its level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MortonKey {
    /// Level of the box, the root is at level 0.
    pub level: u64,

    /// The Morton encoded anchor.
    pub morton: u64,

    /// The integer grid coordinate of the box at its level.
    pub anchor: [u64; 2],
}

/// A box of a uniform grid, holding the truncated multipole and local expansions of the logarithmic kernel
/// about its center, as well as the particles it contains at the finest level.
#[derive(Debug, Clone)]
pub struct FmmBox<'a> {
    /// Key identifying the box.
    pub key: MortonKey,

    /// Side length of the box, 2^-level.
    pub size: f64,

    /// Center of the box.
    pub center: Complex64,

    /// Number of expansion coefficients.
    pub degree: usize,

    /// Multipole (outer) expansion coefficients.
    pub multipole: Vec<Complex64>,

    /// Local (inner) expansion coefficients.
    pub local: Vec<Complex64>,

    /// Far field contributions accumulated by the M2L, before they are finalised into the local expansion.
    pub pending_local: Vec<Complex64>,

    /// Sources contained in this box, only populated at the finest level.
    pub sources: Vec<&'a Point>,

    /// Targets contained in this box, only populated at the finest level.
    pub targets: Vec<&'a Point>,
}

/// A perfect quaternary tree of boxes over the unit square, with one contiguous vector of boxes per level
/// stored in Morton order.
#[derive(Debug, Clone)]
pub struct BoxGrid<'a> {
    /// Number of levels, including the root level.
    pub n_levels: u64,

    /// Number of expansion coefficients held by each box.
    pub degree: usize,

    /// Boxes at each level, indexed by level and then by Morton index.
    pub boxes: Vec<Vec<FmmBox<'a>>>,
}

/// A node of an adaptive quadtree used by the Barnes-Hut treecode.
///
/// Internal nodes hold no sources. Leaves above the maximum depth hold at most a single source, leaves
/// at the maximum depth act as buckets.
#[derive(Debug)]
pub struct QuadTreeNode<'a> {
    /// Center of this node.
    pub center: Complex64,

    /// Half extent of this node along the x (real) and y (imaginary) axes.
    pub size: Complex64,

    /// Depth of this node, the root has depth 0.
    pub depth: u64,

    /// Maximum depth of the tree.
    pub max_depth: u64,

    /// Children, indexed by quadrant, created lazily.
    pub children: [Option<Box<QuadTreeNode<'a>>>; 4],

    /// Sources resident in this node.
    pub sources: Vec<&'a Point>,

    /// Total charge in the subtree rooted at this node.
    pub charge: f64,

    /// Center of total charge of the subtree rooted at this node.
    pub centre_of_charge: Complex64,
}
