//! Implementation of constructors and transformation methods for Morton keys of a uniform quaternary tree.
//!
//! At a given level the anchor `(x, y)` of a box, each component in `[0, 2^level)`, is interleaved into a
//! single index of `2 * level` bits, bit `2b + 1` of the index holding bit `b` of `x` and bit `2b` holding
//! bit `b` of `y`. Consequently the parent of a box is found by discarding the two lowest bits, and its
//! children by appending the quadrant.
use itertools::Itertools;
use num_complex::Complex64;

use crate::{
    traits::{tree::TreeNode, types::FmmError},
    tree::{
        constants::{DIRECTIONS, NSIBLINGS},
        types::{MortonKey, Point},
    },
};

/// Encode an anchor.
/// Returns the Morton index associated with the given anchor.
///
/// # Arguments
/// * `x` - Integer grid coordinate along the x axis, in [0, 2^level).
/// * `y` - Integer grid coordinate along the y axis, in [0, 2^level).
/// * `level` - The level of the tree the anchor is encoded at.
pub fn encode(x: u64, y: u64, level: u64) -> u64 {
    if x == 0 && y == 0 {
        return 0;
    }

    let mut morton = 0;
    for bit in 0..level {
        morton |= ((x >> bit) & 1) << (2 * bit + 1);
        morton |= ((y >> bit) & 1) << (2 * bit);
    }
    morton
}

/// Decodes a Morton index to retrieve its anchor.
///
/// # Arguments
/// * `morton` - The Morton index to be decoded.
/// * `level` - The level of the tree the index was encoded at.
pub fn decode(morton: u64, level: u64) -> [u64; 2] {
    if morton == 0 {
        return [0, 0];
    }

    let mut x = 0;
    let mut y = 0;
    for bit in 0..level {
        x |= ((morton >> (2 * bit + 1)) & 1) << bit;
        y |= ((morton >> (2 * bit)) & 1) << bit;
    }
    [x, y]
}

/// Map a point to the anchor of the enclosing box at a given level.
///
/// # Arguments
/// * `coordinate` - Position of the point, must lie in the unit square.
/// * `level` - The level of the tree at which the point will be mapped.
fn point_to_anchor(coordinate: Complex64, level: u64) -> [u64; 2] {
    let n_boxes = (1u64 << level) as f64;
    [
        (coordinate.re * n_boxes).floor() as u64,
        (coordinate.im * n_boxes).floor() as u64,
    ]
}

/// Index of the box containing a point at a given level.
///
/// # Arguments
/// * `point` - Point being located, must lie in the unit square.
/// * `level` - The level of the tree at which the point will be located.
pub fn box_index(point: &Point, level: u64) -> Result<u64, FmmError> {
    point.validate()?;
    let [x, y] = point_to_anchor(point.coordinate, level);
    Ok(encode(x, y, level))
}

impl MortonKey {
    /// Construct a key from the anchor at a given level.
    pub fn from_anchor(anchor: &[u64; 2], level: u64) -> Self {
        Self {
            level,
            morton: encode(anchor[0], anchor[1], level),
            anchor: *anchor,
        }
    }

    /// Construct a key from a Morton index at a given level.
    pub fn from_morton(morton: u64, level: u64) -> Self {
        Self {
            level,
            morton,
            anchor: decode(morton, level),
        }
    }

    /// Construct the key of the box that encloses a point at a given level.
    ///
    /// # Arguments
    /// * `point` - Point being located, must lie in the unit square.
    /// * `level` - Level of the tree at which to find the enclosing box.
    pub fn from_point(point: &Point, level: u64) -> Result<Self, FmmError> {
        box_index(point, level).map(|morton| Self::from_morton(morton, level))
    }

    /// The key corresponding to the root of the tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Number of boxes along each axis at the level of this key.
    pub fn boxes_per_axis(&self) -> u64 {
        1 << self.level
    }

    /// Side length of the box described by this key.
    pub fn size(&self) -> f64 {
        0.5f64.powi(self.level as i32)
    }

    /// Center of the box described by this key.
    pub fn center(&self) -> Complex64 {
        (Complex64::new(self.anchor[0] as f64, self.anchor[1] as f64) + Complex64::new(0.5, 0.5))
            * self.size()
    }

    /// Find the key at the same level displaced by a direction, `None` if it lies outside of the domain.
    ///
    /// # Arguments
    /// * `direction` - Offset along the x and y axes, in units of boxes at this level.
    pub fn find_key_in_direction(&self, direction: &[i64; 2]) -> Option<MortonKey> {
        let n_boxes = self.boxes_per_axis() as i64;
        let x = self.anchor[0] as i64 + direction[0];
        let y = self.anchor[1] as i64 + direction[1];

        if (0..n_boxes).contains(&x) && (0..n_boxes).contains(&y) {
            Some(MortonKey::from_anchor(&[x as u64, y as u64], self.level))
        } else {
            None
        }
    }

    /// Check if another key at the same level is adjacent to this one.
    pub fn is_adjacent_same_level(&self, other: &MortonKey) -> bool {
        self.level == other.level
            && self != other
            && self.anchor[0].abs_diff(other.anchor[0]) <= 1
            && self.anchor[1].abs_diff(other.anchor[1]) <= 1
    }

    /// All keys at the given level, in Morton order.
    pub fn level_keys(level: u64) -> impl Iterator<Item = MortonKey> {
        (0..1u64 << (2 * level)).map(move |morton| MortonKey::from_morton(morton, level))
    }
}

impl TreeNode for MortonKey {
    fn level(&self) -> u64 {
        self.level
    }

    fn raw(&self) -> u64 {
        self.morton
    }

    fn parent(&self) -> Option<Self> {
        (self.level > 0).then(|| MortonKey::from_morton(self.morton >> 2, self.level - 1))
    }

    fn children(&self) -> Vec<Self> {
        (0..NSIBLINGS as u64)
            .map(|quadrant| MortonKey::from_morton((self.morton << 2) + quadrant, self.level + 1))
            .collect()
    }

    fn neighbors(&self) -> Vec<Self> {
        DIRECTIONS
            .iter()
            .filter_map(|d| self.find_key_in_direction(d))
            .collect()
    }

    fn interaction_list(&self) -> Vec<Self> {
        if self.level < 2 {
            return Vec::new();
        }

        let Some(parent) = self.parent() else {
            return Vec::new();
        };

        let neighbors = self.neighbors();

        parent
            .neighbors()
            .iter()
            .flat_map(|parent_neighbor| parent_neighbor.children())
            .filter(|candidate| candidate != self && !neighbors.contains(candidate))
            .collect_vec()
    }
}
