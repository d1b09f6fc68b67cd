//! # Quaternary Trees over the Unit Square
//!
//! Two tree structures are provided, both restricted to the half open unit square `[0, 1) x [0, 1)`.
//!
//! * A uniform [`BoxGrid`](types::BoxGrid), a perfect quaternary tree allocated eagerly to a fixed depth,
//!   whose boxes are addressed by their [`MortonKey`](types::MortonKey). Parent, child and neighbour
//!   relationships are computed from Morton indices, never stored.
//! * An adaptive [`QuadTreeNode`](types::QuadTreeNode), split lazily as sources collide, used by the
//!   Barnes-Hut treecode.
pub mod constants;
pub mod types;

mod box_grid;
pub mod helpers;
pub mod morton;
mod point;
mod quadtree;
