//! # Trait Definitions
pub mod fmm;
pub mod tree;
pub mod types;
