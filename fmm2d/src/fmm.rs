//! A two dimensional multilevel fast multipole method for the logarithmic kernel.
mod builder;
pub mod constants;
mod eval;
mod field_translation;
pub mod kernel;
pub mod types;

pub use types::Mlfmm;
