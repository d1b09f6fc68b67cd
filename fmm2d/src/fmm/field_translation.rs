//! Field translations of the multilevel FMM, implementing the translation traits over the uniform grid.
mod source;
mod source_to_target;
mod target;
