//! Data structures for the multilevel fast multipole method
use crate::{
    fmm::kernel::LogKernel,
    traits::types::FmmOperatorCount,
    tree::types::{BoxGrid, Point},
};

/// Holds all required data for evaluating a multilevel FMM over a uniform grid of boxes.
///
/// Sources and targets are borrowed from the caller for the lifetime `'a`, potentials are written back
/// into the targets.
#[derive(Debug)]
pub struct Mlfmm<'a> {
    /// Uniform box grid holding the expansions and the particles at the finest level.
    pub grid: BoxGrid<'a>,

    /// The associated kernel and its truncation.
    pub kernel: LogKernel,

    /// All registered sources, in order of registration.
    pub sources: Vec<&'a Point>,

    /// All registered targets, in order of registration.
    pub targets: Vec<&'a Point>,

    /// Operation counter, never reset automatically.
    pub flops: u64,

    /// Operations consumed by each operator during the most recent evaluation.
    pub operator_counts: Vec<FmmOperatorCount>,
}

/// A builder for constructing a multilevel FMM.
///
/// # Example
/// ```
/// use fmm2d::MlfmmBuilder;
///
/// let fmm = MlfmmBuilder::new().levels(5).degree(12).build().unwrap();
/// assert_eq!(fmm.grid.depth(), 4);
/// assert!(MlfmmBuilder::new().degree(0).build().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MlfmmBuilder {
    /// Number of levels of the box grid, including the root level.
    pub levels: Option<u64>,

    /// Number of expansion coefficients.
    pub degree: Option<usize>,
}
