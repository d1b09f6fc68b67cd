//! Builder objects to construct FMMs
use log::info;

use crate::{
    fmm::{
        constants::{DEFAULT_DEGREE, DEFAULT_LEVELS},
        kernel::LogKernel,
        types::{Mlfmm, MlfmmBuilder},
    },
    traits::types::FmmError,
    tree::types::BoxGrid,
};

impl MlfmmBuilder {
    /// Initialise an empty multilevel FMM builder
    pub fn new() -> Self {
        Self {
            levels: None,
            degree: None,
        }
    }

    /// Number of levels of the uniform box grid, including the root level. If none specified a default
    /// of 4 is used.
    ///
    /// # Arguments
    /// * `levels` - Number of levels, between 1 and 10.
    pub fn levels(mut self, levels: u64) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Number of expansion coefficients used for the multipole and local expansions. If none specified a
    /// default of 10 is used.
    ///
    /// # Arguments
    /// * `degree` - Number of coefficients, at least 1.
    pub fn degree(mut self, degree: usize) -> Self {
        self.degree = Some(degree);
        self
    }

    /// Finalize and build the multilevel FMM
    pub fn build<'a>(self) -> Result<Mlfmm<'a>, FmmError> {
        Mlfmm::new(
            self.levels.unwrap_or(DEFAULT_LEVELS),
            self.degree.unwrap_or(DEFAULT_DEGREE),
        )
    }
}

impl<'a> Mlfmm<'a> {
    /// Constructor, allocates every box of the grid with zeroed expansions.
    ///
    /// # Arguments
    /// * `levels` - Number of levels of the grid, including the root level.
    /// * `degree` - Number of expansion coefficients.
    pub fn new(levels: u64, degree: usize) -> Result<Self, FmmError> {
        let kernel = LogKernel::new(degree)?;

        info!(
            "Allocating MLFMM with {} levels, {} expansion coefficients",
            levels, degree
        );
        let grid = BoxGrid::new(levels, degree)?;

        Ok(Self {
            grid,
            kernel,
            sources: Vec::new(),
            targets: Vec::new(),
            flops: 0,
            operator_counts: Vec::new(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tree::constants::MAX_LEVELS;

    #[test]
    fn test_builder_defaults() {
        let fmm = MlfmmBuilder::new().build().unwrap();
        assert_eq!(fmm.grid.n_levels, DEFAULT_LEVELS);
        assert_eq!(fmm.kernel.degree(), DEFAULT_DEGREE);
        assert_eq!(fmm.grid.depth(), DEFAULT_LEVELS - 1);
        assert_eq!(fmm.flops, 0);
    }

    #[test]
    fn test_builder_configuration() {
        let fmm = MlfmmBuilder::new().levels(2).degree(3).build().unwrap();
        assert_eq!(fmm.grid.n_boxes(), 5);
        assert!(fmm
            .grid
            .leaves()
            .iter()
            .all(|fmm_box| fmm_box.multipole.len() == 3));
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            MlfmmBuilder::new().levels(0).build(),
            Err(FmmError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MlfmmBuilder::new().levels(MAX_LEVELS + 1).build(),
            Err(FmmError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MlfmmBuilder::new().degree(0).build(),
            Err(FmmError::InvalidConfiguration(_))
        ));
    }
}
