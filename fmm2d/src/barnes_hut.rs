//! # Barnes-Hut Treecode
//!
//! Sources are inserted into an adaptive [`QuadTreeNode`], after which every node is summarised by its
//! total charge and center of charge. The potential at a target is found by descending from the root,
//! replacing any subtree whose center of charge is far enough away, relative to the node size, by a
//! single point charge, and summing sources directly at populated leaves.
//!
//! The acceptance test `sqrt(|target - centre_of_charge|^2 / |size|^2) > theta` means that larger values
//! of `theta` approximate less, and `theta = f64::INFINITY` reproduces the direct sum.
use log::{info, warn};

use crate::{
    fmm::{
        constants::{DEFAULT_MAX_DEPTH, DEFAULT_THETA},
        kernel::direct_potential,
    },
    traits::{fmm::Solver, types::FmmError},
    tree::{
        constants::MAX_QUADTREE_DEPTH,
        types::{Point, QuadTreeNode},
    },
};

/// Holds all required data for evaluating potentials with the Barnes-Hut treecode.
#[derive(Debug)]
pub struct BarnesHut<'a> {
    /// Root of the adaptive quadtree over the unit square.
    pub root: QuadTreeNode<'a>,

    /// Multipole acceptance threshold.
    pub theta: f64,

    /// All registered sources, in order of registration.
    pub sources: Vec<&'a Point>,

    /// All registered targets, in order of registration.
    pub targets: Vec<&'a Point>,

    /// Operation counter, never reset automatically.
    pub flops: u64,
}

/// A builder for constructing a Barnes-Hut treecode.
///
/// # Example
/// ```
/// use fmm2d::BarnesHutBuilder;
///
/// let bh = BarnesHutBuilder::new().max_depth(6).theta(2.0).build().unwrap();
/// assert_eq!(bh.root.max_depth, 6);
/// assert!(BarnesHutBuilder::new().theta(f64::NAN).build().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct BarnesHutBuilder {
    /// Depth at which quadtree nodes become buckets.
    pub max_depth: Option<u64>,

    /// Multipole acceptance threshold.
    pub theta: Option<f64>,
}

impl BarnesHutBuilder {
    /// Initialise an empty Barnes-Hut builder
    pub fn new() -> Self {
        Self {
            max_depth: None,
            theta: None,
        }
    }

    /// Maximum depth of the adaptive quadtree. If none specified a default of 8 is used.
    ///
    /// # Arguments
    /// * `max_depth` - Depth at which nodes stop splitting, between 1 and 52.
    pub fn max_depth(mut self, max_depth: u64) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Multipole acceptance threshold. If none specified a default of 4 is used.
    ///
    /// # Arguments
    /// * `theta` - Non negative threshold, may be infinite.
    pub fn theta(mut self, theta: f64) -> Self {
        self.theta = Some(theta);
        self
    }

    /// Finalize and build the treecode
    pub fn build<'a>(self) -> Result<BarnesHut<'a>, FmmError> {
        BarnesHut::new(
            self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            self.theta.unwrap_or(DEFAULT_THETA),
        )
    }
}

impl<'a> BarnesHut<'a> {
    /// Constructor, with an empty quadtree.
    ///
    /// # Arguments
    /// * `max_depth` - Depth at which quadtree nodes become buckets.
    /// * `theta` - Multipole acceptance threshold.
    pub fn new(max_depth: u64, theta: f64) -> Result<Self, FmmError> {
        if !(1..=MAX_QUADTREE_DEPTH).contains(&max_depth) {
            return Err(FmmError::InvalidConfiguration(format!(
                "maximum depth must be between 1 and {}, found {}",
                MAX_QUADTREE_DEPTH, max_depth
            )));
        }

        if theta.is_nan() || theta < 0. {
            return Err(FmmError::InvalidConfiguration(format!(
                "acceptance threshold must be non negative, found {}",
                theta
            )));
        }

        info!(
            "Allocating Barnes-Hut treecode with maximum depth {}, theta {}",
            max_depth, theta
        );

        Ok(Self {
            root: QuadTreeNode::root(max_depth),
            theta,
            sources: Vec::new(),
            targets: Vec::new(),
            flops: 0,
        })
    }
}

impl<'a> Solver<'a> for BarnesHut<'a> {
    fn add_source(&mut self, source: &'a Point) -> Result<(), FmmError> {
        source.validate()?;
        self.root.add_source(source);
        self.sources.push(source);
        Ok(())
    }

    fn add_target(&mut self, target: &'a Point) -> Result<(), FmmError> {
        target.validate()?;
        self.targets.push(target);
        Ok(())
    }

    fn solve(&mut self) -> Result<(), FmmError> {
        if self.sources.is_empty() || self.targets.is_empty() {
            warn!(
                "Solving Barnes-Hut with {} sources and {} targets",
                self.sources.len(),
                self.targets.len()
            );
        }

        self.root.compute_charge_distribution(&mut self.flops);
        for target in self.targets.iter() {
            let potential = self.root.compute_potential(target, self.theta, &mut self.flops);
            target.set_potential(potential);
        }

        Ok(())
    }

    fn direct_solve(&mut self) {
        for target in self.targets.iter() {
            let potential = direct_potential(target, &self.sources, &mut self.flops);
            target.set_potential(potential);
        }
    }

    fn flops(&self) -> u64 {
        self.flops
    }

    fn reset_flops(&mut self) {
        self.flops = 0;
    }
}
