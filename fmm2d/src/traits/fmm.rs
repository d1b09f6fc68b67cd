//! FMM traits
use crate::traits::types::FmmError;
use crate::tree::types::Point;

/// Interface for source field translations.
pub trait SourceTranslation {
    /// Particle to multipole translations, applied at leaf level over all source boxes.
    fn p2m(&mut self) -> Result<(), FmmError>;

    /// Multipole to multipole translations, applied during upward pass. Defined over each level of a tree.
    ///
    /// # Arguments
    /// * `level` - The child level at which this translation is being applied.
    fn m2m(&mut self, level: u64) -> Result<(), FmmError>;
}

/// Interface for the source to target (multipole to local / M2L) field translations.
pub trait SourceToTargetTranslation {
    /// Interface for multipole to local translation, defined over each level of a tree.
    ///
    /// # Arguments
    /// * `level` - The level of the tree at which this translation is being applied.
    fn m2l(&mut self, level: u64) -> Result<(), FmmError>;
}

/// Interface for target field translations.
pub trait TargetTranslation {
    /// Local to local translations, applied during downward pass. Defined over each level of a tree.
    ///
    /// At the coarsest level carrying local expansions (level 2) this finalises the accumulated M2L
    /// contributions, at deeper levels it pushes the parents' local expansions down.
    ///
    /// # Arguments
    /// * `level` - The child level at which this translation is being applied.
    fn l2l(&mut self, level: u64) -> Result<(), FmmError>;

    /// Local to particle translations, applies the local expansion accumulated at each leaf box to the
    /// target particles it contains. Defined over all leaf target boxes.
    fn l2p(&mut self) -> Result<(), FmmError>;

    /// Near field particle to particle (direct) potential contributions to particles in a given leaf box's
    /// near field. Defined over all leaf target boxes.
    fn p2p(&mut self) -> Result<(), FmmError>;
}

/// Interface shared by the Barnes-Hut and multilevel FMM engines.
///
/// Points are owned by the caller, engines only hold references to them for the lifetime `'a` and write
/// solved potentials back into the registered targets.
pub trait Solver<'a> {
    /// Register a source point.
    ///
    /// # Arguments
    /// * `source` - Source point, must lie in the unit square.
    fn add_source(&mut self, source: &'a Point) -> Result<(), FmmError>;

    /// Register a target point.
    ///
    /// # Arguments
    /// * `target` - Target point, must lie in the unit square.
    fn add_target(&mut self, target: &'a Point) -> Result<(), FmmError>;

    /// Compute approximate potentials at every registered target.
    fn solve(&mut self) -> Result<(), FmmError>;

    /// Compute exact potentials at every registered target by direct summation over all sources.
    fn direct_solve(&mut self);

    /// Number of operations consumed since construction, or since the last reset.
    fn flops(&self) -> u64;

    /// Reset the operation counter.
    fn reset_flops(&mut self);
}
