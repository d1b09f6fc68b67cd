//! Implementation of a uniform quaternary tree of boxes with eagerly allocated expansion data.
use num::Zero;
use num_complex::Complex64;

use crate::{
    traits::{tree::TreeNode, types::FmmError},
    tree::{
        constants::MAX_LEVELS,
        types::{BoxGrid, FmmBox, MortonKey, Point},
    },
};

impl<'a> FmmBox<'a> {
    /// Constructor, all expansion coefficients are initialised to zero.
    ///
    /// # Arguments
    /// * `key` - Key identifying the box.
    /// * `degree` - Number of expansion coefficients.
    pub fn new(key: MortonKey, degree: usize) -> Self {
        Self {
            key,
            size: key.size(),
            center: key.center(),
            degree,
            multipole: vec![Complex64::zero(); degree],
            local: vec![Complex64::zero(); degree],
            pending_local: vec![Complex64::zero(); degree],
            sources: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Add a source point to this box
    pub fn add_source(&mut self, source: &'a Point) {
        self.sources.push(source);
    }

    /// Add a target point to this box
    pub fn add_target(&mut self, target: &'a Point) {
        self.targets.push(target);
    }

    /// Reset all expansion coefficients to zero, keeping the particles.
    pub fn clear_expansions(&mut self) {
        self.multipole.fill(Complex64::zero());
        self.local.fill(Complex64::zero());
        self.pending_local.fill(Complex64::zero());
    }
}

impl PartialEq for FmmBox<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FmmBox<'_> {}

impl<'a> BoxGrid<'a> {
    /// Allocate every box at every level of a uniform grid.
    ///
    /// # Arguments
    /// * `n_levels` - Number of levels including the root, between 1 and `MAX_LEVELS`. The finest level
    ///   is `n_levels - 1`.
    /// * `degree` - Number of expansion coefficients held by each box.
    pub fn new(n_levels: u64, degree: usize) -> Result<Self, FmmError> {
        if !(1..=MAX_LEVELS).contains(&n_levels) {
            return Err(FmmError::InvalidConfiguration(format!(
                "number of levels must be between 1 and {}, found {}",
                MAX_LEVELS, n_levels
            )));
        }

        let boxes = (0..n_levels)
            .map(|level| {
                MortonKey::level_keys(level)
                    .map(|key| FmmBox::new(key, degree))
                    .collect()
            })
            .collect();

        Ok(Self {
            n_levels,
            degree,
            boxes,
        })
    }

    /// Index of the finest level.
    pub fn depth(&self) -> u64 {
        self.n_levels - 1
    }

    /// Boxes at a given level in Morton order, `None` if the level is not part of the grid.
    pub fn level_boxes(&self, level: u64) -> Option<&[FmmBox<'a>]> {
        self.boxes.get(level as usize).map(|boxes| boxes.as_slice())
    }

    /// Mutable access to the boxes at a given level.
    pub fn level_boxes_mut(&mut self, level: u64) -> Option<&mut [FmmBox<'a>]> {
        self.boxes
            .get_mut(level as usize)
            .map(|boxes| boxes.as_mut_slice())
    }

    /// Boxes at the finest level.
    pub fn leaves(&self) -> &[FmmBox<'a>] {
        &self.boxes[self.depth() as usize]
    }

    /// Lookup the box associated with a key.
    pub fn get(&self, key: &MortonKey) -> Option<&FmmBox<'a>> {
        self.boxes
            .get(key.level as usize)
            .and_then(|boxes| boxes.get(key.morton as usize))
    }

    /// Mutable lookup of the box associated with a key.
    pub fn get_mut(&mut self, key: &MortonKey) -> Option<&mut FmmBox<'a>> {
        self.boxes
            .get_mut(key.level as usize)
            .and_then(|boxes| boxes.get_mut(key.morton as usize))
    }

    /// Parent of a box.
    pub fn parent(&self, fmm_box: &FmmBox<'a>) -> Option<&FmmBox<'a>> {
        fmm_box.key.parent().and_then(|parent| self.get(&parent))
    }

    /// Children of a box, empty at the finest level.
    pub fn children(&self, fmm_box: &FmmBox<'a>) -> Vec<&FmmBox<'a>> {
        fmm_box
            .key
            .children()
            .iter()
            .filter_map(|child| self.get(child))
            .collect()
    }

    /// Neighbours of a box at the same level.
    pub fn neighbors(&self, fmm_box: &FmmBox<'a>) -> Vec<&FmmBox<'a>> {
        fmm_box
            .key
            .neighbors()
            .iter()
            .filter_map(|neighbor| self.get(neighbor))
            .collect()
    }

    /// Boxes in the interaction list of a box.
    pub fn interaction_list(&self, fmm_box: &FmmBox<'a>) -> Vec<&FmmBox<'a>> {
        fmm_box
            .key
            .interaction_list()
            .iter()
            .filter_map(|source| self.get(source))
            .collect()
    }

    /// Split the storage into the boxes at a level and those at its parent level, for translations which
    /// read from one and write to the other.
    ///
    /// # Arguments
    /// * `level` - The child level, must be at least 1.
    pub fn split_levels_mut(
        &mut self,
        level: u64,
    ) -> Option<(&mut [FmmBox<'a>], &mut [FmmBox<'a>])> {
        if level == 0 || level >= self.n_levels {
            return None;
        }
        let (coarse, fine) = self.boxes.split_at_mut(level as usize);
        Some((
            coarse[level as usize - 1].as_mut_slice(),
            fine[0].as_mut_slice(),
        ))
    }

    /// Register a source in the finest level box that contains it.
    pub fn add_source(&mut self, source: &'a Point) -> Result<MortonKey, FmmError> {
        let key = MortonKey::from_point(source, self.depth())?;
        self.boxes[key.level as usize][key.morton as usize].add_source(source);
        Ok(key)
    }

    /// Register a target in the finest level box that contains it.
    pub fn add_target(&mut self, target: &'a Point) -> Result<MortonKey, FmmError> {
        let key = MortonKey::from_point(target, self.depth())?;
        self.boxes[key.level as usize][key.morton as usize].add_target(target);
        Ok(key)
    }

    /// Reset the expansion coefficients of every box.
    pub fn clear_expansions(&mut self) {
        self.boxes
            .iter_mut()
            .flatten()
            .for_each(|fmm_box| fmm_box.clear_expansions());
    }

    /// Total number of boxes over all levels.
    pub fn n_boxes(&self) -> usize {
        self.boxes.iter().map(|boxes| boxes.len()).sum()
    }
}
