//! Implementation of an adaptive quadtree with aggregate charges, used by the Barnes-Hut treecode.
//!
//! Nodes are split lazily: a leaf holding a single source is only split when a second source arrives,
//! at which point the resident source is pushed down one level. Leaves at the maximum depth are buckets
//! and are never split, which bounds the recursion for clustered or coincident sources.
use log::trace;
use num::Zero;
use num_complex::Complex64;

use crate::{
    fmm::kernel::{direct_potential, log_kernel},
    tree::{
        constants::{ROOT_CENTER, ROOT_SIZE},
        types::{Point, QuadTreeNode},
    },
};

impl<'a> QuadTreeNode<'a> {
    /// Constructor for an empty leaf.
    ///
    /// # Arguments
    /// * `center` - Center of the node.
    /// * `size` - Half extent of the node along the x (real) and y (imaginary) axes.
    /// * `depth` - Depth of the node.
    /// * `max_depth` - Depth at which nodes become buckets.
    pub fn new(center: Complex64, size: Complex64, depth: u64, max_depth: u64) -> Self {
        Self {
            center,
            size,
            depth,
            max_depth,
            children: [None, None, None, None],
            sources: Vec::new(),
            charge: 0.,
            centre_of_charge: Complex64::zero(),
        }
    }

    /// An empty root node covering the unit square.
    pub fn root(max_depth: u64) -> Self {
        Self::new(ROOT_CENTER, ROOT_SIZE, 0, max_depth)
    }

    /// Index of the quadrant containing a coordinate, ties resolve towards the greater quadrant.
    ///
    /// ```text
    ///   1 | 0
    ///  ---+---
    ///   2 | 3
    /// ```
    pub fn quadrant(&self, coordinate: Complex64) -> usize {
        let east = coordinate.re >= self.center.re;
        let north = coordinate.im >= self.center.im;
        match (east, north) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        }
    }

    /// Get the child at a quadrant, creating it if it doesn't exist yet.
    fn create_child(&mut self, quadrant: usize) -> &mut QuadTreeNode<'a> {
        let size = self.size / 2.;
        let center = match quadrant {
            0 => self.center + size,
            1 => self.center - size.conj(),
            2 => self.center - size,
            _ => self.center + size.conj(),
        };
        let (depth, max_depth) = (self.depth + 1, self.max_depth);

        self.children[quadrant]
            .get_or_insert_with(|| Box::new(QuadTreeNode::new(center, size, depth, max_depth)))
    }

    /// Whether this node has any children.
    pub fn has_children(&self) -> bool {
        self.children.iter().any(|child| child.is_some())
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// Iterate over the existing children of this node.
    pub fn children(&self) -> impl Iterator<Item = &QuadTreeNode<'a>> {
        self.children.iter().flatten().map(|child| child.as_ref())
    }

    /// Add a source to the subtree rooted at this node, returning the depth at which it was stored.
    ///
    /// # Arguments
    /// * `source` - Source to insert, must lie inside this node.
    pub fn add_source(&mut self, source: &'a Point) -> u64 {
        // at maximum depth, nodes are buckets
        if self.depth >= self.max_depth {
            self.sources.push(source);
            return self.depth;
        }

        // push the resident source down, then insert the new source at the child level
        if self.sources.len() == 1 {
            if let Some(existing) = self.sources.pop() {
                trace!(
                    "splitting quadtree node at depth {} centered at {}",
                    self.depth,
                    self.center
                );
                let quadrant = self.quadrant(existing.coordinate);
                self.create_child(quadrant).add_source(existing);
            }
            let quadrant = self.quadrant(source.coordinate);
            return self.create_child(quadrant).add_source(source);
        }

        if self.has_children() {
            let quadrant = self.quadrant(source.coordinate);
            self.create_child(quadrant).add_source(source)
        } else {
            self.sources.push(source);
            self.depth
        }
    }

    /// Compute the total charge and center of charge of every node, post order.
    ///
    /// Must be called after all sources have been added, and before potentials are evaluated.
    ///
    /// # Arguments
    /// * `flops` - Operation counter.
    pub fn compute_charge_distribution(&mut self, flops: &mut u64) {
        self.charge = 0.;
        self.centre_of_charge = Complex64::zero();

        if !self.sources.is_empty() {
            for source in self.sources.iter() {
                self.charge += 1.;
                self.centre_of_charge += source.coordinate;
                *flops += 1;
            }
        } else {
            for child in self.children.iter_mut().flatten() {
                child.compute_charge_distribution(flops);
                self.charge += child.charge;
                self.centre_of_charge += child.centre_of_charge * child.charge;
                *flops += 1;
            }
        }

        if self.charge > 0. {
            self.centre_of_charge /= self.charge;
        } else {
            self.centre_of_charge = self.center;
        }
    }

    /// Approximate potential at a target due to the sources in the subtree rooted at this node.
    ///
    /// A subtree is replaced by a point charge at its center of charge when
    /// `sqrt(|target - centre_of_charge|^2 / |size|^2) > theta`, otherwise its children are visited.
    ///
    /// # Arguments
    /// * `target` - Evaluation point.
    /// * `theta` - Multipole acceptance threshold.
    /// * `flops` - Operation counter.
    pub fn compute_potential(&self, target: &Point, theta: f64, flops: &mut u64) -> f64 {
        if !self.sources.is_empty() {
            return direct_potential(target, &self.sources, flops);
        }

        if self.charge == 0. {
            return 0.;
        }

        let distance = (target.coordinate - self.centre_of_charge).norm_sqr();
        let ratio = (distance / self.size.norm_sqr()).sqrt();

        if ratio > theta {
            *flops += 1;
            self.charge * log_kernel(target.coordinate, self.centre_of_charge)
        } else {
            let mut potential = 0.;
            for child in self.children() {
                potential += child.compute_potential(target, theta, flops);
            }
            potential
        }
    }

    /// All leaves of the subtree rooted at this node, including empty ones, in depth first order.
    pub fn leaves(&self) -> Vec<&QuadTreeNode<'a>> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves.push(node);
            } else {
                stack.extend(node.children().collect::<Vec<_>>().into_iter().rev());
            }
        }
        leaves
    }

    /// Number of sources stored in the subtree rooted at this node.
    pub fn n_sources(&self) -> usize {
        self.sources.len() + self.children().map(|child| child.n_sources()).sum::<usize>()
    }

    /// Greatest depth of any node in the subtree rooted at this node.
    pub fn depth_reached(&self) -> u64 {
        self.children()
            .map(|child| child.depth_reached())
            .max()
            .unwrap_or(self.depth)
    }
}
