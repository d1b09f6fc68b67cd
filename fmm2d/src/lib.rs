//! # Hierarchical Solvers for the Two Dimensional Logarithmic Potential
//!
//! Computes the potential `φ(y) = Σ_i log|y - x_i|` induced by a set of unit source charges at a set of
//! target points in the unit square, with two independent hierarchical approximations:
//!
//! * An adaptive Barnes-Hut treecode ([`BarnesHut`]), built on a lazily split quadtree with aggregate
//!   charges and a multipole acceptance criterion, O(N log N).
//! * A uniform grid multilevel fast multipole method ([`Mlfmm`]), using truncated complex power series
//!   expansions of the logarithmic kernel and the analytic M2M, M2L and L2L translation operators, O(N).
//!
//! Both engines also provide an O(N²) direct evaluation used as ground truth.
//!
//! Points are owned by the caller and registered with an engine by reference, solved potentials are
//! written back into each target [`Point`].
//!
//! ```
//! use fmm2d::{MlfmmBuilder, Point};
//! use fmm2d::traits::fmm::Solver;
//! use num_complex::Complex64;
//!
//! let sources = [
//!     Point::new(Complex64::new(0.25, 0.25), 0),
//!     Point::new(Complex64::new(0.75, 0.75), 1),
//! ];
//! let target = Point::new(Complex64::new(0.5, 0.5), 0);
//!
//! let mut fmm = MlfmmBuilder::new().levels(3).degree(8).build().unwrap();
//! for source in sources.iter() {
//!     fmm.add_source(source).unwrap();
//! }
//! fmm.add_target(&target).unwrap();
//! fmm.solve().unwrap();
//!
//! let expected = 2.0 * (0.25f64 * 2f64.sqrt()).ln();
//! assert!((target.potential() - expected).abs() < 1e-12);
//! ```
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod barnes_hut;
pub mod fmm;
pub mod traits;
pub mod tree;

// Public API
#[doc(inline)]
pub use barnes_hut::{BarnesHut, BarnesHutBuilder};
#[doc(inline)]
pub use fmm::types::{Mlfmm, MlfmmBuilder};
#[doc(inline)]
pub use fmm::kernel::LogKernel;
#[doc(inline)]
pub use traits::types::FmmError;
#[doc(inline)]
pub use tree::types::Point;
