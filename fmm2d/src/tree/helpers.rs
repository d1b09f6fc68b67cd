//! Helper functions used in testing tree implementations, specifically test point generators.
use num_complex::Complex64;
use rand::prelude::*;

use crate::tree::types::Point;

/// Points fixture for testing, uniformly samples in the unit square [0, 1) x [0, 1).
///
/// # Arguments
/// * `n_points` - The number of points to sample.
/// * `seed` - Random seed, defaults to 0.
pub fn points_fixture(n_points: usize, seed: Option<u64>) -> Vec<Point> {
    let seed = seed.unwrap_or(0);
    let mut range = StdRng::seed_from_u64(seed);
    let between = rand::distributions::Uniform::from(0.0..1.0);

    (0..n_points)
        .map(|index| {
            let x = between.sample(&mut range);
            let y = between.sample(&mut range);
            Point::new(Complex64::new(x, y), index)
        })
        .collect()
}

/// Copies of a set of points with their potentials reset, useful for evaluating the same point set as
/// both sources and targets while keeping the two roles separate.
///
/// # Arguments
/// * `points` - Points to copy.
pub fn targets_from(points: &[Point]) -> Vec<Point> {
    points
        .iter()
        .map(|point| Point::new(point.coordinate, point.global_index))
        .collect()
}
