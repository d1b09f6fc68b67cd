//! Implementation of constructors and domain checks for point data.
use std::cell::Cell;

use num_complex::Complex64;

use crate::{traits::types::FmmError, tree::types::Point};

impl Point {
    /// Constructor, the potential is initialised to zero.
    ///
    /// # Arguments
    /// * `coordinate` - Position of the point in the complex plane.
    /// * `global_index` - Identity of the point.
    pub fn new(coordinate: Complex64, global_index: usize) -> Self {
        Self {
            coordinate,
            global_index,
            potential: Cell::new(0.),
        }
    }

    /// Potential most recently evaluated at this point.
    pub fn potential(&self) -> f64 {
        self.potential.get()
    }

    /// Overwrite the potential at this point.
    pub fn set_potential(&self, potential: f64) {
        self.potential.set(potential)
    }

    pub(crate) fn add_potential(&self, potential: f64) {
        self.potential.set(self.potential.get() + potential)
    }

    /// Whether the point lies in the half open unit square [0, 1) x [0, 1).
    pub fn in_domain(&self) -> bool {
        let (x, y) = (self.coordinate.re, self.coordinate.im);
        (0. ..1.).contains(&x) && (0. ..1.).contains(&y)
    }

    /// Reject points outside of the unit square, this includes non finite coordinates.
    pub fn validate(&self) -> Result<(), FmmError> {
        if self.in_domain() {
            Ok(())
        } else {
            Err(FmmError::OutOfDomain {
                index: self.global_index,
                x: self.coordinate.re,
                y: self.coordinate.im,
            })
        }
    }

    /// Whether two points occupy exactly the same position, in which case the kernel is singular.
    pub fn coincident(&self, other: &Point) -> bool {
        self.coordinate == other.coordinate
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_domain() {
        let inside = [
            Complex64::new(0., 0.),
            Complex64::new(0.5, 0.999),
            Complex64::new(0.999_999, 0.),
        ];
        for (i, &c) in inside.iter().enumerate() {
            assert!(Point::new(c, i).validate().is_ok());
        }

        let outside = [
            Complex64::new(1., 0.5),
            Complex64::new(0.5, 1.),
            Complex64::new(-1e-12, 0.5),
            Complex64::new(f64::NAN, 0.5),
            Complex64::new(0.5, f64::INFINITY),
        ];
        for (i, &c) in outside.iter().enumerate() {
            match Point::new(c, i).validate() {
                Err(FmmError::OutOfDomain { index, .. }) => assert_eq!(index, i),
                _ => panic!("point {:?} should be rejected", c),
            }
        }
    }

    #[test]
    fn test_potential_accumulation() {
        let point = Point::new(Complex64::new(0.1, 0.2), 7);
        assert_eq!(point.potential(), 0.);
        point.set_potential(1.5);
        point.add_potential(-0.5);
        assert_eq!(point.potential(), 1.);
    }
}
