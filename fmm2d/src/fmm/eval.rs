//! Evaluation of the multilevel FMM, chaining the field translations in order.
use log::{debug, warn};

use crate::{
    fmm::{constants::LOCAL_ROOT_LEVEL, kernel::direct_potential, types::Mlfmm},
    traits::{
        fmm::{Solver, SourceToTargetTranslation, SourceTranslation, TargetTranslation},
        types::{FmmError, FmmOperatorCount, FmmOperatorType},
    },
    tree::types::Point,
};

impl Mlfmm<'_> {
    /// Apply a translation, recording the operations it consumed.
    fn counted<F>(&mut self, operator: FmmOperatorType, translation: F) -> Result<(), FmmError>
    where
        F: FnOnce(&mut Self) -> Result<(), FmmError>,
    {
        let before = self.flops;
        translation(self)?;
        let flops = self.flops - before;
        debug!("{} consumed {} operations", operator, flops);
        self.operator_counts
            .push(FmmOperatorCount::new(operator, flops));
        Ok(())
    }

    #[inline(always)]
    fn evaluate_leaf_sources(&mut self) -> Result<(), FmmError> {
        self.counted(FmmOperatorType::P2M, |fmm| fmm.p2m())
    }

    #[inline(always)]
    fn evaluate_upward_pass(&mut self) -> Result<(), FmmError> {
        for level in (LOCAL_ROOT_LEVEL..=self.grid.depth()).rev() {
            self.counted(FmmOperatorType::M2M(level), |fmm| fmm.m2m(level))?;
        }
        Ok(())
    }

    #[inline(always)]
    fn evaluate_downward_pass(&mut self) -> Result<(), FmmError> {
        let depth = self.grid.depth();
        for level in LOCAL_ROOT_LEVEL..=depth {
            self.counted(FmmOperatorType::M2L(level), |fmm| fmm.m2l(level))?;
        }
        for level in LOCAL_ROOT_LEVEL..=depth {
            self.counted(FmmOperatorType::L2L(level), |fmm| fmm.l2l(level))?;
        }
        Ok(())
    }

    #[inline(always)]
    fn evaluate_leaf_targets(&mut self) -> Result<(), FmmError> {
        self.counted(FmmOperatorType::L2P, |fmm| fmm.l2p())?;
        self.counted(FmmOperatorType::P2P, |fmm| fmm.p2p())
    }

    /// Run every phase of the FMM over the current expansions, recording per operator counts. Unlike
    /// [`Solver::solve`] the expansions are not cleared first.
    pub fn evaluate(&mut self) -> Result<(), FmmError> {
        self.operator_counts.clear();
        self.evaluate_leaf_sources()?;
        self.evaluate_upward_pass()?;
        self.evaluate_downward_pass()?;
        self.evaluate_leaf_targets()?;
        Ok(())
    }
}

impl<'a> Solver<'a> for Mlfmm<'a> {
    fn add_source(&mut self, source: &'a Point) -> Result<(), FmmError> {
        self.grid.add_source(source)?;
        self.sources.push(source);
        Ok(())
    }

    fn add_target(&mut self, target: &'a Point) -> Result<(), FmmError> {
        self.grid.add_target(target)?;
        self.targets.push(target);
        Ok(())
    }

    fn solve(&mut self) -> Result<(), FmmError> {
        if self.sources.is_empty() || self.targets.is_empty() {
            warn!(
                "Solving MLFMM with {} sources and {} targets",
                self.sources.len(),
                self.targets.len()
            );
        }
        self.grid.clear_expansions();
        self.evaluate()
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

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    use crate::{
        fmm::types::MlfmmBuilder,
        tree::helpers::{points_fixture, targets_from},
    };

    use super::*;

    fn max_error(found: &[f64], expected: &[f64]) -> f64 {
        found
            .iter()
            .zip(expected)
            .map(|(f, e)| (f - e).abs())
            .fold(0., f64::max)
    }

    fn solve_and_compare(levels: u64, degree: usize, sources: &[Point], targets: &[Point]) -> f64 {
        let mut fmm = MlfmmBuilder::new()
            .levels(levels)
            .degree(degree)
            .build()
            .unwrap();
        for source in sources.iter() {
            fmm.add_source(source).unwrap();
        }
        for target in targets.iter() {
            fmm.add_target(target).unwrap();
        }

        fmm.direct_solve();
        let expected = targets.iter().map(|t| t.potential()).collect::<Vec<_>>();

        fmm.solve().unwrap();
        let found = targets.iter().map(|t| t.potential()).collect::<Vec<_>>();

        max_error(&found, &expected)
    }

    #[test]
    fn test_two_sources() {
        let sources = [
            Point::new(Complex64::new(0.25, 0.25), 0),
            Point::new(Complex64::new(0.75, 0.75), 1),
        ];
        let targets = [Point::new(Complex64::new(0.5, 0.5), 0)];

        // Every box is within the near field of the target at three levels
        let error = solve_and_compare(3, 10, &sources, &targets);
        assert!(error < 1e-12);

        let expected = 2. * (0.25 * 2f64.sqrt()).ln();
        assert_relative_eq!(targets[0].potential(), expected, epsilon = 1e-12);

        // At four levels the sources are far field, and the expansions take over
        let error = solve_and_compare(4, 20, &sources, &targets);
        assert!(error < 1e-4);
    }

    #[test]
    fn test_coincident_source_and_target() {
        let source = Point::new(Complex64::new(0.3, 0.6), 0);
        let target = Point::new(Complex64::new(0.3, 0.6), 0);
        let mut fmm = MlfmmBuilder::new().levels(4).degree(8).build().unwrap();
        fmm.add_source(&source).unwrap();
        fmm.add_target(&target).unwrap();

        fmm.solve().unwrap();
        assert_eq!(target.potential(), 0.);

        fmm.direct_solve();
        assert_eq!(target.potential(), 0.);
    }

    #[test]
    fn test_error_decreases_with_degree() {
        let sources = points_fixture(500, Some(0));
        let targets = targets_from(&points_fixture(200, Some(1)));

        let errors = [3, 6, 9, 12]
            .iter()
            .map(|&degree| solve_and_compare(4, degree, &sources, &targets))
            .collect::<Vec<_>>();

        for pair in errors.windows(2) {
            assert!(pair[1] < pair[0], "errors {:?}", errors);
        }
        assert!(errors[3] < 1e-3);
    }

    #[test]
    fn test_sources_as_targets() {
        let sources = points_fixture(300, Some(2));
        let targets = targets_from(&sources);
        let error = solve_and_compare(5, 16, &sources, &targets);
        assert!(error < 1e-5);
    }

    #[test]
    fn test_operator_counts() {
        let sources = points_fixture(100, Some(3));
        let targets = targets_from(&sources);
        let mut fmm = MlfmmBuilder::new().levels(4).degree(6).build().unwrap();
        for (source, target) in sources.iter().zip(targets.iter()) {
            fmm.add_source(source).unwrap();
            fmm.add_target(target).unwrap();
        }
        fmm.solve().unwrap();

        let operators = fmm
            .operator_counts
            .iter()
            .map(|count| count.operator)
            .collect::<Vec<_>>();
        assert_eq!(
            operators,
            vec![
                FmmOperatorType::P2M,
                FmmOperatorType::M2M(3),
                FmmOperatorType::M2M(2),
                FmmOperatorType::M2L(2),
                FmmOperatorType::M2L(3),
                FmmOperatorType::L2L(2),
                FmmOperatorType::L2L(3),
                FmmOperatorType::L2P,
                FmmOperatorType::P2P,
            ]
        );

        let total: u64 = fmm.operator_counts.iter().map(|count| count.flops).sum();
        assert_eq!(total, fmm.flops());

        assert_eq!(fmm.operator_counts[0].flops, 100 * 6);
        assert_eq!(fmm.operator_counts[1].flops, 64 * 36);
        assert_eq!(fmm.operator_counts[2].flops, 16 * 36);
        assert_eq!(fmm.operator_counts[5].flops, 16 * 6);
        assert_eq!(fmm.operator_counts[6].flops, 64 * (36 + 6));
        assert_eq!(fmm.operator_counts[7].flops, 100 * 6);
    }

    #[test]
    fn test_flops() {
        let sources = points_fixture(50, Some(4));
        let targets = targets_from(&sources);
        let mut fmm = MlfmmBuilder::new().levels(3).degree(4).build().unwrap();
        for (source, target) in sources.iter().zip(targets.iter()) {
            fmm.add_source(source).unwrap();
            fmm.add_target(target).unwrap();
        }

        fmm.solve().unwrap();
        let after_solve = fmm.flops();
        assert!(after_solve > 0);

        fmm.direct_solve();
        // Every ordered pair except each point with itself
        assert_eq!(fmm.flops(), after_solve + 50 * 49);

        fmm.reset_flops();
        assert_eq!(fmm.flops(), 0);
    }

    #[test]
    fn test_repeated_solves() {
        let sources = points_fixture(200, Some(5));
        let targets = targets_from(&points_fixture(50, Some(6)));
        let mut fmm = MlfmmBuilder::new().levels(4).degree(10).build().unwrap();
        for source in sources.iter() {
            fmm.add_source(source).unwrap();
        }
        for target in targets.iter() {
            fmm.add_target(target).unwrap();
        }

        fmm.solve().unwrap();
        let first = targets.iter().map(|t| t.potential()).collect::<Vec<_>>();
        fmm.solve().unwrap();
        let second = targets.iter().map(|t| t.potential()).collect::<Vec<_>>();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_level() {
        // Without far field boxes the solve is a direct sum
        let sources = points_fixture(40, Some(7));
        let targets = targets_from(&points_fixture(10, Some(8)));
        for levels in 1..3 {
            let error = solve_and_compare(levels, 1, &sources, &targets);
            assert!(error < 1e-12);
        }
    }

    #[test]
    fn test_out_of_domain() {
        let outside = Point::new(Complex64::new(1.0, 0.5), 42);
        let mut fmm = MlfmmBuilder::new().build().unwrap();
        match fmm.add_source(&outside) {
            Err(FmmError::OutOfDomain { index, x, y }) => {
                assert_eq!(index, 42);
                assert_eq!(x, 1.0);
                assert_eq!(y, 0.5);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(fmm.sources.is_empty());

        let nan = Point::new(Complex64::new(f64::NAN, 0.5), 0);
        assert!(fmm.add_target(&nan).is_err());
        assert!(fmm.targets.is_empty());
    }
}
