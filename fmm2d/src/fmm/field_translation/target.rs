//! Local expansion translations and particle evaluations
use itertools::Itertools;

use crate::{
    fmm::{constants::LOCAL_ROOT_LEVEL, kernel::direct_potential, types::Mlfmm},
    traits::{fmm::TargetTranslation, tree::TreeNode, types::FmmError},
};

impl TargetTranslation for Mlfmm<'_> {
    fn l2l(&mut self, level: u64) -> Result<(), FmmError> {
        let kernel = self.kernel;
        let n_coeffs = kernel.degree() as u64;

        if level < LOCAL_ROOT_LEVEL {
            return Ok(());
        }

        if level == LOCAL_ROOT_LEVEL {
            let Some(boxes) = self.grid.level_boxes_mut(level) else {
                return Err(FmmError::Failed(format!(
                    "L2L failed, level {} not found in box grid",
                    level
                )));
            };
            for fmm_box in boxes.iter_mut() {
                for (local, &pending) in fmm_box.local.iter_mut().zip(fmm_box.pending_local.iter()) {
                    *local += pending;
                }
                self.flops += n_coeffs;
            }
            return Ok(());
        }

        let Some((parents, children)) = self.grid.split_levels_mut(level) else {
            return Err(FmmError::Failed(format!(
                "L2L failed, level {} not found in box grid",
                level
            )));
        };

        for child in children.iter_mut() {
            let parent = &parents[(child.key.morton >> 2) as usize];
            let translated = kernel.l2l(parent.center, child.center, &parent.local);
            for (local, (&pending, t)) in child
                .local
                .iter_mut()
                .zip(child.pending_local.iter().zip(translated))
            {
                *local += pending + t;
            }
            self.flops += n_coeffs * n_coeffs + n_coeffs;
        }

        Ok(())
    }

    fn l2p(&mut self) -> Result<(), FmmError> {
        let kernel = self.kernel;

        for leaf in self.grid.leaves().iter() {
            for target in leaf.targets.iter() {
                let far_field = kernel.evaluate_local(target.coordinate, leaf.center, &leaf.local);
                target.set_potential(far_field);
                self.flops += kernel.degree() as u64;
            }
        }

        Ok(())
    }

    fn p2p(&mut self) -> Result<(), FmmError> {
        let grid = &self.grid;

        for leaf in grid.leaves().iter().filter(|leaf| !leaf.targets.is_empty()) {
            let near_field = leaf
                .key
                .neighbors()
                .iter()
                .filter_map(|key| grid.get(key))
                .chain(std::iter::once(leaf))
                .flat_map(|fmm_box| fmm_box.sources.iter().copied())
                .collect_vec();

            for target in leaf.targets.iter() {
                let potential = direct_potential(target, &near_field, &mut self.flops);
                target.add_potential(potential);
                self.flops += 1;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    use crate::{
        fmm::types::MlfmmBuilder,
        traits::fmm::{Solver, SourceToTargetTranslation, SourceTranslation},
        tree::types::{MortonKey, Point},
    };

    use super::*;

    #[test]
    fn test_downward_pass() {
        // Far field of a single source reaches targets in every well separated leaf
        let source = Point::new(Complex64::new(0.05, 0.07), 0);
        let target = Point::new(Complex64::new(0.83, 0.61), 0);
        let mut fmm = MlfmmBuilder::new().levels(4).degree(20).build().unwrap();
        fmm.add_source(&source).unwrap();
        fmm.add_target(&target).unwrap();

        fmm.p2m().unwrap();
        for level in (2..=3).rev() {
            fmm.m2m(level).unwrap();
        }
        for level in 2..=3 {
            fmm.m2l(level).unwrap();
        }
        for level in 2..=3 {
            fmm.l2l(level).unwrap();
        }
        fmm.l2p().unwrap();

        let expected = (target.coordinate - source.coordinate).ln().re;
        assert_relative_eq!(target.potential(), expected, epsilon = 1e-10);

        // The near field adds nothing, the source is not in the target's neighbourhood
        fmm.p2p().unwrap();
        assert_relative_eq!(target.potential(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_l2l_root_level_copy() {
        let mut fmm = MlfmmBuilder::new().levels(3).degree(3).build().unwrap();
        let key = MortonKey::from_anchor(&[2, 1], 2);
        let pending = vec![
            Complex64::new(1., 2.),
            Complex64::new(-1., 0.5),
            Complex64::new(0., 3.),
        ];
        fmm.grid.get_mut(&key).unwrap().pending_local = pending.clone();

        fmm.l2l(1).unwrap();
        assert_eq!(fmm.flops, 0);

        fmm.l2l(2).unwrap();
        assert_eq!(fmm.grid.get(&key).unwrap().local, pending);
        assert_eq!(fmm.flops, 16 * 3);

        assert!(matches!(fmm.l2l(3), Err(FmmError::Failed(_))));
    }

    #[test]
    fn test_near_field() {
        let sources = [
            Point::new(Complex64::new(0.3, 0.3), 0),
            Point::new(Complex64::new(0.45, 0.2), 1),
            Point::new(Complex64::new(0.9, 0.9), 2),
        ];
        let targets = [
            Point::new(Complex64::new(0.3, 0.3), 0),
            Point::new(Complex64::new(0.1, 0.4), 1),
        ];
        let mut fmm = MlfmmBuilder::new().levels(3).degree(4).build().unwrap();
        for source in sources.iter() {
            fmm.add_source(source).unwrap();
        }
        for target in targets.iter() {
            fmm.add_target(target).unwrap();
        }

        fmm.p2p().unwrap();

        // Coincident source skipped, (0.9, 0.9) lies outside the neighbourhood of both targets
        let expected = (targets[0].coordinate - sources[1].coordinate).ln().re;
        assert_relative_eq!(targets[0].potential(), expected, epsilon = 1e-14);

        let expected = (targets[1].coordinate - sources[0].coordinate).ln().re
            + (targets[1].coordinate - sources[1].coordinate).ln().re;
        assert_relative_eq!(targets[1].potential(), expected, epsilon = 1e-14);

        // three pair evaluations and two target writes
        assert_eq!(fmm.flops, 5);
    }
}
