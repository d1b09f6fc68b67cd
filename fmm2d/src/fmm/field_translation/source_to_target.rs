//! Multipole to local field translations
use num::Zero;
use num_complex::Complex64;

use crate::{
    fmm::types::Mlfmm,
    traits::{fmm::SourceToTargetTranslation, tree::TreeNode, types::FmmError},
};

impl SourceToTargetTranslation for Mlfmm<'_> {
    fn m2l(&mut self, level: u64) -> Result<(), FmmError> {
        let kernel = self.kernel;
        let n_coeffs = kernel.degree();

        let Some(boxes) = self.grid.level_boxes(level) else {
            return Err(FmmError::Failed(format!(
                "M2L failed, level {} not found in box grid",
                level
            )));
        };

        // Interaction lists only read finalised multipoles at this level, so contributions are gathered
        // before any staging vector is written
        let mut contributions = vec![Complex64::zero(); boxes.len() * n_coeffs];
        let mut flops = 0;

        for (target_box, contribution) in boxes
            .iter()
            .zip(contributions.chunks_exact_mut(n_coeffs))
        {
            for source_key in target_box.key.interaction_list() {
                let source_box = &boxes[source_key.morton as usize];
                let translated =
                    kernel.m2l(source_box.center, target_box.center, &source_box.multipole);
                for (c, t) in contribution.iter_mut().zip(translated) {
                    *c += t;
                }
                flops += (n_coeffs * n_coeffs) as u64;
            }
        }

        if let Some(boxes) = self.grid.level_boxes_mut(level) {
            for (target_box, contribution) in boxes
                .iter_mut()
                .zip(contributions.chunks_exact(n_coeffs))
            {
                for (pending, &c) in target_box.pending_local.iter_mut().zip(contribution) {
                    *pending += c;
                }
            }
        }
        self.flops += flops;

        Ok(())
    }
}
