//! Multipole expansion translations
use crate::{
    fmm::types::Mlfmm,
    traits::{fmm::SourceTranslation, types::FmmError},
};

impl SourceTranslation for Mlfmm<'_> {
    fn p2m(&mut self) -> Result<(), FmmError> {
        let depth = self.grid.depth();
        let kernel = self.kernel;

        let Some(leaves) = self.grid.level_boxes_mut(depth) else {
            return Err(FmmError::Failed(
                "P2M failed, no leaves found in box grid".to_string(),
            ));
        };

        for leaf in leaves.iter_mut().filter(|leaf| !leaf.sources.is_empty()) {
            for source in leaf.sources.iter() {
                let coefficients = kernel.multipole_coefficients(source.coordinate, leaf.center);
                for (multipole, coefficient) in leaf.multipole.iter_mut().zip(coefficients) {
                    *multipole += coefficient;
                }
                self.flops += kernel.degree() as u64;
            }
        }

        Ok(())
    }

    fn m2m(&mut self, level: u64) -> Result<(), FmmError> {
        let kernel = self.kernel;
        let n_coeffs = kernel.degree() as u64;

        let Some((parents, children)) = self.grid.split_levels_mut(level) else {
            return Err(FmmError::Failed(format!(
                "M2M failed, no parent level for level {}",
                level
            )));
        };

        for child in children.iter() {
            let parent = &mut parents[(child.key.morton >> 2) as usize];
            let translated = kernel.m2m(child.center, parent.center, &child.multipole);
            for (multipole, coefficient) in parent.multipole.iter_mut().zip(translated) {
                *multipole += coefficient;
            }
            self.flops += n_coeffs * n_coeffs;
        }

        Ok(())
    }
}
