//! Expansions of the two dimensional logarithmic kernel and their translation operators.
//!
//! The field of a unit source at `x` evaluated at `y` is `Re(log(y - x))`. About a center `c` the field of
//! a source cluster is represented by an outer (multipole) expansion
//!
//! `φ(z) = Re(a_0 log(z - c) + Σ_{k≥1} a_k / (z - c)^k)`,
//!
//! valid far from the cluster, and the field incident on a region by an inner (local) expansion
//!
//! `φ(z) = Re(Σ_{k≥0} b_k (z - c)^k)`,
//!
//! both truncated at `degree` coefficients. Translations are applied as dense `degree x degree` matrices
//! built from closed form recurrences in the displacement `t = to - from`.
use num::{One, Zero};
use num_complex::Complex64;

use crate::{traits::types::FmmError, tree::types::Point};

/// Direct evaluation of the logarithmic kernel, undefined when `target == source`.
#[inline(always)]
pub fn log_kernel(target: Complex64, source: Complex64) -> f64 {
    (target - source).ln().re
}

/// Potential at a target due to a set of sources by direct summation, skipping any source coincident with
/// the target.
///
/// # Arguments
/// * `target` - Point at which the potential is evaluated.
/// * `sources` - Unit charges.
/// * `flops` - Operation counter, incremented once per evaluated pair.
pub fn direct_potential(target: &Point, sources: &[&Point], flops: &mut u64) -> f64 {
    let mut potential = 0.;
    for source in sources.iter().filter(|source| !source.coincident(target)) {
        potential += log_kernel(target.coordinate, source.coordinate);
        *flops += 1;
    }
    potential
}

/// The logarithmic kernel with expansions truncated at a fixed number of coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogKernel {
    degree: usize,
}

impl LogKernel {
    /// Constructor
    ///
    /// # Arguments
    /// * `degree` - Number of expansion coefficients, must be at least 1.
    pub fn new(degree: usize) -> Result<Self, FmmError> {
        if degree == 0 {
            return Err(FmmError::InvalidConfiguration(
                "expansion degree must be positive".to_string(),
            ));
        }
        Ok(Self { degree })
    }

    /// Number of expansion coefficients.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Directly evaluate the potential
    pub fn direct_evaluate(&self, target: Complex64, source: Complex64) -> f64 {
        log_kernel(target, source)
    }

    /// Coefficients of the multipole expansion of a unit source about a center.
    ///
    /// # Arguments
    /// * `source` - Position of the source.
    /// * `center` - Expansion center.
    pub fn multipole_coefficients(&self, source: Complex64, center: Complex64) -> Vec<Complex64> {
        let mut coefficients = vec![Complex64::zero(); self.degree];
        coefficients[0] = Complex64::one();
        for (k, coefficient) in coefficients.iter_mut().enumerate().skip(1) {
            *coefficient = -(source - center).powi(k as i32) / k as f64;
        }
        coefficients
    }

    /// Taylor basis at a target, a local expansion is evaluated by its inner product with this basis.
    ///
    /// # Arguments
    /// * `target` - Evaluation point.
    /// * `center` - Expansion center.
    pub fn local_coefficients(&self, target: Complex64, center: Complex64) -> Vec<Complex64> {
        (0..self.degree)
            .map(|k| (target - center).powi(k as i32))
            .collect()
    }

    /// Evaluate a local expansion at a target.
    ///
    /// # Arguments
    /// * `target` - Evaluation point.
    /// * `center` - Expansion center.
    /// * `local` - Local expansion coefficients.
    pub fn evaluate_local(&self, target: Complex64, center: Complex64, local: &[Complex64]) -> f64 {
        self.local_coefficients(target, center)
            .iter()
            .zip(local)
            .map(|(basis, coefficient)| (coefficient * basis).re)
            .sum()
    }

    /// Matrix-vector product between a row major translation matrix and a vector of expansion coefficients.
    pub fn apply_translation(&self, matrix: &[Complex64], coefficients: &[Complex64]) -> Vec<Complex64> {
        let p = self.degree;
        let mut product = vec![Complex64::zero(); p];
        for (i, row) in matrix.chunks_exact(p).enumerate() {
            for (j, &entry) in row.iter().enumerate() {
                product[i] += coefficients[j] * entry;
            }
        }
        product
    }

    /// Multipole to multipole translation matrix, shifting an outer expansion from `from` to `to`.
    pub fn m2m_matrix(&self, from: Complex64, to: Complex64) -> Vec<Complex64> {
        let p = self.degree;
        let t = to - from;
        let mut m2m = vec![Complex64::zero(); p * p];

        for i in 0..p {
            m2m[i * p + i] = Complex64::one();
        }

        if p > 1 {
            m2m[p] = t;
        }

        for i in 2..p {
            m2m[i * p] = -m2m[(i - 1) * p] * (i - 1) as f64 * t / i as f64;
        }

        for i in 1..p {
            for j in (1..i).rev() {
                m2m[i * p + j] = -m2m[i * p + j + 1] * t * j as f64 / (i - j) as f64;
            }
        }

        m2m
    }

    /// Multipole to local translation matrix, converting an outer expansion about `from` into an inner
    /// expansion about the well separated center `to`.
    pub fn m2l_matrix(&self, from: Complex64, to: Complex64) -> Vec<Complex64> {
        let p = self.degree;
        let t = to - from;
        let mut m2l = vec![Complex64::zero(); p * p];

        m2l[0] = t.ln();

        if p > 1 {
            m2l[p] = 1.0 / t;
        }

        for i in 2..p {
            m2l[i * p] = -m2l[(i - 1) * p] * (i - 1) as f64 / (t * i as f64);
        }

        for j in 1..p {
            m2l[j] = 1.0 / t.powi(j as i32);
        }

        for i in 1..p {
            for j in 1..p {
                m2l[i * p + j] = m2l[(i - 1) * p + j] * (i + j - 1) as f64 / (-t * i as f64);
            }
        }

        m2l
    }

    /// Local to local translation matrix, re-centering an inner expansion from `from` to `to`.
    pub fn l2l_matrix(&self, from: Complex64, to: Complex64) -> Vec<Complex64> {
        let p = self.degree;
        let t = to - from;
        let mut l2l = vec![Complex64::zero(); p * p];

        for i in 0..p {
            l2l[i * p + i] = Complex64::one();
        }

        for j in 1..p {
            l2l[j] = l2l[j - 1] * t;
        }

        for i in 1..p {
            for j in (i + 1)..p {
                l2l[i * p + j] = l2l[(i - 1) * p + j] * (j - i + 1) as f64 / (t * i as f64);
            }
        }

        l2l
    }

    /// Apply Multipole-to-Multipole translation
    pub fn m2m(&self, from: Complex64, to: Complex64, multipole: &[Complex64]) -> Vec<Complex64> {
        self.apply_translation(&self.m2m_matrix(from, to), multipole)
    }

    /// Apply Multipole-to-Local translation, `from` and `to` must not coincide.
    pub fn m2l(&self, from: Complex64, to: Complex64, multipole: &[Complex64]) -> Vec<Complex64> {
        self.apply_translation(&self.m2l_matrix(from, to), multipole)
    }

    /// Apply Local-to-Local translation
    pub fn l2l(&self, from: Complex64, to: Complex64, local: &[Complex64]) -> Vec<Complex64> {
        self.apply_translation(&self.l2l_matrix(from, to), local)
    }
}
