// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 1-D Gaussian convolution kernel derived from a sigma parameter.

use belegwerk_core::error::{BelegwerkError, Result};

/// Normalized 1-D Gaussian kernel for separable convolution.
///
/// The tap count is `round(sigma * 6)` forced to the next odd value
/// (minimum 1), so there is always a single center tap. Weights follow
/// `exp(-i² / (2·sigma²))` for offsets `i` in `[-radius, radius]` and are
/// normalized to sum to 1.
#[derive(Debug, Clone)]
pub struct GaussianKernel {
    weights: Vec<f64>,
    radius: usize,
}

impl GaussianKernel {
    /// Build a kernel for the given sigma. Rejects non-positive or
    /// non-finite sigma values.
    pub fn from_sigma(sigma: f64) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(BelegwerkError::InvalidSettings(format!(
                "gaussian sigma must be a positive finite number, got {}",
                sigma
            )));
        }

        let mut size = (sigma * 6.0).round() as usize;
        if size % 2 == 0 {
            size += 1;
        }
        let radius = size / 2;

        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut weights = Vec::with_capacity(size);
        for i in -(radius as i64)..=(radius as i64) {
            weights.push((-((i * i) as f64) / two_sigma_sq).exp());
        }

        let sum: f64 = weights.iter().sum();
        for weight in &mut weights {
            *weight /= sum;
        }

        Ok(Self { weights, radius })
    }

    /// Number of taps. Always odd.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Taps on either side of the center.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Normalized weights, center at index `radius`.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_odd_and_sums_to_one() {
        for sigma in [0.2, 0.5, 0.7, 0.8, 1.0, 1.5, 2.5, 4.0] {
            let kernel = GaussianKernel::from_sigma(sigma).unwrap();
            assert_eq!(kernel.len() % 2, 1, "sigma {} gave even kernel", sigma);
            assert!(
                (kernel.sum() - 1.0).abs() < 1e-6,
                "sigma {} sums to {}",
                sigma,
                kernel.sum()
            );
        }
    }

    #[test]
    fn kernel_size_follows_the_sigma_rule() {
        // round(0.5 * 6) = 3, already odd.
        assert_eq!(GaussianKernel::from_sigma(0.5).unwrap().len(), 3);
        // round(0.7 * 6) = 4, forced to 5.
        assert_eq!(GaussianKernel::from_sigma(0.7).unwrap().len(), 5);
        // round(0.8 * 6) = 5.
        assert_eq!(GaussianKernel::from_sigma(0.8).unwrap().len(), 5);
        // Tiny sigma collapses to the single center tap.
        assert_eq!(GaussianKernel::from_sigma(0.05).unwrap().len(), 1);
    }

    #[test]
    fn weights_are_symmetric_and_positive() {
        let kernel = GaussianKernel::from_sigma(1.2).unwrap();
        let weights = kernel.weights();
        for (i, &w) in weights.iter().enumerate() {
            assert!(w > 0.0);
            let mirrored = weights[weights.len() - 1 - i];
            assert!((w - mirrored).abs() < 1e-12);
        }
        // Center tap dominates.
        assert!(weights[kernel.radius()] >= weights[0]);
    }

    #[test]
    fn invalid_sigma_is_rejected() {
        assert!(GaussianKernel::from_sigma(0.0).is_err());
        assert!(GaussianKernel::from_sigma(-1.0).is_err());
        assert!(GaussianKernel::from_sigma(f64::NAN).is_err());
        assert!(GaussianKernel::from_sigma(f64::INFINITY).is_err());
    }
}
