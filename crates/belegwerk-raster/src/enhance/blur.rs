// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Separable Gaussian blur — horizontal pass, then vertical pass with the
// same 1-D kernel. Suppresses sensor and compression noise before the
// contrast and binarization stages.

use belegwerk_core::error::Result;
use tracing::debug;

use crate::enhance::kernel::GaussianKernel;
use crate::raster::buffer::RasterBuffer;

/// Blur the raster with a Gaussian of the given sigma.
///
/// Each of the three channels is convolved independently. Taps that fall
/// outside the image are omitted and the remaining weights renormalized by
/// their own sum, so edge pixels average only real samples. Output
/// dimensions equal input dimensions.
pub fn gaussian_blur(src: &RasterBuffer, sigma: f64) -> Result<RasterBuffer> {
    let kernel = GaussianKernel::from_sigma(sigma)?;
    debug!(sigma, taps = kernel.len(), "Applying separable Gaussian blur");

    let horizontal = convolve_rows(src, &kernel);
    Ok(convolve_columns(&horizontal, &kernel))
}

fn convolve_rows(src: &RasterBuffer, kernel: &GaussianKernel) -> RasterBuffer {
    let (width, height) = (src.width(), src.height());
    let radius = kernel.radius() as i64;
    let mut out = RasterBuffer::packed(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f64; 3];
            let mut weight_sum = 0.0f64;
            for (tap, &weight) in kernel.weights().iter().enumerate() {
                let sx = x as i64 + tap as i64 - radius;
                if sx < 0 || sx >= width as i64 {
                    continue;
                }
                let sample = src.pixel(sx as u32, y);
                for c in 0..3 {
                    acc[c] += weight * sample[c] as f64;
                }
                weight_sum += weight;
            }
            out.set_pixel(x, y, weighted_average(acc, weight_sum));
        }
    }
    out
}

fn convolve_columns(src: &RasterBuffer, kernel: &GaussianKernel) -> RasterBuffer {
    let (width, height) = (src.width(), src.height());
    let radius = kernel.radius() as i64;
    let mut out = RasterBuffer::packed(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f64; 3];
            let mut weight_sum = 0.0f64;
            for (tap, &weight) in kernel.weights().iter().enumerate() {
                let sy = y as i64 + tap as i64 - radius;
                if sy < 0 || sy >= height as i64 {
                    continue;
                }
                let sample = src.pixel(x, sy as u32);
                for c in 0..3 {
                    acc[c] += weight * sample[c] as f64;
                }
                weight_sum += weight;
            }
            out.set_pixel(x, y, weighted_average(acc, weight_sum));
        }
    }
    out
}

/// The center tap is always inside the image, so `weight_sum` is non-zero.
#[inline]
fn weighted_average(acc: [f64; 3], weight_sum: f64) -> [u8; 3] {
    let mut pixel = [0u8; 3];
    for c in 0..3 {
        pixel[c] = (acc[c] / weight_sum).round().clamp(0.0, 255.0) as u8;
    }
    pixel
}
