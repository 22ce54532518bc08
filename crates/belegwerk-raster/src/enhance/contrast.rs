// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Windowed local-mean contrast stretching. Pushes each sample away from
// its neighborhood mean to restore the edge sharpness the blur stage
// softened; adaptive binarization depends on that sharpness.

use belegwerk_core::error::Result;

use crate::raster::buffer::RasterBuffer;

/// Half-width of the local-mean window (a 7x7 neighborhood).
const WINDOW_RADIUS: i64 = 3;

/// How far samples are pushed away from the local mean.
const SHARPEN_FACTOR: f64 = 1.5;

/// Stretch local contrast on every channel.
///
/// For each pixel and channel the local mean is computed over a 7x7
/// window clamped to the image bounds, then the sample is moved away from
/// that mean: `clamp(mean + (value - mean) * 1.5, 0, 255)`.
pub fn stretch_contrast(src: &RasterBuffer) -> Result<RasterBuffer> {
    let (width, height) = (src.width(), src.height());
    let mut out = RasterBuffer::packed(width, height);

    for y in 0..height {
        for x in 0..width {
            let x0 = (x as i64 - WINDOW_RADIUS).max(0) as u32;
            let x1 = (x as i64 + WINDOW_RADIUS).min(width as i64 - 1) as u32;
            let y0 = (y as i64 - WINDOW_RADIUS).max(0) as u32;
            let y1 = (y as i64 + WINDOW_RADIUS).min(height as i64 - 1) as u32;

            let mut sums = [0.0f64; 3];
            let mut count = 0u32;
            for wy in y0..=y1 {
                for wx in x0..=x1 {
                    let sample = src.pixel(wx, wy);
                    for c in 0..3 {
                        sums[c] += sample[c] as f64;
                    }
                    count += 1;
                }
            }

            let sample = src.pixel(x, y);
            let mut pixel = [0u8; 3];
            for c in 0..3 {
                let mean = sums[c] / count as f64;
                let stretched = mean + (sample[c] as f64 - mean) * SHARPEN_FACTOR;
                pixel[c] = stretched.round().clamp(0.0, 255.0) as u8;
            }
            out.set_pixel(x, y, pixel);
        }
    }

    Ok(out)
}
