// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptive binarization (Bradley-Roth style) over an integral table, plus
// the optional midtone-preservation pass that follows it.

use belegwerk_core::error::{BelegwerkError, Result};
use tracing::info;

use crate::raster::buffer::RasterBuffer;

/// Midtone band restored by [`preserve_midtones`]: original intensities
/// strictly inside (50, 200) survive binarization.
const GRAY_BAND_LOW: u8 = 50;
const GRAY_BAND_HIGH: u8 = 200;

/// Per-pixel scalar intensities of a raster: the mean of the three
/// channels, truncated to an integer.
///
/// Captured once by [`binarize`] and handed to [`preserve_midtones`], so
/// thresholding and midtone restoration always consult identical values.
#[derive(Debug, Clone)]
pub struct LumaPlane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LumaPlane {
    /// Reduce a raster to its intensity plane.
    pub fn from_raster(src: &RasterBuffer) -> Self {
        let (width, height) = (src.width(), src.height());
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(src.intensity(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intensity at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }
}

/// Summed-area table over a [`LumaPlane`].
///
/// `(width+1) x (height+1)` with a zero row and column at the origin, so
/// any rectangular window sum costs four lookups. Built per binarization
/// call and discarded with it.
#[derive(Debug)]
pub struct IntegralTable {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u64>,
}

impl IntegralTable {
    /// Build the prefix-sum table for a plane.
    pub fn build(plane: &LumaPlane) -> Self {
        let (width, height) = (plane.width(), plane.height());
        let stride = width as usize + 1;
        let mut data = vec![0u64; stride * (height as usize + 1)];

        for y in 0..height {
            let mut row_sum = 0u64;
            for x in 0..width {
                row_sum += plane.get(x, y) as u64;
                let at = (y as usize + 1) * stride + x as usize + 1;
                data[at] = row_sum + data[at - stride];
            }
        }

        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Mean intensity of the window centered on `(cx, cy)`, clamped to
    /// the image bounds and divided by the actual pixel count.
    pub fn window_mean(&self, cx: u32, cy: u32, radius: u32) -> f64 {
        let x0 = cx.saturating_sub(radius) as usize;
        let y0 = cy.saturating_sub(radius) as usize;
        let x1 = ((cx + radius + 1) as usize).min(self.width as usize);
        let y1 = ((cy + radius + 1) as usize).min(self.height as usize);

        let count = ((x1 - x0) * (y1 - y0)) as f64;
        let sum = self.data[y1 * self.stride + x1] as f64
            - self.data[y0 * self.stride + x1] as f64
            - self.data[y1 * self.stride + x0] as f64
            + self.data[y0 * self.stride + x0] as f64;

        sum / count
    }
}

/// Threshold the raster to pure black and white.
///
/// Each pixel's local mean `m` comes from an integral-table window of the
/// given full width clamped to the image bounds; the pixel turns black
/// when its intensity falls below `m * (1 - k)`, white otherwise. Returns
/// the binarized raster together with the captured intensity plane for
/// the optional midtone pass.
///
/// Runs in O(width * height) regardless of the window size.
pub fn binarize(src: &RasterBuffer, window: u32, k: f64) -> Result<(RasterBuffer, LumaPlane)> {
    if window == 0 {
        return Err(BelegwerkError::InvalidSettings(
            "binarization window must be positive".into(),
        ));
    }
    if !k.is_finite() {
        return Err(BelegwerkError::InvalidSettings(format!(
            "binarization sensitivity must be finite, got {}",
            k
        )));
    }

    let (width, height) = (src.width(), src.height());
    info!(window, k, width, height, "Applying adaptive binarization");

    let plane = LumaPlane::from_raster(src);
    let table = IntegralTable::build(&plane);
    let radius = window / 2;

    let mut out = RasterBuffer::packed(width, height);
    for y in 0..height {
        for x in 0..width {
            let threshold = table.window_mean(x, y, radius) * (1.0 - k);
            let value = if (plane.get(x, y) as f64) < threshold {
                0
            } else {
                255
            };
            out.set_pixel(x, y, [value; 3]);
        }
    }

    Ok((out, plane))
}

/// Restore the midtone band after binarization.
///
/// Pixels whose pre-binarization intensity was strictly between 50 and
/// 200 get that original gray on all three channels instead of pure
/// black or white. Some typefaces OCR better with anti-aliased midtone
/// edges than hard binary ones.
pub fn preserve_midtones(src: &RasterBuffer, plane: &LumaPlane) -> Result<RasterBuffer> {
    if plane.width() != src.width() || plane.height() != src.height() {
        return Err(BelegwerkError::Geometry(format!(
            "intensity plane is {}x{} but raster is {}x{}",
            plane.width(),
            plane.height(),
            src.width(),
            src.height()
        )));
    }

    let mut out = src.clone();
    for y in 0..src.height() {
        for x in 0..src.width() {
            let original = plane.get(x, y);
            if original > GRAY_BAND_LOW && original < GRAY_BAND_HIGH {
                out.set_pixel(x, y, [original; 3]);
            }
        }
    }
    Ok(out)
}
