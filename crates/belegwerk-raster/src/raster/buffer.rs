// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory raster buffer: width, height, row stride, and contiguous
// 3-channel samples. Every enhancement stage consumes one of these and
// produces a new one, so exclusive access to the underlying bytes is
// scoped by ownership.

use belegwerk_core::error::{BelegwerkError, Result};
use image::{Rgb, RgbImage};

/// Samples per pixel. All buffers are 3-channel RGB.
pub const CHANNELS: usize = 3;

/// In-memory image: dimensions, per-row byte stride, and a contiguous
/// byte sequence of length `row_stride * height`.
///
/// Sample `(x, y, c)` lives at byte offset `y * row_stride + x * 3 + c`.
/// Buffers produced by this crate are packed (`row_stride == width * 3`);
/// foreign buffers with trailing row padding are accepted via
/// [`RasterBuffer::with_stride`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    row_stride: usize,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    /// Create a packed buffer with every pixel set to `fill`.
    pub fn new_filled(width: u32, height: u32, fill: [u8; 3]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BelegwerkError::Geometry(format!(
                "raster dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let mut buffer = Self::packed(width, height);
        for chunk in buffer.pixels.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&fill);
        }
        Ok(buffer)
    }

    /// Wrap an existing byte sequence with an explicit row stride.
    ///
    /// The stride must cover at least `width * 3` bytes per row and the
    /// byte sequence must be exactly `row_stride * height` long.
    pub fn with_stride(
        width: u32,
        height: u32,
        row_stride: usize,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BelegwerkError::Geometry(format!(
                "raster dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if row_stride < width as usize * CHANNELS {
            return Err(BelegwerkError::Geometry(format!(
                "row stride {} is shorter than {} pixels of 3 channels",
                row_stride, width
            )));
        }
        if pixels.len() != row_stride * height as usize {
            return Err(BelegwerkError::Geometry(format!(
                "pixel buffer holds {} bytes, expected {}",
                pixels.len(),
                row_stride * height as usize
            )));
        }
        Ok(Self {
            width,
            height,
            row_stride,
            pixels,
        })
    }

    /// Convert a decoded RGB image into a packed buffer.
    pub fn from_rgb8(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            row_stride: width as usize * CHANNELS,
            pixels: image.into_raw(),
        }
    }

    /// Copy the buffer out into an `RgbImage` for encoding.
    pub fn to_rgb8(&self) -> RgbImage {
        let mut out = RgbImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.put_pixel(x, y, Rgb(self.pixel(x, y)));
            }
        }
        out
    }

    /// Zero-filled packed buffer. Callers overwrite every pixel.
    pub(crate) fn packed(width: u32, height: u32) -> Self {
        let row_stride = width as usize * CHANNELS;
        Self {
            width,
            height,
            row_stride,
            pixels: vec![0u8; row_stride * height as usize],
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including any trailing padding.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.row_stride + x as usize * CHANNELS
    }

    /// The three channel samples at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let at = self.offset(x, y);
        [self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]]
    }

    /// Overwrite the three channel samples at `(x, y)`.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: [u8; 3]) {
        let at = self.offset(x, y);
        self.pixels[at..at + CHANNELS].copy_from_slice(&value);
    }

    /// Scalar intensity at `(x, y)`: the mean of the three channels,
    /// truncated to an integer.
    #[inline]
    pub fn intensity(&self, x: u32, y: u32) -> u8 {
        let [r, g, b] = self.pixel(x, y);
        ((r as u16 + g as u16 + b as u16) / 3) as u8
    }

    /// Borrow the raw byte sequence.
    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }
}
