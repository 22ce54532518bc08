// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// White border padding. Text touching the image edge degrades many OCR
// engines, so the slip is centered on a larger white canvas before any
// other stage runs.

use belegwerk_core::error::{BelegwerkError, Result};

use crate::raster::buffer::RasterBuffer;

const WHITE: [u8; 3] = [255, 255, 255];

/// Pad the raster with `border_px` pure-white pixels on every side.
///
/// The output is `(width + 2*border_px) x (height + 2*border_px)` with the
/// source copied centered. A zero border returns a plain copy.
pub fn pad_border(src: &RasterBuffer, border_px: u32) -> Result<RasterBuffer> {
    if border_px == 0 {
        return Ok(src.clone());
    }

    let double_border = border_px.checked_mul(2).ok_or_else(overflow)?;
    let padded_width = src.width().checked_add(double_border).ok_or_else(overflow)?;
    let padded_height = src.height().checked_add(double_border).ok_or_else(overflow)?;

    let mut out = RasterBuffer::new_filled(padded_width, padded_height, WHITE)?;
    for y in 0..src.height() {
        for x in 0..src.width() {
            out.set_pixel(x + border_px, y + border_px, src.pixel(x, y));
        }
    }
    Ok(out)
}

fn overflow() -> BelegwerkError {
    BelegwerkError::Geometry("padded dimensions overflow".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_grows_both_dimensions_by_twice_the_border() {
        let src = RasterBuffer::new_filled(100, 60, [128, 128, 128]).unwrap();
        let out = pad_border(&src, 20).unwrap();
        assert_eq!(out.width(), 140);
        assert_eq!(out.height(), 100);
    }

    #[test]
    fn border_region_is_pure_white_and_content_is_centered() {
        let src = RasterBuffer::new_filled(10, 10, [40, 50, 60]).unwrap();
        let out = pad_border(&src, 5).unwrap();

        for y in 0..out.height() {
            for x in 0..out.width() {
                let inside = (5..15).contains(&x) && (5..15).contains(&y);
                let expected = if inside { [40, 50, 60] } else { WHITE };
                assert_eq!(out.pixel(x, y), expected, "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn zero_border_is_identity() {
        let src = RasterBuffer::new_filled(7, 3, [9, 9, 9]).unwrap();
        let out = pad_border(&src, 0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn oversized_border_is_rejected() {
        let src = RasterBuffer::new_filled(4, 4, [0, 0, 0]).unwrap();
        assert!(pad_border(&src, u32::MAX).is_err());
    }
}
