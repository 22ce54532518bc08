// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-image pipeline orchestrator. Sequences border padding, blur,
// contrast stretching, binarization, and midtone preservation, isolates
// per-stage failures, and guarantees a usable output file through a
// three-tier fallback.

use std::path::{Path, PathBuf};

use belegwerk_core::error::{BelegwerkError, Result};
use belegwerk_core::types::{ProcessingPass, ProcessingSettings};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, error, info, instrument, warn};

use crate::enhance::binarize::{binarize, preserve_midtones};
use crate::enhance::blur::gaussian_blur;
use crate::enhance::border::pad_border;
use crate::enhance::contrast::stretch_contrast;
use crate::raster::buffer::RasterBuffer;

/// Runs the staged enhancement pipeline over one slip image.
///
/// The stage sequence is fixed: border padding, Gaussian blur, local
/// contrast stretching, adaptive binarization, and (when the settings ask
/// for it) midtone preservation. Blur, contrast, binarization, and
/// midtone preservation are individually fault-isolated: a failing stage
/// is logged and skipped, and the previous buffer carries forward.
pub struct SlipEnhancer {
    settings: ProcessingSettings,
}

impl SlipEnhancer {
    /// Create an enhancer with explicit settings.
    pub fn new(settings: ProcessingSettings) -> Self {
        Self { settings }
    }

    /// Create an enhancer from a named pass profile.
    pub fn for_pass(pass: ProcessingPass) -> Self {
        Self::new(ProcessingSettings::preset(pass))
    }

    /// The settings this enhancer applies.
    pub fn settings(&self) -> &ProcessingSettings {
        &self.settings
    }

    /// Run every stage over an in-memory raster.
    ///
    /// Border padding is structural; its failure fails the pipeline.
    /// The remaining stages degrade individually.
    pub fn enhance_raster(&self, source: RasterBuffer) -> Result<RasterBuffer> {
        let s = &self.settings;

        let mut current = pad_border(&source, s.border_px)?;
        debug!(
            width = current.width(),
            height = current.height(),
            border_px = s.border_px,
            "Border padding applied"
        );

        current = carry_on_failure("blur", gaussian_blur(&current, s.gaussian_sigma), current);
        current = carry_on_failure("contrast", stretch_contrast(&current), current);

        match binarize(&current, s.binarization_window, s.binarization_k) {
            Ok((binarized, plane)) => {
                current = binarized;
                if s.preserve_grays {
                    current = carry_on_failure(
                        "midtone preservation",
                        preserve_midtones(&current, &plane),
                        current,
                    );
                }
            }
            Err(err) => {
                warn!(
                    stage = "binarization",
                    error = %err,
                    "Stage failed; carrying previous buffer forward"
                );
            }
        }

        Ok(current)
    }

    /// Enhance `source` and write the result to `dest` as lossless PNG.
    ///
    /// Strict variant used by the multi-pass controller: decode, border
    /// padding, and encode failures surface as errors.
    #[instrument(skip(self), fields(source = %source.display(), dest = %dest.display()))]
    pub fn try_enhance(&self, source: &Path, dest: &Path) -> Result<PathBuf> {
        let decoded = decode_raster(source)?;
        info!(
            width = decoded.width(),
            height = decoded.height(),
            "Slip image decoded"
        );

        let enhanced = self.enhance_raster(decoded)?;
        encode_png(&enhanced, dest)?;
        info!(
            width = enhanced.width(),
            height = enhanced.height(),
            "Enhanced slip written"
        );
        Ok(dest.to_path_buf())
    }

    /// Enhance `source`, absorbing every failure.
    ///
    /// Three tiers: the normal pipeline; a lossless re-encode of the
    /// original without enhancement; a raw byte copy. The returned path
    /// always points at a usable file: `dest` when any tier succeeded,
    /// the original `source` when all three failed.
    #[instrument(skip(self), fields(source = %source.display(), dest = %dest.display()))]
    pub fn enhance_file(&self, source: &Path, dest: &Path) -> PathBuf {
        match self.try_enhance(source, dest) {
            Ok(path) => path,
            Err(err) => {
                error!(
                    error = %err,
                    "Enhancement failed; re-encoding original without enhancement"
                );
                match reencode_lossless(source, dest) {
                    Ok(()) => dest.to_path_buf(),
                    Err(err) => {
                        error!(error = %err, "Lossless re-encode failed; copying raw bytes");
                        match std::fs::copy(source, dest) {
                            Ok(_) => dest.to_path_buf(),
                            Err(err) => {
                                error!(error = %err, "Raw copy failed; handing back the original");
                                source.to_path_buf()
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Default for SlipEnhancer {
    fn default() -> Self {
        Self::new(ProcessingSettings::default())
    }
}

/// Keep `prior` when a stage fails, logging the skip.
fn carry_on_failure(
    stage: &'static str,
    result: Result<RasterBuffer>,
    prior: RasterBuffer,
) -> RasterBuffer {
    match result {
        Ok(next) => next,
        Err(err) => {
            warn!(stage, error = %err, "Stage failed; carrying previous buffer forward");
            prior
        }
    }
}

/// Decode any supported photographic format into a raster buffer.
fn decode_raster(path: &Path) -> Result<RasterBuffer> {
    let image = image::open(path).map_err(|err| {
        BelegwerkError::Decode(format!("failed to open {}: {}", path.display(), err))
    })?;
    Ok(RasterBuffer::from_rgb8(image.to_rgb8()))
}

/// Encode a raster as PNG regardless of the destination extension.
///
/// PNG is lossless, so the pipeline never reintroduces the compression
/// artifacts it just removed.
fn encode_png(raster: &RasterBuffer, dest: &Path) -> Result<()> {
    DynamicImage::ImageRgb8(raster.to_rgb8())
        .save_with_format(dest, ImageFormat::Png)
        .map_err(|err| {
            BelegwerkError::Encode(format!("failed to write {}: {}", dest.display(), err))
        })
}

/// Decode the original and write it back out losslessly, unenhanced.
fn reencode_lossless(source: &Path, dest: &Path) -> Result<()> {
    let image = image::open(source).map_err(|err| {
        BelegwerkError::Decode(format!("failed to open {}: {}", source.display(), err))
    })?;
    image.save_with_format(dest, ImageFormat::Png).map_err(|err| {
        BelegwerkError::Encode(format!("failed to write {}: {}", dest.display(), err))
    })
}
