// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// belegwerk-raster — Raster enhancement for photographed payment slips.
//
// Provides the in-memory raster buffer, the staged enhancement transforms
// (border padding, Gaussian blur, local contrast stretching, adaptive
// binarization, midtone preservation), the single-image pipeline
// orchestrator, and the multi-pass escalation controller.

pub mod enhance;
pub mod pipeline;
pub mod raster;

// Re-export the primary types so callers can use `belegwerk_raster::SlipEnhancer` etc.
pub use enhance::binarize::{IntegralTable, LumaPlane, binarize, preserve_midtones};
pub use enhance::blur::gaussian_blur;
pub use enhance::border::pad_border;
pub use enhance::contrast::stretch_contrast;
pub use enhance::kernel::GaussianKernel;
pub use pipeline::orchestrator::SlipEnhancer;
pub use pipeline::passes::MultiPassRunner;
pub use raster::buffer::RasterBuffer;
