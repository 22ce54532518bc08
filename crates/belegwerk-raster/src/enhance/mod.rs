// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enhancement stages — border padding, Gaussian blur, local contrast
// stretching, adaptive binarization, and midtone preservation. Each stage
// borrows its input raster and returns a freshly owned output, so a failed
// stage leaves the previous buffer untouched for the orchestrator to carry
// forward.

pub mod binarize;
pub mod blur;
pub mod border;
pub mod contrast;
pub mod kernel;

pub use binarize::{IntegralTable, LumaPlane, binarize, preserve_midtones};
pub use blur::gaussian_blur;
pub use border::pad_border;
pub use contrast::stretch_contrast;
pub use kernel::GaussianKernel;
