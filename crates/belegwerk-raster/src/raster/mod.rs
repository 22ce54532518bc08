// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — the in-memory pixel buffer every stage operates on.

pub mod buffer;

pub use buffer::RasterBuffer;
