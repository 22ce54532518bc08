// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Belegwerk.

use thiserror::Error;

/// Top-level error type for all Belegwerk operations.
#[derive(Debug, Error)]
pub enum BelegwerkError {
    // -- Raster errors --
    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("image encode failed: {0}")]
    Encode(String),

    #[error("invalid raster geometry: {0}")]
    Geometry(String),

    // -- Stage errors --
    #[error("invalid processing settings: {0}")]
    InvalidSettings(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BelegwerkError>;
