// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Belegwerk slip enhancer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for one enhancement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnhanceJobId(pub Uuid);

impl EnhanceJobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EnhanceJobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EnhanceJobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named parameter profile applied as one step of an escalation chain.
///
/// Passes are an escalating retry chain, not independent alternatives:
/// each one consumes the previous pass's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingPass {
    /// First attempt, tuned for phone-photographed slips.
    Default,
    /// Wider threshold window and stronger smoothing for noisy, unevenly
    /// lit photos that the default profile could not clean up.
    Fallback,
    /// Tuned for tablet-camera captures (sharper optics, harsher shadows).
    Tablet,
}

impl ProcessingPass {
    /// Short lowercase label used in log fields and output file names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fallback => "fallback",
            Self::Tablet => "tablet",
        }
    }
}

impl std::fmt::Display for ProcessingPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tuning parameters for one enhancement pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Sigma of the noise-reduction Gaussian blur.
    pub gaussian_sigma: f64,
    /// Full width of the adaptive-threshold window, in pixels.
    pub binarization_window: u32,
    /// Threshold sensitivity in [0, 1]; larger values push more pixels to white.
    pub binarization_k: f64,
    /// Restore mid-tone pixels after binarization.
    pub preserve_grays: bool,
    /// White margin added around the slip before processing.
    pub border_px: u32,
}

impl ProcessingSettings {
    /// Baseline profile for a named pass.
    ///
    /// The mapping is exhaustive on purpose: adding a pass without a
    /// profile must fail to compile, not fall through to a default.
    pub fn preset(pass: ProcessingPass) -> Self {
        match pass {
            ProcessingPass::Default => Self {
                gaussian_sigma: 0.5,
                binarization_window: 15,
                binarization_k: 0.20,
                preserve_grays: true,
                border_px: 20,
            },
            ProcessingPass::Fallback => Self {
                gaussian_sigma: 0.8,
                binarization_window: 30,
                binarization_k: 0.15,
                preserve_grays: false,
                border_px: 30,
            },
            ProcessingPass::Tablet => Self {
                gaussian_sigma: 0.7,
                binarization_window: 20,
                binarization_k: 0.30,
                preserve_grays: false,
                border_px: 30,
            },
        }
    }
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self::preset(ProcessingPass::Default)
    }
}

/// Result of one pass in an escalation chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassOutcome {
    pub pass: ProcessingPass,
    /// Output file the pass wrote (or attempted to write).
    pub output: PathBuf,
    pub succeeded: bool,
    /// Error text when the pass failed.
    pub error: Option<String>,
}

/// Audit record of one multi-pass enhancement run.
///
/// Serializable so the surrounding platform can attach it to the slip's
/// processing log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceReport {
    pub job_id: EnhanceJobId,
    pub source: PathBuf,
    /// SHA-256 hex digest of the source file bytes.
    pub source_hash: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per attempted pass, in execution order.
    pub passes: Vec<PassOutcome>,
    /// Path the caller should hand to OCR. Equals `source` when no pass
    /// produced an output.
    pub final_output: PathBuf,
}
