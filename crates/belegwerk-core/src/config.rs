// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::ProcessingPass;

/// Persistent enhancer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancerConfig {
    /// Pass chain applied to incoming slip images, in escalation order.
    pub default_passes: Vec<ProcessingPass>,
    /// Directory for enhanced output files. When unset, outputs are
    /// written next to the source file.
    pub output_dir: Option<PathBuf>,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            default_passes: vec![ProcessingPass::Default],
            output_dir: None,
        }
    }
}

impl EnhancerConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }
}
