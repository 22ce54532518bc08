// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Multi-pass escalation controller. Runs the pipeline across named
// parameter profiles in order, chaining each pass's output into the next
// and halting the chain on the first failure.

use std::path::{Path, PathBuf};

use belegwerk_core::config::EnhancerConfig;
use belegwerk_core::types::{
    EnhanceJobId, EnhanceReport, PassOutcome, ProcessingPass, ProcessingSettings,
};
use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use crate::pipeline::orchestrator::SlipEnhancer;

/// Runs an ordered chain of processing passes over one slip image.
///
/// Passes are an escalating retry chain: each pass consumes the previous
/// pass's output, and a failed pass stops the chain; later passes are
/// not attempted. The last successfully produced file (or the original,
/// when the first pass already fails) is the final output.
///
/// Intermediate files are left on disk for the caller to inspect or
/// clean up.
#[derive(Debug, Clone, Default)]
pub struct MultiPassRunner {
    output_dir: Option<PathBuf>,
}

impl MultiPassRunner {
    /// Runner writing outputs next to the source file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner writing outputs into `dir` instead.
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
        }
    }

    /// Runner configured from persistent settings.
    pub fn from_config(config: &EnhancerConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
        }
    }

    /// Run the pass chain and report every outcome.
    ///
    /// An empty chain is the identity: the report's final output is the
    /// source path and no file is written.
    #[instrument(skip(self, passes), fields(source = %source.display(), pass_count = passes.len()))]
    pub fn run(&self, source: &Path, passes: &[ProcessingPass]) -> EnhanceReport {
        let job_id = EnhanceJobId::new();
        let started_at = Utc::now();
        let source_hash = fingerprint(source);

        let mut outcomes = Vec::with_capacity(passes.len());
        let mut current = source.to_path_buf();

        for (index, &pass) in passes.iter().enumerate() {
            let enhancer = SlipEnhancer::new(ProcessingSettings::preset(pass));
            let dest = self.output_path(source, job_id, index, pass);
            info!(%pass, step = index + 1, dest = %dest.display(), "Running enhancement pass");

            match enhancer.try_enhance(&current, &dest) {
                Ok(output) => {
                    outcomes.push(PassOutcome {
                        pass,
                        output: output.clone(),
                        succeeded: true,
                        error: None,
                    });
                    current = output;
                }
                Err(err) => {
                    warn!(%pass, error = %err, "Pass failed; halting escalation");
                    outcomes.push(PassOutcome {
                        pass,
                        output: dest,
                        succeeded: false,
                        error: Some(err.to_string()),
                    });
                    break;
                }
            }
        }

        info!(final_output = %current.display(), "Pass chain finished");
        EnhanceReport {
            job_id,
            source: source.to_path_buf(),
            source_hash,
            started_at,
            finished_at: Utc::now(),
            passes: outcomes,
            final_output: current,
        }
    }

    /// `<stem>-<job>-p<step>-<pass>.png`, in the configured output
    /// directory or next to the source. The job id keeps concurrent runs
    /// over the same slip from colliding.
    fn output_path(
        &self,
        source: &Path,
        job_id: EnhanceJobId,
        index: usize,
        pass: ProcessingPass,
    ) -> PathBuf {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        let stem = source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("slip");
        dir.join(format!(
            "{}-{}-p{}-{}.png",
            stem,
            job_id,
            index + 1,
            pass.label()
        ))
    }
}

/// SHA-256 hex digest of the source bytes, for the audit report.
fn fingerprint(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => {
            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            hex::encode(hasher.finalize())
        }
        Err(err) => {
            warn!(source = %path.display(), error = %err, "Could not fingerprint source");
            "unavailable".into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn write_slip_fixture(path: &Path, width: u32, height: u32) {
        // Light gray field with a dark text-like bar.
        let mut img = RgbImage::from_pixel(width, height, Rgb([220, 220, 220]));
        for y in height / 3..height / 3 + 4 {
            for x in 5..width - 5 {
                img.put_pixel(x, y, Rgb([30, 30, 30]));
            }
        }
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    /// Identity law: no passes, no output files, final output == source.
    #[test]
    fn empty_pass_chain_is_identity() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("slip.png");
        write_slip_fixture(&source, 40, 40);

        let report = MultiPassRunner::new().run(&source, &[]);
        assert_eq!(report.final_output, source);
        assert!(report.passes.is_empty());
        // Nothing new in the directory besides the fixture.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    /// Two chained passes: the second consumes the first pass's output,
    /// so both borders accumulate in the final dimensions.
    #[test]
    fn passes_chain_outputs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("slip.png");
        write_slip_fixture(&source, 100, 100);

        let report = MultiPassRunner::new().run(
            &source,
            &[ProcessingPass::Default, ProcessingPass::Fallback],
        );

        assert_eq!(report.passes.len(), 2);
        assert!(report.passes.iter().all(|outcome| outcome.succeeded));
        assert_ne!(report.final_output, source);
        assert_eq!(report.final_output, report.passes[1].output);

        // 100 + 2*20 after the default pass, + 2*30 after the fallback pass.
        let final_img = image::open(&report.final_output).unwrap();
        assert_eq!(final_img.width(), 200);
        assert_eq!(final_img.height(), 200);

        // The intermediate file from pass 1 is still on disk.
        assert!(report.passes[0].output.exists());
        let mid = image::open(&report.passes[0].output).unwrap();
        assert_eq!(mid.width(), 140);
    }

    /// A failing first pass halts the chain and the original is returned.
    #[test]
    fn first_pass_failure_returns_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.png");
        std::fs::write(&source, b"not an image").unwrap();

        let report = MultiPassRunner::new().run(
            &source,
            &[ProcessingPass::Default, ProcessingPass::Fallback],
        );

        // Only the first pass was attempted.
        assert_eq!(report.passes.len(), 1);
        assert!(!report.passes[0].succeeded);
        assert!(report.passes[0].error.is_some());
        assert_eq!(report.final_output, source);
    }

    /// The report fingerprint matches the source bytes.
    #[test]
    fn report_fingerprints_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("slip.png");
        write_slip_fixture(&source, 32, 32);

        let report = MultiPassRunner::new().run(&source, &[ProcessingPass::Tablet]);

        let mut hasher = Sha256::new();
        hasher.update(std::fs::read(&source).unwrap());
        assert_eq!(report.source_hash, hex::encode(hasher.finalize()));
        assert!(report.finished_at >= report.started_at);
    }

    /// Outputs land in the configured directory when one is set.
    #[test]
    fn configured_output_dir_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("enhanced");
        std::fs::create_dir(&out_dir).unwrap();
        let source = dir.path().join("slip.png");
        write_slip_fixture(&source, 30, 30);

        let config = EnhancerConfig {
            default_passes: vec![ProcessingPass::Default],
            output_dir: Some(out_dir.clone()),
        };
        let report = MultiPassRunner::from_config(&config).run(&source, &config.default_passes);

        assert!(report.final_output.starts_with(&out_dir));
        assert!(report.final_output.exists());
        let name = report.final_output.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("slip-"));
        assert!(name.ends_with("-p1-default.png"));
    }
}
