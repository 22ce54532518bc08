// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline module — single-image orchestration and multi-pass escalation.

pub mod orchestrator;
pub mod passes;

pub use orchestrator::SlipEnhancer;
pub use passes::MultiPassRunner;
