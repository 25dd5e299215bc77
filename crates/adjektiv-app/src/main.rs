// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adjektiv — batch runner.
//
// Usage: `adjektiv [config.json]`. Without an argument `adjektiv.json` in the
// working directory is used, and defaults apply when it does not exist. The
// batch report is printed to stdout as JSON.

use std::process::ExitCode;

use adjektiv_core::PipelineConfig;
use adjektiv_core::error::Result;
use adjektiv_core::triage::diagnose;
use adjektiv_picture::BatchProcessor;

const DEFAULT_CONFIG: &str = "adjektiv.json";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    tracing::info!(config = %config_path, "Adjektiv starting");

    match run(&config_path) {
        Ok(true) => ExitCode::SUCCESS,
        // Some pictures were skipped or the run was cut short.
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            let diagnosis = diagnose(&err);
            tracing::error!(error = %err, suggestion = %diagnosis.suggestion, "Batch run failed");
            ExitCode::FAILURE
        }
    }
}

/// Run the batch and print its report. Returns whether every picture made it.
fn run(config_path: &str) -> Result<bool> {
    let config = PipelineConfig::load_or_default(config_path)?;
    let report = BatchProcessor::new(config).run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.is_clean())
}
