// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Digiprime — image to prime.
//
// Entry point. Initialises logging, resolves settings, and runs the
// render → normalize → search → display pipeline.

mod cli;
mod pipeline;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use digiprime_core::config::AppConfig;
use digiprime_core::error::{DigiprimeError, Result};
use digiprime_core::human_errors::{HumanError, humanize_error};
use digiprime_search::{LineProgress, ProgressSink, SilentProgress};

use cli::Cli;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the grids and the progress stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.effective_config() {
        Ok(config) => config,
        Err(err) => return fail(&err, None),
    };

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err, config.search.seed),
    }
}

fn fail(err: &DigiprimeError, seed: Option<u64>) -> ExitCode {
    tracing::error!(error = %err, "itp failed");
    let human = humanize_error(err);
    eprintln!("{}", human.message);
    eprintln!("{}", human.suggestion);
    if let Some(hint) = rerun_hint(&human, seed) {
        eprintln!("{hint}");
    }
    ExitCode::FAILURE
}

/// Extra line for retriable failures. A fixed seed replays the same search,
/// so rerunning only helps when the seed is random.
fn rerun_hint(human: &HumanError, seed: Option<u64>) -> Option<&'static str> {
    (human.retriable && seed.is_none()).then_some("Running again may give a different result.")
}

fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    if let Some(path) = &cli.write_config {
        config.save(path)?;
        tracing::info!(path = %path.display(), "Settings written");
        return Ok(());
    }

    let Some(source) = cli.source() else {
        return Err(DigiprimeError::InvalidConfig(
            "no image or grid given".into(),
        ));
    };

    tracing::info!(?source, "itp starting");

    let mut quiet = SilentProgress;
    let mut lines = LineProgress::stdout();
    let progress: &mut dyn ProgressSink = if cli.quiet { &mut quiet } else { &mut lines };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = pipeline::run(&source, config, progress, &mut out)?;
    out.flush()?;

    tracing::info!(
        iterations = outcome.iterations,
        digits = outcome.grid.len(),
        "Prime found"
    );
    Ok(())
}
