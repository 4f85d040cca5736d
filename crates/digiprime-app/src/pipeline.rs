// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end run: render (or read) the grid, show it, search, show the prime.

use std::io::Write;

use digiprime_core::codec::normalize;
use digiprime_core::error::Result;
use digiprime_core::{AppConfig, SimilarityTable};
use digiprime_render::GlyphRenderer;
use digiprime_search::{PerturbationSearch, ProgressSink, SearchOutcome};
use tracing::info;

use crate::cli::Source;

/// Produce the wrapped digit text for `source`.
pub fn load_grid_text(source: &Source, config: &AppConfig) -> Result<String> {
    match source {
        Source::Image(path) => GlyphRenderer::open(path)?.render(&config.render),
        Source::Grid(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// Run the whole pipeline, writing the preview, the wrapped prime and the
/// raw prime to `out`. Progress lines go to `progress`.
pub fn run(
    source: &Source,
    config: &AppConfig,
    progress: &mut dyn ProgressSink,
    out: &mut dyn Write,
) -> Result<SearchOutcome> {
    let rendered = load_grid_text(source, config)?;
    writeln!(out, "{rendered}")?;
    out.flush()?;

    let table = SimilarityTable::default();
    let grid = normalize(&rendered, &table)?;
    info!(digits = grid.len(), wrap_width = grid.wrap_width(), "Grid ready");

    let mut search = PerturbationSearch::from_config(&config.search, table)?;
    let outcome = search.run(grid, progress)?;

    writeln!(out, "{}", outcome.grid.rewrap())?;
    writeln!(out, "{}", outcome.grid)?;
    Ok(outcome)
}
