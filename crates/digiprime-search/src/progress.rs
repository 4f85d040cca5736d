// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Progress reporting for the prime search. Purely observational.

use std::io::{self, Write};

use tracing::{trace, warn};

use crate::fingerprint::Fingerprint;

/// Receives one report per tested candidate.
pub trait ProgressSink {
    fn report(&mut self, iteration: u64, fingerprint: &Fingerprint);
}

impl<F> ProgressSink for F
where
    F: FnMut(u64, &Fingerprint),
{
    fn report(&mut self, iteration: u64, fingerprint: &Fingerprint) {
        self(iteration, fingerprint)
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&mut self, iteration: u64, fingerprint: &Fingerprint) {
        trace!(iteration, %fingerprint, "candidate");
    }
}

/// Writes `prime <iteration>: <fingerprint>` lines to a writer.
pub struct LineProgress<W: Write> {
    out: W,
    failed: bool,
}

impl LineProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for LineProgress<W> {
    fn report(&mut self, iteration: u64, fingerprint: &Fingerprint) {
        if self.failed {
            return;
        }
        // A closed pipe must not stop the search; warn once and go quiet.
        if let Err(err) = writeln!(self.out, "prime {iteration:5}: {fingerprint}") {
            warn!(error = %err, "progress output failed; further progress lines suppressed");
            self.failed = true;
        }
    }
}
