// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// digiprime-search — the visual-prime search engine.
//
// A Miller-Rabin oracle decides whether the current digit grid reads as a
// probable prime; if not, one interior digit is swapped for a visually similar
// one and the grid is tested again. Progress is reported per candidate as a
// SHA-256 fingerprint of the digits.

pub mod fingerprint;
pub mod primality;
pub mod progress;
pub mod search;

pub use fingerprint::Fingerprint;
pub use primality::{MillerRabin, PrimalityTest, is_probably_prime};
pub use progress::{LineProgress, ProgressSink, SilentProgress};
pub use search::{CancelToken, PerturbationSearch, SearchOutcome, SearchState};
