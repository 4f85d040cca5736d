// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perturbation search — random local walk over visually similar digit grids
// until one reads as a probable prime.
//
// Each iteration tests the current grid; a composite grid has one random
// interior digit swapped for a visually similar one. The first and last
// digits are never touched, so the leading-digit and last-digit fixes made by
// the codec hold for the whole search.
//
// Interior digits with no substitute (3 and 7 in the default table) are
// redrawn, up to `max_redraws` times per iteration. Redraws do not advance the
// iteration counter. Without an iteration cap the walk is unbounded: a grid
// with no reachable prime never finishes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use digiprime_core::config::SearchConfig;
use digiprime_core::error::{DigiprimeError, Result};
use digiprime_core::similarity::SimilarityTable;
use digiprime_core::types::DigitGrid;
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, trace, warn};

use crate::fingerprint::Fingerprint;
use crate::primality::{MillerRabin, PrimalityTest, parse_candidate};
use crate::progress::ProgressSink;

/// Default bound on index redraws per iteration.
pub const DEFAULT_MAX_REDRAWS: u32 = 1000;

/// Shared flag for stopping a running search from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Where the search stands after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Searching,
    Found,
}

/// A finished search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The probable-prime grid, same length and wrap width as the input.
    pub grid: DigitGrid,
    /// The grid read as an integer.
    pub prime: BigUint,
    /// Candidates tested, including the accepted one.
    pub iterations: u64,
    pub fingerprint: Fingerprint,
}

/// Randomized local search for a prime that looks like the input grid.
pub struct PerturbationSearch<T: PrimalityTest = MillerRabin> {
    table: SimilarityTable,
    oracle: T,
    rng: StdRng,
    max_redraws: u32,
    max_iterations: Option<u64>,
    cancel: CancelToken,
}

impl PerturbationSearch<MillerRabin> {
    /// Build a Miller-Rabin search from configuration.
    ///
    /// A configured seed makes the search reproducible; otherwise the RNG is
    /// seeded from OS entropy.
    pub fn from_config(config: &SearchConfig, table: SimilarityTable) -> Result<Self> {
        config.validate()?;
        let oracle = MillerRabin::new(config.confidence)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::new(table, oracle, rng)
            .with_max_redraws(config.max_redraws)
            .with_max_iterations(config.max_iterations))
    }
}

impl<T: PrimalityTest> PerturbationSearch<T> {
    pub fn new(table: SimilarityTable, oracle: T, rng: StdRng) -> Self {
        Self {
            table,
            oracle,
            rng,
            max_redraws: DEFAULT_MAX_REDRAWS,
            max_iterations: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_max_redraws(mut self, max_redraws: u32) -> Self {
        self.max_redraws = max_redraws.max(1);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<u64>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle for cancelling this search from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Search until the grid reads as a probable prime.
    ///
    /// Fails with `Cancelled` once the cancel token is set, `IterationLimit`
    /// when the configured cap is reached, and `ExhaustedSubstitution` when no
    /// mutable interior digit turns up within the redraw bound.
    #[instrument(skip_all, fields(len = grid.len(), wrap_width = grid.wrap_width()))]
    pub fn run(
        &mut self,
        mut grid: DigitGrid,
        progress: &mut dyn ProgressSink,
    ) -> Result<SearchOutcome> {
        info!(max_iterations = ?self.max_iterations, "Starting prime search");

        let mut iteration: u64 = 0;
        loop {
            if self.cancel.is_cancelled() {
                warn!(iteration, "Search cancelled");
                return Err(DigiprimeError::Cancelled { iteration });
            }
            if let Some(limit) = self.max_iterations {
                if iteration >= limit {
                    warn!(limit, "Iteration limit reached");
                    return Err(DigiprimeError::IterationLimit { limit });
                }
            }

            let (state, prime) = self.step(&mut grid, iteration, progress)?;
            iteration += 1;

            if let (SearchState::Found, Some(prime)) = (state, prime) {
                let fingerprint = Fingerprint::of(grid.as_bytes());
                info!(iterations = iteration, %fingerprint, "Probable prime found");
                return Ok(SearchOutcome {
                    grid,
                    prime,
                    iterations: iteration,
                    fingerprint,
                });
            }
        }
    }

    /// Test the current grid once and mutate it if it is composite.
    ///
    /// Returns the parsed prime alongside `Found`.
    fn step(
        &mut self,
        grid: &mut DigitGrid,
        iteration: u64,
        progress: &mut dyn ProgressSink,
    ) -> Result<(SearchState, Option<BigUint>)> {
        let candidate = parse_candidate(grid)?;
        progress.report(iteration, &Fingerprint::of(grid.as_bytes()));

        if self.oracle.is_probably_prime(&candidate, &mut self.rng) {
            return Ok((SearchState::Found, Some(candidate)));
        }

        self.perturb(grid, iteration)?;
        Ok((SearchState::Searching, None))
    }

    /// Swap one random interior digit for a visually similar one.
    fn perturb(&mut self, grid: &mut DigitGrid, iteration: u64) -> Result<()> {
        let len = grid.len();
        for attempt in 0..self.max_redraws {
            let index = self.rng.gen_range(1..len - 1);
            let digit = grid.as_bytes()[index];
            if let Some(&replacement) = self.table.substitutes_for(digit).choose(&mut self.rng) {
                grid.replace_interior(index, replacement)?;
                trace!(
                    index,
                    from = %(digit as char),
                    to = %(replacement as char),
                    redraws = attempt,
                    "Digit replaced"
                );
                return Ok(());
            }
        }

        debug!(iteration, attempts = self.max_redraws, "Redraw bound hit");
        Err(DigiprimeError::ExhaustedSubstitution {
            iteration,
            attempts: self.max_redraws,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use digiprime_core::codec::normalize;

    use super::*;
    use crate::progress::SilentProgress;

    fn seeded(seed: u64) -> PerturbationSearch {
        PerturbationSearch::new(
            SimilarityTable::default(),
            MillerRabin::new(30).unwrap(),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Rejects everything and remembers what it was shown.
    #[derive(Default)]
    struct NeverPrime {
        seen: RefCell<Vec<String>>,
    }

    impl PrimalityTest for NeverPrime {
        fn is_probably_prime<R: Rng + ?Sized>(&self, candidate: &BigUint, _: &mut R) -> bool {
            self.seen.borrow_mut().push(candidate.to_str_radix(10));
            false
        }
    }

    /// Accepts the n-th candidate it is asked about.
    struct PrimeOnCall {
        calls: Cell<u32>,
        accept_at: u32,
    }

    impl PrimalityTest for PrimeOnCall {
        fn is_probably_prime<R: Rng + ?Sized>(&self, _: &BigUint, _: &mut R) -> bool {
            let n = self.calls.get();
            self.calls.set(n + 1);
            n == self.accept_at
        }
    }

    #[test]
    fn already_prime_grid_is_returned_unchanged() {
        let grid = normalize("029\n", &SimilarityTable::default()).unwrap();
        assert_eq!(grid.to_string(), "829");

        let outcome = seeded(1).run(grid.clone(), &mut SilentProgress).unwrap();
        assert_eq!(outcome.grid, grid);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.prime, BigUint::from(829u32));
    }

    #[test]
    fn found_grid_keeps_shape_and_is_prime() {
        let rendered = "77722994\n08777229\n94087772\n29940877\n";
        let grid = normalize(rendered, &SimilarityTable::default()).unwrap();
        let first = grid.first();
        let last = grid.last();

        let outcome = seeded(42).run(grid.clone(), &mut SilentProgress).unwrap();

        assert_eq!(outcome.grid.len(), grid.len());
        assert_eq!(outcome.grid.wrap_width(), 8);
        assert_eq!(outcome.grid.first(), first);
        assert_eq!(outcome.grid.last(), last);
        assert_eq!(outcome.prime.to_str_radix(10), outcome.grid.to_string());

        let mut rng = StdRng::seed_from_u64(99);
        let check = MillerRabin::new(50).unwrap();
        assert!(check.is_probably_prime(&outcome.prime, &mut rng));
    }

    #[test]
    fn same_seed_same_result() {
        let grid = normalize("29402\n66028\n94026\n62291\n", &SimilarityTable::default()).unwrap();
        let a = seeded(7).run(grid.clone(), &mut SilentProgress).unwrap();
        let b = seeded(7).run(grid, &mut SilentProgress).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn edges_are_never_mutated() {
        // 2 and 6 swap with each other, so the walk never runs out of moves.
        let grid = DigitGrid::new(b"82626262626262626269".to_vec(), 5).unwrap();
        let oracle = NeverPrime::default();
        let mut search = PerturbationSearch::new(
            SimilarityTable::default(),
            oracle,
            StdRng::seed_from_u64(5),
        )
        .with_max_iterations(Some(300));

        let err = search.run(grid, &mut SilentProgress).unwrap_err();
        assert!(matches!(err, DigiprimeError::IterationLimit { limit: 300 }));

        let seen = search.oracle.seen.borrow();
        assert_eq!(seen.len(), 300);
        for candidate in seen.iter() {
            assert_eq!(candidate.len(), 20);
            assert!(candidate.starts_with('8'));
            assert!(candidate.ends_with('9'));
        }
        // The walk did move.
        assert!(seen.iter().any(|c| c != &seen[0]));
    }

    #[test]
    fn dead_end_grid_exhausts_redraws() {
        // Interior digits are all 3s and 7s, which have no substitutes.
        let grid = DigitGrid::new(b"3337739".to_vec(), 7).unwrap();
        let mut search = PerturbationSearch::new(
            SimilarityTable::default(),
            NeverPrime::default(),
            StdRng::seed_from_u64(11),
        )
        .with_max_redraws(50);

        let err = search.run(grid, &mut SilentProgress).unwrap_err();
        assert!(matches!(
            err,
            DigiprimeError::ExhaustedSubstitution {
                iteration: 0,
                attempts: 50
            }
        ));
    }

    #[test]
    fn redraws_do_not_advance_the_counter() {
        // One mutable interior digit among many dead ends forces redraws. A 2
        // only ever swaps with 6, so it never turns into a dead end itself.
        let mut digits = b"1373737373737373731".to_vec();
        digits[9] = b'2';
        let grid = DigitGrid::new(digits, 19).unwrap();
        let oracle = PrimeOnCall {
            calls: Cell::new(0),
            accept_at: 4,
        };
        let mut search =
            PerturbationSearch::new(SimilarityTable::default(), oracle, StdRng::seed_from_u64(3));

        let mut reported = Vec::new();
        let mut sink = |i: u64, _: &Fingerprint| reported.push(i);
        let outcome = search.run(grid, &mut sink).unwrap();

        assert_eq!(outcome.iterations, 5);
        assert_eq!(reported, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cancelled_search_stops() {
        let grid = DigitGrid::new(b"800000009".to_vec(), 3).unwrap();
        let mut search = seeded(1);
        search.cancel_token().cancel();
        let err = search.run(grid, &mut SilentProgress).unwrap_err();
        assert!(matches!(err, DigiprimeError::Cancelled { iteration: 0 }));
    }

    #[test]
    fn cancel_token_from_another_thread() {
        let token = CancelToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }

    #[test]
    fn from_config_rejects_zero_confidence() {
        let config = SearchConfig {
            confidence: 0,
            ..Default::default()
        };
        assert!(PerturbationSearch::from_config(&config, SimilarityTable::default()).is_err());
    }

    #[test]
    fn from_config_applies_iteration_cap() {
        let config = SearchConfig {
            max_iterations: Some(1),
            seed: Some(9),
            ..Default::default()
        };
        let mut search =
            PerturbationSearch::from_config(&config, SimilarityTable::default()).unwrap();
        // 100000001 = 17 * 5882353
        let grid = DigitGrid::new(b"100000001".to_vec(), 3).unwrap();
        let err = search.run(grid, &mut SilentProgress).unwrap_err();
        assert!(matches!(err, DigiprimeError::IterationLimit { limit: 1 }));
    }
}
