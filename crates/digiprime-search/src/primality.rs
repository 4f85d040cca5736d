// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Primality oracle — Miller-Rabin over arbitrary-precision integers.
//
// A composite survives one random round with probability at most 1/4, so
// `confidence` rounds bound false positives by 4^-confidence. Primes always
// pass, whatever the confidence.

use digiprime_core::error::{DigiprimeError, Result};
use digiprime_core::types::DigitGrid;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;

/// Primes used for trial division before any random round.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Something that can say whether an integer is (probably) prime.
pub trait PrimalityTest {
    /// Never returns false for a prime.
    fn is_probably_prime<R: Rng + ?Sized>(&self, candidate: &BigUint, rng: &mut R) -> bool;
}

/// Miller-Rabin test with a fixed number of random bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MillerRabin {
    confidence: u32,
}

impl MillerRabin {
    pub fn new(confidence: u32) -> Result<Self> {
        if confidence == 0 {
            return Err(DigiprimeError::InvalidConfig(
                "confidence must be at least 1".into(),
            ));
        }
        Ok(Self { confidence })
    }

    pub fn confidence(&self) -> u32 {
        self.confidence
    }
}

impl PrimalityTest for MillerRabin {
    fn is_probably_prime<R: Rng + ?Sized>(&self, n: &BigUint, rng: &mut R) -> bool {
        let two = BigUint::from(2u32);
        if n < &two {
            return false;
        }
        for p in SMALL_PRIMES {
            if *n == BigUint::from(p) {
                return true;
            }
            if (n % p).is_zero() {
                return false;
            }
        }

        // n is odd and > 97 from here on. Write n - 1 = d * 2^s with d odd.
        let one = BigUint::one();
        let n_minus_one = n - &one;
        let s = n_minus_one.trailing_zeros().unwrap_or(0);
        let d = &n_minus_one >> s;

        'witness: for _ in 0..self.confidence {
            let a = rng.gen_biguint_range(&two, &n_minus_one);
            let mut x = a.modpow(&d, n);
            if x == one || x == n_minus_one {
                continue;
            }
            for _ in 1..s {
                x = x.modpow(&two, n);
                if x == n_minus_one {
                    continue 'witness;
                }
                if x == one {
                    return false;
                }
            }
            return false;
        }
        true
    }
}

/// One-shot Miller-Rabin check with `confidence` rounds.
///
/// A confidence of 0 is treated as 1; at least one random round always runs
/// for candidates past the trial-division range.
pub fn is_probably_prime<R: Rng + ?Sized>(candidate: &BigUint, confidence: u32, rng: &mut R) -> bool {
    MillerRabin {
        confidence: confidence.max(1),
    }
    .is_probably_prime(candidate, rng)
}

/// Read a grid's digits as a base-10 integer.
pub fn parse_candidate(grid: &DigitGrid) -> Result<BigUint> {
    BigUint::parse_bytes(grid.as_bytes(), 10).ok_or_else(|| {
        DigiprimeError::MalformedGrid("digits do not form a base-10 integer".into())
    })
}
