// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Candidate fingerprints — SHA-256 of the digit sequence, for progress output.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest of a digit sequence.
///
/// Lets a user watch the search move through candidates without printing
/// thousands of digits per line. Carries no weight in the search itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint the ASCII digits in `digits`.
    pub fn of(digits: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(digits);
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
