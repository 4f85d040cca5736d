// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Digit-similarity table.
//
// Digits are grouped by how dense their glyph looks under the brightness ramp
// `7772299408` (darkest to brightest), not by numeric value. Swapping a digit
// for one of its substitutes keeps the rendered picture recognisable.

use crate::error::{DigiprimeError, Result};

/// Digits a prime greater than 10 may end in.
pub const PRIME_LAST_DIGITS: [u8; 4] = [b'1', b'3', b'7', b'9'];

/// Immutable lookup of visually interchangeable digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityTable {
    /// Indexed by digit value; identity for digits that can already end a prime.
    last_fix: [u8; 10],
    /// Indexed by digit value; an empty list marks a dead end.
    substitutes: [Vec<u8>; 10],
}

impl Default for SimilarityTable {
    fn default() -> Self {
        Self {
            last_fix: [
                b'3', // 0
                b'1', // 1
                b'3', // 2
                b'3', // 3
                b'9', // 4
                b'3', // 5
                b'9', // 6
                b'7', // 7
                b'9', // 8
                b'9', // 9
            ],
            substitutes: [
                b"895".to_vec(), // 0
                b"7".to_vec(),   // 1
                b"6".to_vec(),   // 2
                Vec::new(),      // 3
                b"9".to_vec(),   // 4
                b"0".to_vec(),   // 5
                b"2".to_vec(),   // 6
                Vec::new(),      // 7
                b"095".to_vec(), // 8
                b"43".to_vec(),  // 9
            ],
        }
    }
}

impl SimilarityTable {
    /// Build a custom table.
    ///
    /// Both arrays are indexed by digit value and hold ASCII digits. Rejects
    /// tables whose last-digit fixes leave an even or five-ending digit, whose
    /// fixes alter an already valid last digit, or whose substitute lists
    /// contain a non-digit or the digit itself.
    pub fn new(last_fix: [u8; 10], substitutes: [Vec<u8>; 10]) -> Result<Self> {
        for (value, &fixed) in last_fix.iter().enumerate() {
            let digit = b'0' + value as u8;
            if !PRIME_LAST_DIGITS.contains(&fixed) {
                return Err(DigiprimeError::InvalidConfig(format!(
                    "last digit {} maps to {}, which cannot end a prime",
                    digit as char, fixed as char
                )));
            }
            if PRIME_LAST_DIGITS.contains(&digit) && fixed != digit {
                return Err(DigiprimeError::InvalidConfig(format!(
                    "last digit {} already ends a prime and must map to itself",
                    digit as char
                )));
            }
        }

        for (value, list) in substitutes.iter().enumerate() {
            let digit = b'0' + value as u8;
            for &sub in list {
                if !sub.is_ascii_digit() {
                    return Err(DigiprimeError::InvalidConfig(format!(
                        "substitute {:#04x} for {} is not a digit",
                        sub, digit as char
                    )));
                }
                if sub == digit {
                    return Err(DigiprimeError::InvalidConfig(format!(
                        "digit {} lists itself as a substitute",
                        digit as char
                    )));
                }
            }
        }

        Ok(Self {
            last_fix,
            substitutes,
        })
    }

    /// Replace a digit that can never end a prime above 10 with a visually
    /// close one that can. Any other byte is returned unchanged.
    pub fn fix_last_digit(&self, digit: u8) -> u8 {
        if digit.is_ascii_digit() {
            self.last_fix[(digit - b'0') as usize]
        } else {
            digit
        }
    }

    /// Visually similar replacements for `digit`, in table order.
    ///
    /// Empty for dead-end digits (3 and 7 in the default table) and for
    /// non-digit bytes.
    pub fn substitutes_for(&self, digit: u8) -> &[u8] {
        if digit.is_ascii_digit() {
            &self.substitutes[(digit - b'0') as usize]
        } else {
            &[]
        }
    }

    /// Whether `digit` has at least one substitute.
    pub fn is_mutable(&self, digit: u8) -> bool {
        !self.substitutes_for(digit).is_empty()
    }
}
