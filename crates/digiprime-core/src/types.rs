// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Digiprime.

use std::fmt::{self, Write as _};

use crate::codec;
use crate::error::{DigiprimeError, Result};

/// Smallest digit grid the search can work on: one leading digit, one
/// interior digit to mutate, one trailing digit.
pub const MIN_GRID_LEN: usize = 3;

/// Whether `byte` is an ASCII decimal digit.
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// A flattened digit grid plus the width it was wrapped at.
///
/// Digits are stored as ASCII bytes (`b'0'..=b'9'`). The leading and trailing
/// digits are fixed once the grid exists; only interior positions can be
/// rewritten through [`DigitGrid::replace_interior`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitGrid {
    digits: Vec<u8>,
    wrap_width: usize,
}

impl DigitGrid {
    /// Build a grid from ASCII digits and a wrap width.
    ///
    /// Fails with `MalformedGrid` when fewer than [`MIN_GRID_LEN`] digits are
    /// given, when any byte is not an ASCII digit, or when `wrap_width` is 0.
    pub fn new(digits: Vec<u8>, wrap_width: usize) -> Result<Self> {
        if digits.len() < MIN_GRID_LEN {
            return Err(DigiprimeError::MalformedGrid(format!(
                "need at least {MIN_GRID_LEN} digits, got {}",
                digits.len()
            )));
        }
        if let Some(pos) = digits.iter().position(|&b| !is_digit(b)) {
            return Err(DigiprimeError::MalformedGrid(format!(
                "non-digit byte {:#04x} at position {pos}",
                digits[pos]
            )));
        }
        if wrap_width == 0 {
            return Err(DigiprimeError::MalformedGrid(
                "wrap width must be positive".into(),
            ));
        }
        Ok(Self { digits, wrap_width })
    }

    /// Number of digits in the grid.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false; a grid holds at least [`MIN_GRID_LEN`] digits.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Characters per display row.
    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// The digits as ASCII bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.digits
    }

    pub fn first(&self) -> u8 {
        self.digits[0]
    }

    pub fn last(&self) -> u8 {
        self.digits[self.digits.len() - 1]
    }

    /// Whether `index` lies strictly between the first and last position.
    pub fn is_interior(&self, index: usize) -> bool {
        index > 0 && index + 1 < self.digits.len()
    }

    /// Overwrite the interior digit at `index` with `digit`.
    pub fn replace_interior(&mut self, index: usize, digit: u8) -> Result<()> {
        if !self.is_interior(index) {
            return Err(DigiprimeError::InvalidMutation(format!(
                "position {index} is not interior to a grid of {} digits",
                self.digits.len()
            )));
        }
        if !is_digit(digit) {
            return Err(DigiprimeError::InvalidMutation(format!(
                "{:#04x} is not an ASCII digit",
                digit
            )));
        }
        self.digits[index] = digit;
        Ok(())
    }

    /// Re-insert row separators at the grid's wrap width.
    pub fn rewrap(&self) -> String {
        codec::rewrap(&self.digits, self.wrap_width)
    }
}

impl fmt::Display for DigitGrid {
    /// Writes the raw decimal integer with no wrapping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.digits {
            f.write_char(d as char)?;
        }
        Ok(())
    }
}
