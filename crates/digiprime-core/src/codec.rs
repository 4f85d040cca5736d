// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grid codec — flattens word-wrapped glyph output into a digit sequence that
// can be read as an integer, and wraps it back for display.

use tracing::{debug, instrument};

use crate::error::{DigiprimeError, Result};
use crate::similarity::SimilarityTable;
use crate::types::DigitGrid;

/// Row separator in rendered grids.
pub const ROW_SEPARATOR: char = '\n';

/// Replacement for a leading zero; the brightest glyph after `0`.
pub const LEADING_ZERO_REPLACEMENT: u8 = b'8';

/// Remove every row separator from `rendered`.
pub fn strip(rendered: &str) -> String {
    rendered.chars().filter(|&c| c != ROW_SEPARATOR).collect()
}

/// Flatten rendered output into a [`DigitGrid`] ready for searching.
///
/// CRLF line endings are accepted; a lone `'\r'` is still a foreign glyph.
/// The wrap width is the position of the first row separator. The last digit
/// is swapped through [`SimilarityTable::fix_last_digit`] and a leading `0`
/// becomes `8`, so the result always starts non-zero and ends in 1, 3, 7 or 9.
#[instrument(skip_all, fields(rendered_len = rendered.len()))]
pub fn normalize(rendered: &str, table: &SimilarityTable) -> Result<DigitGrid> {
    let unix;
    let rendered = if rendered.contains("\r\n") {
        unix = rendered.replace("\r\n", "\n");
        unix.as_str()
    } else {
        rendered
    };

    let wrap_width = rendered.find(ROW_SEPARATOR).ok_or_else(|| {
        DigiprimeError::MalformedGrid("no row separator; single-row grids cannot be wrapped".into())
    })?;
    if wrap_width == 0 {
        return Err(DigiprimeError::MalformedGrid("first row is empty".into()));
    }

    let mut digits = strip(rendered).into_bytes();
    let last = digits.len().checked_sub(1).ok_or_else(|| {
        DigiprimeError::MalformedGrid("grid contains no digits".into())
    })?;
    digits[last] = table.fix_last_digit(digits[last]);
    if digits[0] == b'0' {
        digits[0] = LEADING_ZERO_REPLACEMENT;
    }

    let grid = DigitGrid::new(digits, wrap_width)?;
    debug!(len = grid.len(), wrap_width, "Grid normalized");
    Ok(grid)
}

/// Insert a row separator after every `wrap_width` digits, including after
/// the final row even when it is short.
pub fn rewrap(digits: &[u8], wrap_width: usize) -> String {
    let width = wrap_width.max(1);
    let mut out = String::with_capacity(digits.len() + digits.len() / width + 1);
    for row in digits.chunks(width) {
        out.extend(row.iter().map(|&b| b as char));
        out.push(ROW_SEPARATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SimilarityTable {
        SimilarityTable::default()
    }

    #[test]
    fn normalize_fixes_leading_zero() {
        let grid = normalize("029\n", &table()).unwrap();
        assert_eq!(grid.to_string(), "829");
        assert_eq!(grid.wrap_width(), 3);
    }

    #[test]
    fn normalize_fixes_last_digit() {
        let grid = normalize("123\n456\n", &table()).unwrap();
        assert_eq!(grid.to_string(), "123459");
        assert_eq!(grid.wrap_width(), 3);
    }

    #[test]
    fn normalize_without_trailing_separator() {
        let grid = normalize("77\n22\n90", &table()).unwrap();
        assert_eq!(grid.to_string(), "772293");
        assert_eq!(grid.wrap_width(), 2);
    }

    #[test]
    fn normalize_rejects_short_grid() {
        let err = normalize("1\n4\n", &table()).unwrap_err();
        assert!(matches!(err, DigiprimeError::MalformedGrid(_)));
    }

    #[test]
    fn normalize_rejects_single_row() {
        let err = normalize("7772299408", &table()).unwrap_err();
        assert!(matches!(err, DigiprimeError::MalformedGrid(_)));
    }

    #[test]
    fn normalize_rejects_empty_first_row() {
        assert!(normalize("\n123\n", &table()).is_err());
    }

    #[test]
    fn normalize_rejects_foreign_glyphs() {
        let err = normalize("12#\n456\n", &table()).unwrap_err();
        assert!(matches!(err, DigiprimeError::MalformedGrid(_)));
    }

    #[test]
    fn normalized_grids_have_prime_shape() {
        for rendered in ["000\n000\n", "024\n568\n", "0\n1\n2\n", "8888\n8885\n"] {
            let grid = normalize(rendered, &table()).unwrap();
            assert_ne!(grid.first(), b'0', "leading digit of {rendered:?}");
            assert!(
                [b'1', b'3', b'7', b'9'].contains(&grid.last()),
                "last digit of {rendered:?}"
            );
        }
    }

    #[test]
    fn normalize_accepts_crlf_rows() {
        let grid = normalize("7772\r\n2994\r\n0877\r\n", &table()).unwrap();
        assert_eq!(grid.to_string(), "777229940877");
        assert_eq!(grid.wrap_width(), 4);
    }

    #[test]
    fn normalize_rejects_lone_carriage_return() {
        let err = normalize("77\r72\n2994\n", &table()).unwrap_err();
        assert!(matches!(err, DigiprimeError::MalformedGrid(_)));
    }

    #[test]
    fn rewrap_round_trips_full_rows() {
        let wrapped = "7772\n2994\n0877\n";
        assert_eq!(rewrap(strip(wrapped).as_bytes(), 4), wrapped);
    }

    #[test]
    fn rewrap_keeps_short_final_row() {
        assert_eq!(rewrap(b"1234567", 3), "123\n456\n7\n");
    }
}
