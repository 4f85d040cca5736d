// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// digiprime-render — turns an image into a word-wrapped grid of digit glyphs.
//
// The image is converted to grayscale, resized to the requested number of
// columns (correcting for tall terminal cells), and every pixel's luma is
// mapped onto a darkest-to-brightest ramp made only of digits.

pub mod glyph;

pub use glyph::renderer::GlyphRenderer;
