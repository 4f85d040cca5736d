// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph renderer — grayscale, resize, and map luma onto a digit ramp.
// Operates on in-memory images using the `image` crate.

use digiprime_core::codec::ROW_SEPARATOR;
use digiprime_core::config::RenderConfig;
use digiprime_core::error::DigiprimeError;
use image::DynamicImage;
use image::imageops::FilterType;
use tracing::{debug, info, instrument};

/// Renders a single in-memory image as rows of digit glyphs.
///
/// ```ignore
/// let text = GlyphRenderer::open("photo.jpg")?.render(&RenderConfig::default())?;
/// ```
pub struct GlyphRenderer {
    /// The source image, untouched until rendering.
    image: DynamicImage,
}

impl GlyphRenderer {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, DigiprimeError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            DigiprimeError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Self::checked(img)
    }

    /// Create a renderer from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, DigiprimeError> {
        let img = image::load_from_memory(data).map_err(|err| {
            DigiprimeError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Self::checked(img)
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, DigiprimeError> {
        Self::checked(image)
    }

    fn checked(image: DynamicImage) -> Result<Self, DigiprimeError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(DigiprimeError::ImageError(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    // -- Accessors ------------------------------------------------------------

    /// Source image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Source image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Glyph columns and rows the image renders to.
    ///
    /// Rows are scaled by `char_aspect` so the picture keeps its proportions
    /// in cells that are taller than they are wide. At least one row.
    pub fn grid_size(&self, config: &RenderConfig) -> (u32, u32) {
        let columns = config.columns.max(1);
        let scale = columns as f32 / self.image.width() as f32;
        let rows = (self.image.height() as f32 * scale * config.char_aspect).round();
        (columns, rows.max(1.0) as u32)
    }

    // -- Output ---------------------------------------------------------------

    /// Render the image as digit rows separated by `'\n'`.
    ///
    /// There is no separator after the last row, so a one-row rendering holds
    /// no separator at all.
    #[instrument(skip_all, fields(columns = config.columns))]
    pub fn render(&self, config: &RenderConfig) -> Result<String, DigiprimeError> {
        config.validate()?;
        let (columns, rows) = self.grid_size(config);
        let ramp = config.ramp.as_bytes();

        let luma = self
            .image
            .resize_exact(columns, rows, FilterType::Triangle)
            .to_luma8();

        let mut out = String::with_capacity(text_capacity(columns, rows));
        for (y, row) in luma.rows().enumerate() {
            if y > 0 {
                out.push(ROW_SEPARATOR);
            }
            out.extend(row.map(|px| glyph_for(px.0[0], ramp) as char));
        }

        info!(columns, rows, "Image rendered to glyphs");
        Ok(out)
    }
}

/// Bytes needed for `rows` rows of `columns` glyphs plus separators.
fn text_capacity(columns: u32, rows: u32) -> usize {
    (columns as usize + 1).saturating_mul(rows as usize)
}

/// Glyph for a luma value on a darkest-to-brightest ramp.
///
/// The 0..=255 range is split into `ramp.len()` equal bands.
pub fn glyph_for(luma: u8, ramp: &[u8]) -> u8 {
    ramp[luma as usize * ramp.len() / 256]
}
