// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DigiprimeError, Result};

/// Glyph ramp from darkest to brightest. Only digits, so the rendered grid
/// reads as a number; repeated glyphs widen the dark end.
pub const DEFAULT_RAMP: &str = "7772299408";

/// Persistent settings for a Digiprime run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub render: RenderConfig,
}

/// Tuning for the prime search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Miller-Rabin rounds per candidate. False positives are bounded by
    /// 4^-confidence.
    pub confidence: u32,
    /// Index redraws allowed per iteration before giving up on dead-end digits.
    pub max_redraws: u32,
    /// Stop after this many candidates. `None` searches until a prime is found.
    pub max_iterations: Option<u64>,
    /// Fixed RNG seed for reproducible runs. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            confidence: 100,
            max_redraws: 1000,
            max_iterations: None,
            seed: None,
        }
    }
}

/// How an image is turned into digit glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Glyphs per row.
    pub columns: u32,
    /// Glyph width divided by glyph height; terminal cells are about twice
    /// as tall as they are wide.
    pub char_aspect: f32,
    /// Darkest to brightest glyphs.
    pub ramp: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            char_aspect: 0.5,
            ramp: DEFAULT_RAMP.to_owned(),
        }
    }
}

impl AppConfig {
    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        info!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.render.validate()
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.confidence == 0 {
            return Err(DigiprimeError::InvalidConfig(
                "confidence must be at least 1".into(),
            ));
        }
        if self.max_redraws == 0 {
            return Err(DigiprimeError::InvalidConfig(
                "max_redraws must be at least 1".into(),
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(DigiprimeError::InvalidConfig(
                "max_iterations must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(DigiprimeError::InvalidConfig(
                "columns must be at least 1".into(),
            ));
        }
        if !(self.char_aspect.is_finite() && self.char_aspect > 0.0) {
            return Err(DigiprimeError::InvalidConfig(format!(
                "char_aspect must be a positive number, got {}",
                self.char_aspect
            )));
        }
        if self.ramp.is_empty() {
            return Err(DigiprimeError::InvalidConfig("ramp is empty".into()));
        }
        if let Some(bad) = self.ramp.chars().find(|c| !c.is_ascii_digit()) {
            return Err(DigiprimeError::InvalidConfig(format!(
                "ramp may only contain digits, found {bad:?}"
            )));
        }
        Ok(())
    }
}
