// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and how they override the config file.

use std::path::PathBuf;

use clap::Parser;
use digiprime_core::error::Result;
use digiprime_core::AppConfig;
use tracing::debug;

/// Turn a picture into a prime number that still looks like the picture.
#[derive(Debug, Parser)]
#[command(name = "itp", version, about)]
pub struct Cli {
    /// Image to render as digits.
    #[arg(
        value_name = "IMAGE",
        required_unless_present_any = ["grid", "write_config"],
        conflicts_with = "grid"
    )]
    pub image: Option<PathBuf>,

    /// Read an already rendered digit grid instead of an image.
    #[arg(long, value_name = "FILE")]
    pub grid: Option<PathBuf>,

    /// JSON settings file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Digits per row.
    #[arg(long)]
    pub columns: Option<u32>,

    /// Miller-Rabin rounds per candidate.
    #[arg(long)]
    pub confidence: Option<u32>,

    /// RNG seed for a reproducible search.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up after this many candidates.
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Index redraws allowed per candidate when digits cannot be swapped.
    #[arg(long)]
    pub max_redraws: Option<u32>,

    /// Don't print a progress line per candidate.
    #[arg(short, long)]
    pub quiet: bool,

    /// Write the effective settings to FILE and exit.
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,
}

/// Where the digit grid comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Image(PathBuf),
    Grid(PathBuf),
}

impl Cli {
    pub fn source(&self) -> Option<Source> {
        match (&self.image, &self.grid) {
            (Some(path), _) => Some(Source::Image(path.clone())),
            (None, Some(path)) => Some(Source::Grid(path.clone())),
            (None, None) => None,
        }
    }

    /// Load the config file (or defaults), apply flag overrides, validate.
    pub fn effective_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.render.columns = columns;
        }
        if let Some(confidence) = self.confidence {
            config.search.confidence = confidence;
        }
        if let Some(seed) = self.seed {
            config.search.seed = Some(seed);
        }
        if let Some(max_iterations) = self.max_iterations {
            config.search.max_iterations = Some(max_iterations);
        }
        if let Some(max_redraws) = self.max_redraws {
            config.search.max_redraws = max_redraws;
        }

        config.validate()?;
        debug!(?config, "Effective config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digiprime_core::DigiprimeError;

    #[test]
    fn image_argument() {
        let cli = Cli::try_parse_from(["itp", "cat.png"]).unwrap();
        assert_eq!(cli.source(), Some(Source::Image("cat.png".into())));
        assert!(!cli.quiet);
    }

    #[test]
    fn grid_flag() {
        let cli = Cli::try_parse_from(["itp", "--grid", "cat.txt", "-q"]).unwrap();
        assert_eq!(cli.source(), Some(Source::Grid("cat.txt".into())));
        assert!(cli.quiet);
    }

    #[test]
    fn input_required() {
        assert!(Cli::try_parse_from(["itp"]).is_err());
    }

    #[test]
    fn image_and_grid_conflict() {
        assert!(Cli::try_parse_from(["itp", "cat.png", "--grid", "cat.txt"]).is_err());
    }

    #[test]
    fn write_config_needs_no_input() {
        let cli = Cli::try_parse_from(["itp", "--write-config", "out.json"]).unwrap();
        assert_eq!(cli.source(), None);
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "search": { "confidence": 40, "seed": 1 }, "render": { "columns": 120 } }"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "itp",
            "cat.png",
            "--config",
            path.to_str().unwrap(),
            "--seed",
            "99",
            "--max-iterations",
            "500",
        ])
        .unwrap();
        let config = cli.effective_config().unwrap();

        assert_eq!(config.search.confidence, 40);
        assert_eq!(config.search.seed, Some(99));
        assert_eq!(config.search.max_iterations, Some(500));
        assert_eq!(config.render.columns, 120);
    }

    #[test]
    fn invalid_override_rejected() {
        let cli = Cli::try_parse_from(["itp", "cat.png", "--confidence", "0"]).unwrap();
        assert!(matches!(
            cli.effective_config(),
            Err(DigiprimeError::InvalidConfig(_))
        ));
    }
}
