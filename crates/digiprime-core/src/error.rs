// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Digiprime.

use thiserror::Error;

/// Top-level error type for all Digiprime operations.
#[derive(Debug, Error)]
pub enum DigiprimeError {
    // -- Grid errors --
    #[error("malformed digit grid: {0}")]
    MalformedGrid(String),

    #[error("invalid grid mutation: {0}")]
    InvalidMutation(String),

    // -- Search errors --
    #[error(
        "no substitutable interior digit found after {attempts} redraws (iteration {iteration})"
    )]
    ExhaustedSubstitution { iteration: u64, attempts: u32 },

    #[error("no prime found within {limit} iterations")]
    IterationLimit { limit: u64 },

    #[error("search cancelled at iteration {iteration}")]
    Cancelled { iteration: u64 },

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Rendering --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DigiprimeError>;
