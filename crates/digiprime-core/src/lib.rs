// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Digiprime — Core types, error definitions, the digit-similarity table and
// the grid codec shared across all crates.

pub mod codec;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod similarity;
pub mod types;

pub use config::{AppConfig, RenderConfig, SearchConfig};
pub use error::DigiprimeError;
pub use similarity::SimilarityTable;
pub use types::*;
