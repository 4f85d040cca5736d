// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every technical error is mapped to plain English with a clear suggestion,
// plus whether simply running again (with a fresh random seed) might help.

use crate::error::DigiprimeError;

/// A human-readable error with a plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (first line of output).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether rerunning without a fixed seed could succeed.
    pub retriable: bool,
}

/// Convert a `DigiprimeError` into a `HumanError`.
pub fn humanize_error(err: &DigiprimeError) -> HumanError {
    match err {
        DigiprimeError::MalformedGrid(detail) => HumanError {
            message: "The picture could not be turned into a usable grid of digits.".into(),
            suggestion: format!(
                "Use an image tall enough for at least two rows of digits, \
                 or check the grid file contains only digits and line breaks. ({detail})"
            ),
            retriable: false,
        },

        DigiprimeError::InvalidMutation(detail) => HumanError {
            message: "The search tried to change a digit it is not allowed to touch.".into(),
            suggestion: format!("This is a bug; please report it. ({detail})"),
            retriable: false,
        },

        DigiprimeError::ExhaustedSubstitution { .. } => HumanError {
            message: "Almost every digit in this picture is one we cannot swap.".into(),
            suggestion: "Try a picture with more contrast or a wider rendering, \
                         or raise max_redraws."
                .into(),
            retriable: true,
        },

        DigiprimeError::IterationLimit { limit } => HumanError {
            message: format!("No prime turned up in {limit} tries."),
            suggestion: "Run again with a different seed, or raise or remove the iteration limit."
                .into(),
            retriable: true,
        },

        DigiprimeError::Cancelled { iteration } => HumanError {
            message: format!("The search was stopped after {iteration} tries."),
            suggestion: "Run again and let it finish; large pictures can take a while.".into(),
            retriable: true,
        },

        DigiprimeError::InvalidConfig(detail) => HumanError {
            message: "One of the settings is not valid.".into(),
            suggestion: format!("Fix the setting and try again. ({detail})"),
            retriable: false,
        },

        DigiprimeError::ImageError(detail) => HumanError {
            message: "We couldn't open that picture.".into(),
            suggestion: format!("Make sure the file is a PNG, JPEG or GIF image. ({detail})"),
            retriable: false,
        },

        DigiprimeError::Io(io_err) => humanize_io_error(io_err),

        DigiprimeError::Serialization(detail) => HumanError {
            message: "The settings file could not be read.".into(),
            suggestion: format!("Check the file is valid JSON. ({detail})"),
            retriable: false,
        },
    }
}

fn humanize_io_error(err: &std::io::Error) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: "That file doesn't exist.".into(),
            suggestion: "Check the path and spelling, then try again.".into(),
            retriable: false,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "We're not allowed to read or write that file.".into(),
            suggestion: "Check the file permissions.".into(),
            retriable: false,
        },
        _ => HumanError {
            message: "Something went wrong reading or writing a file.".into(),
            suggestion: format!("{err}"),
            retriable: false,
        },
    }
}
