// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for whoever asked for the document.
//
// Every build failure is mapped to plain English with a clear suggestion.

use crate::error::FolioError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying again as-is.
    Transient,
    /// User must do something (free space, fix permissions, pick another file).
    ActionRequired,
    /// Retrying will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether retrying the same build might succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `FolioError` into a `HumanError`.
pub fn humanize_error(err: &FolioError) -> HumanError {
    match err {
        FolioError::ImageDecode { path, .. } => HumanError {
            message: "One of the photos couldn't be read.".into(),
            suggestion: format!(
                "The page was made with an empty space instead. Check the photo at {} still opens.",
                path.display()
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::OutputDir { path, source } | FolioError::Write { path, source } => {
            humanize_io(source, &path.display().to_string())
        }

        FolioError::PdfError(_) => HumanError {
            message: "The PDF couldn't be put together.".into(),
            suggestion: "Try again. If this keeps happening, try removing pages one at a time to find the one causing trouble.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FolioError::Task(_) => HumanError {
            message: "Making the document stopped unexpectedly.".into(),
            suggestion: "Try again. Nothing was saved.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FolioError::Config(detail) => HumanError {
            message: "The settings file has a mistake in it.".into(),
            suggestion: format!("Fix the setting and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::Io(io_err) => humanize_io(io_err, "the file"),

        FolioError::Serialization(_) => HumanError {
            message: "The document description couldn't be read.".into(),
            suggestion: "Check the file is valid JSON with a document_title and a list of pages.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn humanize_io(io_err: &std::io::Error, location: &str) -> HumanError {
    match io_err.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: "A file or folder couldn't be found.".into(),
            suggestion: format!("It may have been moved or deleted. Check {location}."),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "There's no permission to save there.".into(),
            suggestion: format!("Choose a different folder, or check the permissions on {location}."),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "There was a problem saving the document.".into(),
            suggestion: format!(
                "Try again. If this keeps happening, the disk may be full. ({location})"
            ),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
