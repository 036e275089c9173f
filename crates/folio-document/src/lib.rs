// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-document — Layout and rendering engine for Folio.
//
// Turns an ordered list of titled records (optional photo, optional text)
// into a paginated PDF: text wrapping and containment geometry, EXIF-aware
// image normalisation, page composition, PDF serialisation, and
// collision-free output paths.

pub mod build;
pub mod image;
pub mod layout;
pub mod output;
pub mod pdf;

#[cfg(test)]
mod test_support;

// Re-export the primary entry points so callers can use `folio_document::DocumentBuilder` etc.
pub use build::{BuildOutcome, DocumentBuilder, build_async, build_document, spawn_build};
pub use image::{NormalizedImage, Orientation, load_normalized_image};
pub use layout::{Rect, WrappedText, fit_within_bounds, wrap_text};
pub use output::{create_output_file, document_directory, resolve_output_path};
pub use pdf::{PageComposer, PageSerializer, PdfReader, PdfWriter, RenderedPage};
