// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — containment geometry, font metrics, and text wrapping.

pub mod geometry;
pub mod metrics;
pub mod text;

pub use geometry::{Rect, fit_within_bounds};
pub use text::{Alignment, WrappedText, wrap_text};
