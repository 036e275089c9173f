// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — composing pages, serialising them, and reading results back.

pub mod compose;
pub mod page;
pub mod reader;
pub mod writer;

pub use compose::PageComposer;
pub use page::{DrawOp, ImagePlacement, PageLayout, RenderedPage, TextBlock};
pub use reader::PdfReader;
pub use writer::{PageSerializer, PdfWriter};
