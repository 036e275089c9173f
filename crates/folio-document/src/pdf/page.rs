// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rendered page values — what the composer produces and serialisers consume.

use serde::Serialize;

use crate::image::NormalizedImage;
use crate::layout::{Alignment, Rect, WrappedText};

/// One drawing instruction, in top-down page coordinates.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// Paint the whole page in an RGB colour.
    FillBackground { rgb: [u8; 3] },
    /// One line of Helvetica with its baseline at `baseline`.
    Text {
        text: String,
        x: f32,
        baseline: f32,
        font_size: f32,
    },
    /// Draw `image` stretched to exactly `rect`.
    Image { image: NormalizedImage, rect: Rect },
}

/// A wrapped block placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: WrappedText,
    pub alignment: Alignment,
    /// Top edge of the first line.
    pub top: f32,
}

impl TextBlock {
    pub fn bottom(&self) -> f32 {
        self.top + self.text.total_height
    }
}

/// Where a page's photo went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlacement {
    /// The region reserved below the title.
    pub region: Rect,
    /// The drawn rectangle inside `region`.
    pub placed: Rect,
    /// Pixel size of the drawn bitmap.
    pub pixels: (u32, u32),
    /// True when the photo could not be decoded and a blank square was drawn.
    pub placeholder: bool,
}

/// Geometry summary of a rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub title: TextBlock,
    pub image: Option<ImagePlacement>,
    pub body: Option<TextBlock>,
}

/// A finished page: its 1-based number, size, drawing operations, and layout.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    number: u32,
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
    layout: PageLayout,
}

impl RenderedPage {
    pub(crate) fn new(
        number: u32,
        width: f32,
        height: f32,
        ops: Vec<DrawOp>,
        layout: PageLayout,
    ) -> Self {
        Self {
            number,
            width,
            height,
            ops,
            layout,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Page size in points.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// How far the body text runs past the bottom edge, if it does.
    pub fn body_overflow(&self) -> Option<f32> {
        let bottom = self.layout.body.as_ref()?.bottom();
        (bottom > self.height).then(|| bottom - self.height)
    }

    /// Every line of text on the page, in drawing order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
