// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Folio document engine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One titled unit of content that becomes one output page.
///
/// `None` marks an absent image or text. `Some("")` is a present but empty
/// body, which is a legitimate value a user can supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    #[serde(default)]
    pub body_text: Option<String>,
}

impl PageRecord {
    /// A record with a title only.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_path: None,
            body_text: None,
        }
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.body_text = Some(text.into());
        self
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn body_text(&self) -> Option<&str> {
        self.body_text.as_deref()
    }
}

/// Everything needed for one build: the document title and its pages in
/// final order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSpec {
    pub document_title: String,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

impl DocumentSpec {
    pub fn new(document_title: impl Into<String>, pages: Vec<PageRecord>) -> Self {
        Self {
            document_title: document_title.into(),
            pages,
        }
    }

    /// Number of pages a build of this spec produces (title page included).
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }
}

/// Font size and line advance for one of the two text styles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f32,
    /// Baseline-to-baseline distance in points.
    pub line_height: f32,
}

impl TextStyle {
    pub fn new(size: f32, line_spacing: f32) -> Self {
        Self {
            size,
            line_height: size * line_spacing,
        }
    }
}

/// Fixed page geometry, in PDF points with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    /// X coordinate of the left edge of the text column.
    pub left_margin: f32,
    /// X coordinate of the right edge of the text column.
    pub right_margin: f32,
    pub top_margin: f32,
    /// Height reserved below the title for a page image.
    pub image_height: f32,
    /// Vertical gap between title, image and body regions.
    pub padding: f32,
    pub title_font_size: f32,
    pub body_font_size: f32,
    /// Line height as a multiple of font size.
    pub line_spacing: f32,
}

impl PageGeometry {
    /// A4 portrait at 72 dpi.
    pub const PAGE_WIDTH: f32 = 595.0;
    pub const PAGE_HEIGHT: f32 = 842.0;
    pub const MARGIN: f32 = 60.0;
    pub const IMAGE_HEIGHT: f32 = 300.0;
    pub const PADDING: f32 = 40.0;

    /// Width available to text and images.
    pub fn content_width(&self) -> f32 {
        self.right_margin - self.left_margin
    }

    pub fn title_style(&self) -> TextStyle {
        TextStyle::new(self.title_font_size, self.line_spacing)
    }

    pub fn body_style(&self) -> TextStyle {
        TextStyle::new(self.body_font_size, self.line_spacing)
    }

    /// Check that the geometry describes a drawable page.
    pub fn validate(&self) -> crate::error::Result<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("image_height", self.image_height),
            ("title_font_size", self.title_font_size),
            ("body_font_size", self.body_font_size),
            ("line_spacing", self.line_spacing),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(crate::FolioError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.left_margin < 0.0
            || self.right_margin > self.page_width
            || self.content_width() <= 0.0
        {
            return Err(crate::FolioError::Config(format!(
                "margins {}..{} do not fit a page {} wide",
                self.left_margin, self.right_margin, self.page_width
            )));
        }
        if self.top_margin < 0.0 || self.top_margin >= self.page_height || self.padding < 0.0 {
            return Err(crate::FolioError::Config(
                "top margin and padding must lie within the page".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: Self::PAGE_WIDTH,
            page_height: Self::PAGE_HEIGHT,
            left_margin: Self::MARGIN,
            right_margin: Self::PAGE_WIDTH - Self::MARGIN,
            top_margin: Self::MARGIN,
            image_height: Self::IMAGE_HEIGHT,
            padding: Self::PADDING,
            title_font_size: 30.0,
            body_font_size: 12.0,
            line_spacing: 1.15,
        }
    }
}
