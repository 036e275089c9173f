// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page composer — lays out the title page and one content page per record.
//
// Content page, top to bottom:
//
//   top margin
//   title (centred, wrapped)          padding
//   image region (only if an image)   padding
//   body text (left-aligned, wrapped)

use folio_core::{BuildConfig, PageGeometry, PageRecord, TextStyle};
use tracing::{debug, instrument, warn};

use super::page::{DrawOp, ImagePlacement, PageLayout, RenderedPage, TextBlock};
use crate::image::{ImageSlot, NormalizedImage, blank_placeholder, load_image_slot};
use crate::layout::metrics::ASCENT;
use crate::layout::{Alignment, Rect, fit_within_bounds, wrap_text};

const WHITE: [u8; 3] = [255, 255, 255];

/// Approximate depth of Helvetica descenders, as a fraction of font size.
const DESCENT: f32 = 0.207;

/// Renders pages of fixed geometry. Holds configuration only, so one
/// composer can render any number of pages.
#[derive(Debug, Clone)]
pub struct PageComposer {
    geometry: PageGeometry,
    working_image_width: u32,
}

impl PageComposer {
    // -- Construction ---------------------------------------------------------

    pub fn new(geometry: PageGeometry, working_image_width: u32) -> Self {
        Self {
            geometry,
            working_image_width,
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.geometry, config.working_image_width)
    }

    // -- Pages ----------------------------------------------------------------

    /// Page 1: the document title, centred at the top margin.
    #[instrument(skip(self))]
    pub fn render_title_page(&self, document_title: &str) -> RenderedPage {
        let mut ops = vec![DrawOp::FillBackground { rgb: WHITE }];
        let title = self.place_text(
            document_title,
            self.geometry.title_style(),
            Alignment::Center,
            self.geometry.top_margin,
            &mut ops,
        );

        debug!(lines = title.text.lines.len(), "Title page composed");
        self.finish(
            1,
            ops,
            PageLayout {
                title,
                image: None,
                body: None,
            },
        )
    }

    /// A content page for `record`, numbered `page_number`.
    ///
    /// Absent image and text regions are skipped entirely, so a title-only
    /// record produces a title-only page. An image that fails to decode is
    /// replaced by a blank placeholder and the page is still produced.
    #[instrument(skip(self, record), fields(title = %record.title))]
    pub fn render_content_page(&self, record: &PageRecord, page_number: u32) -> RenderedPage {
        let geometry = &self.geometry;
        let mut ops = vec![DrawOp::FillBackground { rgb: WHITE }];

        let title = self.place_text(
            &record.title,
            geometry.title_style(),
            Alignment::Center,
            geometry.top_margin,
            &mut ops,
        );
        let mut cursor = title.bottom() + geometry.padding;

        let image = match load_image_slot(record.image_path(), self.working_image_width) {
            ImageSlot::Missing => None,
            ImageSlot::Present(result) => {
                let (bitmap, placeholder) = match result {
                    Ok(image) => (image, false),
                    Err(failure) => {
                        warn!(
                            page = page_number,
                            error = %failure,
                            "Using blank placeholder for unreadable image"
                        );
                        (blank_placeholder(), true)
                    }
                };
                let placement = self.place_image(bitmap, cursor, placeholder, &mut ops);
                cursor += geometry.image_height + geometry.padding;
                Some(placement)
            }
        };

        let body = record.body_text().map(|text| {
            self.place_text(
                text,
                geometry.body_style(),
                Alignment::Left,
                cursor,
                &mut ops,
            )
        });

        debug!(
            page = page_number,
            has_image = image.is_some(),
            has_body = body.is_some(),
            "Content page composed"
        );
        let page = self.finish(page_number, ops, PageLayout { title, image, body });
        if let Some(excess) = page.body_overflow() {
            warn!(
                page = page_number,
                excess_pt = excess,
                "Body text runs past the bottom of the page"
            );
        }
        page
    }

    // -- Placement ------------------------------------------------------------

    /// Wrap `text` to the margins and emit one text op per line.
    fn place_text(
        &self,
        text: &str,
        style: TextStyle,
        alignment: Alignment,
        top: f32,
        ops: &mut Vec<DrawOp>,
    ) -> TextBlock {
        let column = self.geometry.content_width();
        let wrapped = wrap_text(text, &style, column);
        let offsets = wrapped.line_offsets(alignment, column);

        // Centre the glyph box vertically inside each line slot.
        let baseline_offset =
            (style.line_height - (ASCENT + DESCENT) * style.size) / 2.0 + ASCENT * style.size;

        for (index, (line, offset)) in wrapped.lines.iter().zip(offsets).enumerate() {
            if line.is_empty() {
                continue;
            }
            ops.push(DrawOp::Text {
                text: line.clone(),
                x: self.geometry.left_margin + offset,
                baseline: top + index as f32 * style.line_height + baseline_offset,
                font_size: style.size,
            });
        }

        TextBlock {
            text: wrapped,
            alignment,
            top,
        }
    }

    /// Fit `bitmap` into the image region starting at `top` and emit it.
    fn place_image(
        &self,
        bitmap: NormalizedImage,
        top: f32,
        placeholder: bool,
        ops: &mut Vec<DrawOp>,
    ) -> ImagePlacement {
        let region = Rect::new(
            self.geometry.left_margin,
            top,
            self.geometry.right_margin,
            top + self.geometry.image_height,
        );
        let pixels = (bitmap.width(), bitmap.height());
        let placed = fit_within_bounds(pixels.0 as f32, pixels.1 as f32, &region);

        ops.push(DrawOp::Image {
            image: bitmap,
            rect: placed,
        });

        ImagePlacement {
            region,
            placed,
            pixels,
            placeholder,
        }
    }

    fn finish(&self, number: u32, ops: Vec<DrawOp>, layout: PageLayout) -> RenderedPage {
        RenderedPage::new(
            number,
            self.geometry.page_width,
            self.geometry.page_height,
            ops,
            layout,
        )
    }
}

impl Default for PageComposer {
    fn default() -> Self {
        Self::from_config(&BuildConfig::default())
    }
}
