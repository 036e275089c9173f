// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — serialise rendered pages into a PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Its coordinate origin is the bottom-left corner, so
// every y value from the composer is flipped against the page height.

use folio_core::error::Result;
use printpdf::{
    BuiltinFont, Color, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Polygon, PolygonRing, Pt, RawImage, RawImageData, RawImageFormat, Rgb,
    TextItem, WindingOrder, XObjectTransform,
};
use tracing::{debug, info, instrument};

use super::page::{DrawOp, RenderedPage};

/// Images are placed at 72 dpi so one pixel spans one point before scaling.
const IMAGE_DPI: f32 = 72.0;

/// Turns a finished page list into the bytes of one document.
///
/// The builder calls this exactly once per build with every page in final
/// order. Test code can implement it to capture pages without producing PDF.
pub trait PageSerializer {
    fn serialize(&self, document_title: &str, pages: &[RenderedPage]) -> Result<Vec<u8>>;
}

/// Serialises pages to PDF with the built-in Helvetica font.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }
}

impl PageSerializer for PdfWriter {
    #[instrument(skip(self, pages), fields(page_count = pages.len()))]
    fn serialize(&self, document_title: &str, pages: &[RenderedPage]) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(document_title);
        let mut pdf_pages = Vec::with_capacity(pages.len());

        for page in pages {
            let (width_pt, height_pt) = page.size();
            let mut ops = Vec::with_capacity(page.ops().len() * 5);

            for op in page.ops() {
                match op {
                    DrawOp::FillBackground { rgb } => {
                        ops.push(Op::SetFillColor { col: color(*rgb) });
                        ops.push(Op::DrawPolygon {
                            polygon: page_rectangle(width_pt, height_pt),
                        });
                    }
                    DrawOp::Text {
                        text,
                        x,
                        baseline,
                        font_size,
                    } => {
                        ops.push(Op::SetFillColor {
                            col: color([0, 0, 0]),
                        });
                        ops.push(Op::StartTextSection);
                        ops.push(Op::SetTextCursor {
                            pos: Point {
                                x: Pt(*x),
                                y: Pt(height_pt - baseline),
                            },
                        });
                        ops.push(Op::SetFontSizeBuiltinFont {
                            size: Pt(*font_size),
                            font: BuiltinFont::Helvetica,
                        });
                        ops.push(Op::WriteTextBuiltinFont {
                            items: vec![TextItem::Text(text.clone())],
                            font: BuiltinFont::Helvetica,
                        });
                        ops.push(Op::EndTextSection);
                    }
                    DrawOp::Image { image, rect } => {
                        let rgb_image = image.as_dynamic().to_rgb8();
                        let (px_w, px_h) = rgb_image.dimensions();
                        let raw = RawImage {
                            pixels: RawImageData::U8(rgb_image.into_raw()),
                            width: px_w as usize,
                            height: px_h as usize,
                            data_format: RawImageFormat::RGB8,
                            tag: Vec::new(),
                        };
                        let xobject_id = doc.add_image(&raw);

                        ops.push(Op::UseXobject {
                            id: xobject_id,
                            transform: XObjectTransform {
                                translate_x: Some(Pt(rect.left)),
                                translate_y: Some(Pt(height_pt - rect.bottom)),
                                scale_x: Some(rect.width() / px_w as f32),
                                scale_y: Some(rect.height() / px_h as f32),
                                dpi: Some(IMAGE_DPI),
                                rotate: None,
                            },
                        });
                    }
                }
            }

            debug!(page = page.number(), ops = ops.len(), "Page serialised");
            pdf_pages.push(PdfPage::new(pt_to_mm(width_pt), pt_to_mm(height_pt), ops));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        info!(
            title = document_title,
            pages = pages.len(),
            bytes = output.len(),
            warnings = warnings.len(),
            "PDF serialised"
        );
        Ok(output)
    }
}

fn pt_to_mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(Rgb {
        r: f32::from(r) / 255.0,
        g: f32::from(g) / 255.0,
        b: f32::from(b) / 255.0,
        icc_profile: None,
    })
}

/// A filled rectangle covering the whole page.
fn page_rectangle(width_pt: f32, height_pt: f32) -> Polygon {
    let corner = |x: f32, y: f32| LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    };
    Polygon {
        rings: vec![PolygonRing {
            points: vec![
                corner(0.0, 0.0),
                corner(width_pt, 0.0),
                corner(width_pt, height_pt),
                corner(0.0, height_pt),
            ],
        }],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}
