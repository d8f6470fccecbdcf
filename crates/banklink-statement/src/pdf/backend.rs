//! Paints page layouts with printpdf

use banklink_config::StatementFormat;
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect};

use super::layout::{text_width_mm, Align, DrawOp, FontWeight, PageLayout, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::{StatementError, StatementResult};

const LAYER_NAME: &str = "Statement";

fn render_failed(reason: impl ToString) -> StatementError {
    StatementError::RenderFailed {
        format: StatementFormat::Pdf,
        reason: reason.to_string(),
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f32::from(rgb.0) / 255.0,
        f32::from(rgb.1) / 255.0,
        f32::from(rgb.2) / 255.0,
        None,
    ))
}

/// Layout y (from the top) to PDF y (from the bottom)
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn paint(layer: &PdfLayerReference, fonts: &Fonts, page: &PageLayout) {
    for op in &page.ops {
        match op {
            DrawOp::Text {
                text,
                x,
                y,
                size,
                weight,
                color: rgb,
                align,
            } => {
                let left = match align {
                    Align::Left => *x,
                    Align::Center => x - text_width_mm(text, *size) / 2.0,
                    Align::Right => x - text_width_mm(text, *size),
                };
                layer.set_fill_color(color(*rgb));
                layer.use_text(text.as_str(), *size, Mm(left), flip(*y), fonts.get(*weight));
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color: rgb,
            } => {
                layer.set_fill_color(color(*rgb));
                layer.add_rect(
                    Rect::new(Mm(*x), flip(y + height), Mm(x + width), flip(*y))
                        .with_mode(PaintMode::Fill),
                );
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                color: rgb,
                line_width,
            } => {
                layer.set_outline_color(color(*rgb));
                layer.set_outline_thickness(*line_width);
                layer.add_rect(
                    Rect::new(Mm(*x), flip(y + height), Mm(x + width), flip(*y))
                        .with_mode(PaintMode::Stroke),
                );
            }
        }
    }
}

/// One A4 page per layout, in order
pub fn write_pdf(title: &str, pages: &[PageLayout]) -> StatementResult<Vec<u8>> {
    let (first, rest) = pages
        .split_first()
        .ok_or_else(|| render_failed("statement has no pages"))?;

    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_failed)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_failed)?,
    };

    paint(&doc.get_page(page).get_layer(layer), &fonts, first);
    for layout in rest {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        paint(&doc.get_page(page).get_layer(layer), &fonts, layout);
    }

    doc.save_to_bytes().map_err(render_failed)
}
