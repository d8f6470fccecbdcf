//! Positioned drawing operations, independent of the PDF library
//!
//! Coordinates are millimetres from the top-left corner of an A4 page.

/// A4 width in mm
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 height in mm
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Helvetica's mean advance for the digits and capitals statements are made of
const MEAN_GLYPH_EM: f32 = 0.55;

/// Points to millimetres
pub fn pt_to_mm(value: f32) -> f32 {
    value * 25.4 / 72.0
}

/// Estimated rendered width of `text` in mm
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    pt_to_mm(text.chars().count() as f32 * size_pt * MEAN_GLYPH_EM)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        /// Anchor x; its meaning depends on `align`
        x: f32,
        /// Baseline
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        align: Align,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        line_width: f32,
    },
}

/// Everything drawn on one page, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        align: Align,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            weight,
            color,
            align,
        });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, line_width: f32) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            color,
            line_width,
        });
    }

    /// Text strings in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_grows_with_length_and_size() {
        assert!(text_width_mm("R1250.50", 10.0) > text_width_mm("R5.00", 10.0));
        assert!(text_width_mm("R5.00", 20.0) > text_width_mm("R5.00", 10.0));
        assert_eq!(text_width_mm("", 12.0), 0.0);
    }

    #[test]
    fn test_texts_skip_shapes() {
        let mut page = PageLayout::new();
        page.fill_rect(0.0, 0.0, 10.0, 10.0, Rgb::BLACK);
        page.text("Balance", 1.0, 5.0, 10.0, FontWeight::Bold, Rgb::WHITE, Align::Right);
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["Balance"]);
        assert!(page.contains_text("Balance"));
        assert!(!page.contains_text("Bal"));
    }
}
