//! PDF statements
//!
//! - layout: positioned text and shapes per page
//! - table: the transaction grid and its page breaks
//! - backend: paints the layout with printpdf

pub mod backend;
pub mod layout;
pub mod table;

use banklink_config::StatementFormat;

use crate::document::{StatementDocument, COLUMNS};
use crate::error::{StatementError, StatementResult};
use crate::renderer::StatementRenderer;

use layout::{Align, FontWeight, PageLayout, Rgb};
pub use table::TableExtension;

/// Page furniture around the table; loaded as the renderer's first stage
#[derive(Debug, Clone, PartialEq)]
pub struct PdfCore {
    pub title_size: f32,
    pub subtitle_size: f32,
    pub heading_size: f32,
    pub summary_size: f32,
    pub title_color: Rgb,
    pub muted_color: Rgb,
    /// Left edge of the account block in mm
    pub left: f32,
}

impl PdfCore {
    pub fn helvetica() -> Self {
        Self {
            title_size: 20.0,
            subtitle_size: 12.0,
            heading_size: 14.0,
            summary_size: 12.0,
            title_color: Rgb(40, 40, 40),
            muted_color: Rgb(100, 100, 100),
            left: 20.0,
        }
    }
}

/// Horizontal centre of an A4 page in mm
const CENTER_X: f32 = 105.0;
const TABLE_START_Y: f32 = 80.0;

/// Renders the full statement layout
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    core: PdfCore,
    table: TableExtension,
}

impl PdfRenderer {
    pub fn new(core: PdfCore, table: TableExtension) -> Self {
        Self { core, table }
    }

    fn check_layout(&self) -> StatementResult<()> {
        let table = &self.table;
        if table.row_height <= 0.0 || table.margin_top + 2.0 * table.row_height >= table.bottom_limit {
            return Err(StatementError::RenderFailed {
                format: StatementFormat::Pdf,
                reason: "table rows do not fit on a page".to_string(),
            });
        }
        if self.core.title_size <= 0.0 || table.font_size <= 0.0 {
            return Err(StatementError::RenderFailed {
                format: StatementFormat::Pdf,
                reason: "font size must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl PdfRenderer {
    /// Statement pages, before painting
    pub fn layout(&self, doc: &StatementDocument) -> StatementResult<Vec<PageLayout>> {
        self.check_layout()?;
        let core = &self.core;
        let mut pages = Vec::new();
        let mut page = PageLayout::new();

        page.text(&doc.title, CENTER_X, 20.0, core.title_size, FontWeight::Regular, core.title_color, Align::Center);
        page.text(
            &format!("Generated on: {}", doc.generated_on_text()),
            CENTER_X,
            30.0,
            core.subtitle_size,
            FontWeight::Regular,
            core.muted_color,
            Align::Center,
        );

        let heading = [
            (50.0, format!("Account: {}", doc.account_label())),
            (60.0, format!("Account Holder: {}", doc.holder)),
            (70.0, format!("Statement Period: Up to {}", doc.generated_on_text())),
        ];
        for (y, line) in &heading {
            page.text(line, core.left, *y, core.heading_size, FontWeight::Regular, Rgb::BLACK, Align::Left);
        }

        let rows: Vec<[&str; 4]> = doc.rows.iter().map(|row| row.cells()).collect();
        let (mut page, table_end) = self.table.draw(&mut pages, page, TABLE_START_Y, COLUMNS, &rows);

        let mut y = table_end + 20.0;
        if y + 10.0 > self.table.bottom_limit {
            pages.push(std::mem::take(&mut page));
            y = self.table.margin_top + 10.0;
        }
        let summary = [
            format!("Total Transactions: {}", doc.total_transactions()),
            format!("Ending Balance: {}", doc.ending_balance),
        ];
        for (offset, line) in summary.iter().enumerate() {
            page.text(
                line,
                core.left,
                y + 10.0 * offset as f32,
                core.summary_size,
                FontWeight::Regular,
                Rgb::BLACK,
                Align::Left,
            );
        }
        pages.push(page);
        Ok(pages)
    }
}

impl StatementRenderer for PdfRenderer {
    fn format(&self) -> StatementFormat {
        StatementFormat::Pdf
    }

    fn render(&self, doc: &StatementDocument) -> StatementResult<Vec<u8>> {
        let pages = self.layout(doc)?;
        let bytes = backend::write_pdf(&doc.title, &pages)?;
        log::debug!(
            "Rendered PDF statement for {} ({} pages, {} bytes)",
            doc.account_id,
            pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
