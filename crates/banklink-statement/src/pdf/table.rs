//! Grid table layout with page breaks

use super::layout::{pt_to_mm, Align, FontWeight, PageLayout, Rgb, PAGE_WIDTH_MM};

/// Look of the statement table; loaded as the renderer's second stage
#[derive(Debug, Clone, PartialEq)]
pub struct TableExtension {
    /// Left and right margin in mm
    pub margin_x: f32,
    /// Top margin on continuation pages in mm
    pub margin_top: f32,
    /// Lowest y a row may reach in mm
    pub bottom_limit: f32,
    pub row_height: f32,
    pub cell_padding: f32,
    pub font_size: f32,
    pub header_fill: Rgb,
    pub header_text: Rgb,
    pub body_text: Rgb,
    pub alternate_fill: Rgb,
    pub line_color: Rgb,
    pub line_width: f32,
    /// Relative column widths
    pub column_weights: [f32; 4],
    pub column_align: [Align; 4],
}

impl TableExtension {
    /// Orange header, light grey banding, thin grid lines
    pub fn grid() -> Self {
        Self {
            margin_x: 14.0,
            margin_top: 14.0,
            bottom_limit: 283.0,
            row_height: 8.0,
            cell_padding: 2.0,
            font_size: 10.0,
            header_fill: Rgb(255, 98, 0),
            header_text: Rgb::WHITE,
            body_text: Rgb(20, 20, 20),
            alternate_fill: Rgb(245, 245, 245),
            line_color: Rgb(200, 200, 200),
            line_width: 0.5,
            column_weights: [1.0, 1.6, 1.0, 1.0],
            column_align: [Align::Left, Align::Left, Align::Right, Align::Right],
        }
    }

    fn column_widths(&self, page_width_mm: f32) -> [f32; 4] {
        let usable = page_width_mm - 2.0 * self.margin_x;
        let total: f32 = self.column_weights.iter().sum();
        self.column_weights.map(|w| usable * w / total)
    }

    /// Draw the table starting at `start_y` on `page`
    ///
    /// Filled pages are pushed onto `done`; the header repeats on every page.
    /// Returns the page still being written and the y just below the table.
    pub fn draw(
        &self,
        done: &mut Vec<PageLayout>,
        mut page: PageLayout,
        start_y: f32,
        header: [&str; 4],
        rows: &[[&str; 4]],
    ) -> (PageLayout, f32) {
        let widths = self.column_widths(PAGE_WIDTH_MM);
        let mut y = start_y;

        if y + 2.0 * self.row_height > self.bottom_limit {
            done.push(std::mem::take(&mut page));
            y = self.margin_top;
        }
        y = self.draw_header(&mut page, y, &widths, header);

        for (index, row) in rows.iter().enumerate() {
            if y + self.row_height > self.bottom_limit {
                done.push(std::mem::take(&mut page));
                y = self.draw_header(&mut page, self.margin_top, &widths, header);
            }
            let fill = (index % 2 == 1).then_some(self.alternate_fill);
            self.draw_row(&mut page, y, &widths, row, FontWeight::Regular, self.body_text, fill);
            y += self.row_height;
        }

        (page, y)
    }

    fn draw_header(&self, page: &mut PageLayout, y: f32, widths: &[f32; 4], header: [&str; 4]) -> f32 {
        self.draw_row(
            page,
            y,
            widths,
            &header,
            FontWeight::Bold,
            self.header_text,
            Some(self.header_fill),
        );
        y + self.row_height
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row(
        &self,
        page: &mut PageLayout,
        y: f32,
        widths: &[f32; 4],
        cells: &[&str; 4],
        weight: FontWeight,
        text: Rgb,
        fill: Option<Rgb>,
    ) {
        let baseline = y + self.row_height / 2.0 + pt_to_mm(self.font_size) * 0.35;
        let mut x = self.margin_x;
        for (column, cell) in cells.iter().enumerate() {
            let width = widths[column];
            if let Some(color) = fill {
                page.fill_rect(x, y, width, self.row_height, color);
            }
            page.stroke_rect(x, y, width, self.row_height, self.line_color, self.line_width);

            let anchor = match self.column_align[column] {
                Align::Left => x + self.cell_padding,
                Align::Center => x + width / 2.0,
                Align::Right => x + width - self.cell_padding,
            };
            page.text(
                cell,
                anchor,
                baseline,
                self.font_size,
                weight,
                text,
                self.column_align[column],
            );
            x += width;
        }
    }
}
