//! Fixed-column grid placement for PDF label sheets.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner of
//! the page. Cells are filled left to right, `columns` per row; a row that
//! does not fit below the previous one starts a new page.

pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Where one label lands on the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlacement {
    pub index: usize,
    pub page: usize,
    /// Row within the whole table, counting across pages.
    pub row: usize,
    pub column: usize,
    pub cell: Rect,
    pub image: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub columns: usize,
    pub padding: Padding,
    /// Stroke width of the cell borders; zero disables them.
    pub border_width: f32,
    pub image_scale: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH_PT,
            page_height: A4_HEIGHT_PT,
            margin: 0.0,
            columns: 4,
            padding: Padding {
                left: 10.0,
                top: 5.0,
                right: 2.0,
                bottom: 2.0,
            },
            border_width: 0.5,
            image_scale: 2.0,
        }
    }
}

impl GridLayout {
    pub fn column_width(&self) -> f32 {
        (self.page_width - 2.0 * self.margin) / self.columns.max(1) as f32
    }

    fn content_width(&self) -> f32 {
        (self.column_width() - self.padding.left - self.padding.right).max(1.0)
    }

    /// Scaled image size, shrunk to the cell's content width when needed.
    pub fn image_size(&self, natural: (f32, f32)) -> (f32, f32) {
        let (width, height) = (natural.0 * self.image_scale, natural.1 * self.image_scale);
        let limit = self.content_width();
        if width > limit {
            let shrink = limit / width;
            (limit, height * shrink)
        } else {
            (width, height)
        }
    }

    /// Place images of the given natural sizes (points) in input order.
    pub fn place(&self, sizes: &[(f32, f32)]) -> Vec<CellPlacement> {
        let columns = self.columns.max(1);
        let column_width = self.column_width();
        let page_top = self.page_height - self.margin;

        let mut placements = Vec::with_capacity(sizes.len());
        let mut page = 0;
        let mut cursor = page_top;
        for (row, chunk) in sizes.chunks(columns).enumerate() {
            let scaled: Vec<(f32, f32)> = chunk.iter().map(|&size| self.image_size(size)).collect();
            let tallest = scaled.iter().map(|s| s.1).fold(0.0_f32, f32::max);
            let row_height = self.padding.top + tallest + self.padding.bottom;

            if cursor < page_top && cursor - row_height < self.margin {
                page += 1;
                cursor = page_top;
            }

            for (column, &(width, height)) in scaled.iter().enumerate() {
                let cell = Rect {
                    x: self.margin + column as f32 * column_width,
                    y: cursor - row_height,
                    width: column_width,
                    height: row_height,
                };
                let image = Rect {
                    x: cell.x + self.padding.left,
                    y: cursor - self.padding.top - height,
                    width,
                    height,
                };
                placements.push(CellPlacement {
                    index: row * columns + column,
                    page,
                    row,
                    column,
                    cell,
                    image,
                });
            }
            cursor -= row_height;
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LABEL: (f32, f32) = (56.88, 33.6);

    #[test]
    fn five_cells_wrap_after_four() {
        let layout = GridLayout::default();
        let placements = layout.place(&[LABEL; 5]);
        let grid: Vec<(usize, usize, usize)> = placements
            .iter()
            .map(|p| (p.page, p.row, p.column))
            .collect();
        assert_eq!(
            grid,
            vec![(0, 0, 0), (0, 0, 1), (0, 0, 2), (0, 0, 3), (0, 1, 0)]
        );
    }

    #[test]
    fn padding_and_scale_applied() {
        let layout = GridLayout::default();
        let placements = layout.place(&[LABEL; 2]);
        let first = placements[0];
        assert!((first.image.x - 10.0).abs() < 1e-3);
        assert!((first.image.top() - (A4_HEIGHT_PT - 5.0)).abs() < 1e-3);
        assert!((first.image.width - LABEL.0 * 2.0).abs() < 1e-3);
        assert!((first.image.height - LABEL.1 * 2.0).abs() < 1e-3);
        let second = placements[1];
        assert!((second.image.x - (layout.column_width() + 10.0)).abs() < 1e-3);
        assert!((first.cell.top() - A4_HEIGHT_PT).abs() < 1e-3);
    }

    #[test]
    fn wide_images_shrink_to_cell() {
        let layout = GridLayout::default();
        let placement = layout.place(&[(200.0, 20.0)])[0];
        let limit = layout.column_width() - 12.0;
        assert!((placement.image.width - limit).abs() < 1e-3);
        assert!((placement.image.height - 40.0 * limit / 400.0).abs() < 1e-3);
    }

    #[test]
    fn rows_overflow_onto_new_page() {
        let layout = GridLayout::default();
        let row_height = 5.0 + LABEL.1 * 2.0 + 2.0;
        let rows_per_page = (A4_HEIGHT_PT / row_height).floor() as usize;
        let count = rows_per_page * 4 + 1;
        let placements = layout.place(&vec![LABEL; count]);

        let last = placements[count - 1];
        assert_eq!(last.page, 1);
        assert_eq!(last.row, rows_per_page);
        assert!((last.cell.top() - A4_HEIGHT_PT).abs() < 1e-3);
        assert!(placements[..count - 1].iter().all(|p| p.page == 0));
    }

    #[test]
    fn empty_input_places_nothing() {
        assert!(GridLayout::default().place(&[]).is_empty());
    }
}
