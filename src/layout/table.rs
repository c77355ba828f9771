use std::rc::Rc;

use crate::error::{ReportError, Result};
use crate::sheet::Sheet;
use crate::style::{Style, TableStyle};
use crate::types::{CellValue, Footprint, Position, Size};

/// Renders a table: one header row with the column names, then the data.
///
/// Content is read straight from the style's table; formats still come from
/// the style.
pub struct TableLayout {
    style: Rc<TableStyle>,
    size: Size,
}

impl TableLayout {
    pub fn new(style: Rc<TableStyle>) -> Result<Self> {
        let table = style.table();
        let width = u32::try_from(table.num_columns())
            .map_err(|_| ReportError::OutOfRange(format!("table '{}' is too wide", table.name())))?;
        let height = u32::try_from(table.num_rows())
            .ok()
            .and_then(|rows| rows.checked_add(1)) // Header row
            .ok_or_else(|| {
                ReportError::OutOfRange(format!("table '{}' is too tall", table.name()))
            })?;
        if width < 1 {
            return Err(ReportError::config(format!(
                "table '{}' has no columns",
                table.name()
            )));
        }
        Ok(Self {
            style,
            size: Size::new(width, height),
        })
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn style(&self) -> &dyn Style {
        self.style.as_ref()
    }

    pub fn draw<S: Sheet + ?Sized>(&self, sheet: &mut S, origin: Position) -> Result<()> {
        Footprint::new(origin, self.size)?;
        let table = self.style.table();
        tracing::trace!(?origin, size = ?self.size, table = table.name(), "draw table");

        let header = table
            .column_names()
            .iter()
            .map(|name| Some(CellValue::from(name.as_str())));
        self.write_row(sheet, origin, 0, header);

        for (local_row, row) in (1u32..).zip(table.rows()) {
            self.write_row(sheet, origin, local_row, row.iter().cloned().map(Some));
        }
        Ok(())
    }

    fn write_row<S: Sheet + ?Sized>(
        &self,
        sheet: &mut S,
        origin: Position,
        local_row: u32,
        values: impl Iterator<Item = Option<CellValue>>,
    ) {
        for (local_col, value) in (0u32..).zip(values) {
            sheet.write(
                origin.row + local_row,
                origin.column + local_col,
                value,
                self.style.cell_format(local_col, local_row),
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::test_support::text;
    use crate::memory::{MemorySheet, MemoryWorkbook};
    use crate::table::Table;

    fn three_by_two(workbook: &mut MemoryWorkbook) -> Rc<TableStyle> {
        let mut table = Table::new("Table", vec!["Col1", "Col2", "Col3"]).unwrap();
        table.add_row(vec!["a", "b", "c"]).unwrap();
        table.add_row(vec!["d", "e", "f"]).unwrap();
        Rc::new(TableStyle::new(workbook, table))
    }

    #[test]
    fn test_size_includes_header() {
        let mut workbook = MemoryWorkbook::new();
        let layout = TableLayout::new(three_by_two(&mut workbook)).unwrap();
        assert_eq!(layout.size(), Size::new(3, 3));
    }

    #[test]
    fn test_header_only_table() {
        let mut workbook = MemoryWorkbook::new();
        let table = Table::new("Empty", vec!["Only"]).unwrap();
        let style = Rc::new(TableStyle::new(&mut workbook, table));
        let layout = TableLayout::new(style).unwrap();
        assert_eq!(layout.size(), Size::new(1, 1));

        let mut sheet = MemorySheet::new("Sheet1");
        layout.draw(&mut sheet, Position::ORIGIN).unwrap();
        assert_eq!(text(&sheet, 0, 0), Some("Only"));
        assert_eq!(sheet.cell_count(), 1);
    }

    #[test]
    fn test_draw() {
        let mut workbook = MemoryWorkbook::new();
        let layout = TableLayout::new(three_by_two(&mut workbook)).unwrap();

        let mut sheet = MemorySheet::new("Sheet1");
        layout.draw(&mut sheet, Position::ORIGIN).unwrap();

        assert_eq!(text(&sheet, 0, 0), Some("Col1"));
        assert_eq!(text(&sheet, 0, 1), Some("Col2"));
        assert_eq!(text(&sheet, 0, 2), Some("Col3"));
        assert_eq!(text(&sheet, 0, 3), None);
        assert_eq!(text(&sheet, 1, 0), Some("a"));
        assert_eq!(text(&sheet, 1, 1), Some("b"));
        assert_eq!(text(&sheet, 1, 2), Some("c"));
        assert_eq!(text(&sheet, 1, 3), None);
        assert_eq!(text(&sheet, 2, 0), Some("d"));
        assert_eq!(text(&sheet, 2, 1), Some("e"));
        assert_eq!(text(&sheet, 2, 2), Some("f"));
        for column in 0..4 {
            assert_eq!(text(&sheet, 3, column), None);
        }
    }

    #[test]
    fn test_draw_offset_matches_style_lookup() {
        let mut workbook = MemoryWorkbook::new();
        let style = three_by_two(&mut workbook);
        let layout = TableLayout::new(Rc::clone(&style)).unwrap();

        let mut sheet = MemorySheet::new("Sheet1");
        let origin = Position::new(1, 1);
        layout.draw(&mut sheet, origin).unwrap();

        for row in 0..3 {
            for column in 0..3 {
                assert_eq!(
                    sheet.read(origin.row + row, origin.column + column).cloned(),
                    style.cell_content(column, row),
                );
                assert_eq!(
                    sheet.format_at(origin.row + row, origin.column + column),
                    style.cell_format(column, row),
                );
            }
        }
        assert_eq!(sheet.cell_count(), 9);
    }
}
