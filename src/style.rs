//! Styles decide what a layout paints in each of its cells.
//!
//! A style is a pure function of the cell's position relative to the
//! layout's origin. Every style allocates its format from the workbook
//! when constructed; styles are shared between layouts through `Rc`.

use std::rc::Rc;

use crate::error::Result;
use crate::sheet::Workbook;
use crate::table::Table;
use crate::types::{CellValue, FormatId};

/// Content and format for each cell of a layout, by local `(column, row)`.
pub trait Style {
    fn cell_content(&self, column: u32, row: u32) -> Option<CellValue>;

    fn cell_format(&self, column: u32, row: u32) -> Option<FormatId>;
}

/// Blank cells with an empty format.
#[derive(Debug, Clone)]
pub struct EmptyStyle {
    format: FormatId,
}

impl EmptyStyle {
    pub fn new<W: Workbook>(workbook: &mut W) -> Self {
        Self {
            format: workbook.add_format().id(),
        }
    }
}

impl Style for EmptyStyle {
    fn cell_content(&self, _column: u32, _row: u32) -> Option<CellValue> {
        None
    }

    fn cell_format(&self, _column: u32, _row: u32) -> Option<FormatId> {
        Some(self.format)
    }
}

/// The same content in every cell, optionally on a solid background.
#[derive(Debug, Clone)]
pub struct FixedStyle {
    content: CellValue,
    format: FormatId,
}

impl FixedStyle {
    /// `background` is a `#RRGGBB` colour.
    pub fn new<W: Workbook>(
        workbook: &mut W,
        content: impl Into<CellValue>,
        background: Option<&str>,
    ) -> Result<Self> {
        let format = workbook.add_format();
        if let Some(color) = background {
            format.set_bg_color(color)?;
        }
        Ok(Self {
            content: content.into(),
            format: format.id(),
        })
    }

    #[must_use]
    pub fn content(&self) -> &CellValue {
        &self.content
    }
}

impl Style for FixedStyle {
    fn cell_content(&self, _column: u32, _row: u32) -> Option<CellValue> {
        Some(self.content.clone())
    }

    fn cell_format(&self, _column: u32, _row: u32) -> Option<FormatId> {
        Some(self.format)
    }
}

/// Header row followed by the table's data rows.
#[derive(Debug, Clone)]
pub struct TableStyle {
    table: Rc<Table>,
    format: FormatId,
}

impl TableStyle {
    pub fn new<W: Workbook>(workbook: &mut W, table: impl Into<Rc<Table>>) -> Self {
        Self {
            table: table.into(),
            format: workbook.add_format().id(),
        }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl Style for TableStyle {
    fn cell_content(&self, column: u32, row: u32) -> Option<CellValue> {
        let column = usize::try_from(column).ok()?;
        match row.checked_sub(1) {
            None => self
                .table
                .column_names()
                .get(column)
                .map(|name| CellValue::from(name.as_str())),
            Some(data_row) => {
                let data_row = usize::try_from(data_row).ok()?;
                self.table.get_by_index(column, data_row).cloned()
            }
        }
    }

    fn cell_format(&self, _column: u32, _row: u32) -> Option<FormatId> {
        Some(self.format)
    }
}
