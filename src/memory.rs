//! In-memory workbook that records every write.
//!
//! Used by the test-suite and by the CLI's dry-run mode. Unlike the XLSX
//! backend it keeps the chronological write log, so draw order can be
//! inspected as well as the final cell contents.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::sheet::{validate_sheet_name, Sheet, Workbook};
use crate::types::{CellValue, ColumnOptions, Format, FormatId};

/// One `write` call, in the order it was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellWrite {
    pub row: u32,
    pub column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatId>,
}

/// One `set_column` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDirective {
    pub first_col: u32,
    pub last_col: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatId>,
    pub options: ColumnOptions,
}

/// Recording sheet.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySheet {
    name: String,
    writes: Vec<CellWrite>,
    #[serde(skip)]
    latest: HashMap<(u32, u32), usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hide_unused_rows: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    column_directives: Vec<ColumnDirective>,
}

impl MemorySheet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn latest_write(&self, row: u32, column: u32) -> Option<&CellWrite> {
        self.latest
            .get(&(row, column))
            .and_then(|&idx| self.writes.get(idx))
    }

    /// Current value at `(row, column)`; `None` if unwritten or blank.
    #[must_use]
    pub fn read(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.latest_write(row, column)
            .and_then(|w| w.value.as_ref())
    }

    /// Current format at `(row, column)`.
    #[must_use]
    pub fn format_at(&self, row: u32, column: u32) -> Option<FormatId> {
        self.latest_write(row, column).and_then(|w| w.format)
    }

    /// True if any write (including a blank) reached `(row, column)`.
    #[must_use]
    pub fn is_written(&self, row: u32, column: u32) -> bool {
        self.latest.contains_key(&(row, column))
    }

    /// Every write in the order received.
    #[must_use]
    pub fn writes(&self) -> &[CellWrite] {
        &self.writes
    }

    /// Number of distinct cells written.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.latest.len()
    }

    /// The last `set_default_row` directive, if any.
    #[must_use]
    pub fn hide_unused_rows(&self) -> Option<bool> {
        self.hide_unused_rows
    }

    #[must_use]
    pub fn column_directives(&self) -> &[ColumnDirective] {
        &self.column_directives
    }
}

impl Sheet for MemorySheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, row: u32, column: u32, value: Option<CellValue>, format: Option<FormatId>) {
        self.latest.insert((row, column), self.writes.len());
        self.writes.push(CellWrite {
            row,
            column,
            value,
            format,
        });
    }

    fn set_default_row(&mut self, hide_unused_rows: bool) {
        self.hide_unused_rows = Some(hide_unused_rows);
    }

    fn set_column(
        &mut self,
        first_col: u32,
        last_col: u32,
        width: Option<f64>,
        format: Option<FormatId>,
        options: ColumnOptions,
    ) {
        self.column_directives.push(ColumnDirective {
            first_col,
            last_col,
            width,
            format,
            options,
        });
    }
}

/// Recording workbook.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryWorkbook {
    sheets: Vec<MemorySheet>,
    formats: Vec<Format>,
}

impl MemoryWorkbook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sheets(&self) -> &[MemorySheet] {
        &self.sheets
    }

    #[must_use]
    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    /// Look a sheet up by name.
    #[must_use]
    pub fn sheet_by_name(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

impl Workbook for MemoryWorkbook {
    type Sheet = MemorySheet;

    fn add_worksheet(&mut self, name: &str) -> Result<&mut MemorySheet> {
        validate_sheet_name(name, self.sheets.iter().map(|s| s.name.as_str()))?;
        self.sheets.push(MemorySheet::new(name));
        self.sheets
            .last_mut()
            .ok_or_else(|| ReportError::config("sheet vanished after insert"))
    }

    fn worksheet(&self, index: usize) -> Option<&MemorySheet> {
        self.sheets.get(index)
    }

    fn worksheet_mut(&mut self, index: usize) -> Option<&mut MemorySheet> {
        self.sheets.get_mut(index)
    }

    fn worksheet_count(&self) -> usize {
        self.sheets.len()
    }

    #[allow(clippy::indexing_slicing)] // index was pushed on the line above
    fn add_format(&mut self) -> &mut Format {
        let idx = self.formats.len();
        self.formats.push(Format::new(FormatId(idx)));
        &mut self.formats[idx]
    }

    fn format(&self, id: FormatId) -> Option<&Format> {
        self.formats.get(id.index())
    }
}
