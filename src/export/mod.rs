//! XLSX export backend.
//!
//! [`XlsxWorkbook`] implements the sink traits by buffering cells per sheet
//! (last write wins) and serialises everything into an OOXML package on
//! [`XlsxWorkbook::to_bytes`] / [`XlsxWorkbook::save`]. Strings are written
//! inline (`t="inlineStr"`), so no shared string table is produced.

mod package;
pub(crate) mod sheet_writer;
mod styles_writer;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::sheet::{validate_sheet_name, Sheet, Workbook};
use crate::types::{CellValue, ColumnOptions, Format, FormatId};

/// A buffered cell: value and format of the latest write.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct XlsxCell {
    pub value: Option<CellValue>,
    pub format: Option<FormatId>,
}

/// An inclusive column range with shared properties.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ColumnSpan {
    pub first: u32,
    pub last: u32,
    pub width: Option<f64>,
    pub format: Option<FormatId>,
    pub hidden: bool,
}

/// A sheet buffered for XLSX output.
#[derive(Debug, Clone, Default)]
pub struct XlsxSheet {
    name: String,
    /// Keyed by `(row, col)` so iteration is already in `<sheetData>` order.
    cells: BTreeMap<(u32, u32), XlsxCell>,
    hide_unused_rows: bool,
    columns: Vec<ColumnSpan>,
}

impl XlsxSheet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Number of distinct cells written.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl Sheet for XlsxSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, row: u32, column: u32, value: Option<CellValue>, format: Option<FormatId>) {
        // A bare blank clears the cell; there is nothing to serialise.
        if value.is_none() && format.is_none() {
            self.cells.remove(&(row, column));
            return;
        }
        self.cells.insert((row, column), XlsxCell { value, format });
    }

    fn set_default_row(&mut self, hide_unused_rows: bool) {
        self.hide_unused_rows = hide_unused_rows;
    }

    fn set_column(
        &mut self,
        first_col: u32,
        last_col: u32,
        width: Option<f64>,
        format: Option<FormatId>,
        options: ColumnOptions,
    ) {
        let (first, last) = if first_col <= last_col {
            (first_col, last_col)
        } else {
            (last_col, first_col)
        };
        self.columns.push(ColumnSpan {
            first,
            last,
            width,
            format,
            hidden: options.hidden,
        });
    }
}

/// Workbook that persists to `.xlsx`.
#[derive(Debug, Clone, Default)]
pub struct XlsxWorkbook {
    sheets: Vec<XlsxSheet>,
    formats: Vec<Format>,
}

impl XlsxWorkbook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the complete XLSX package in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.sheets.is_empty() {
            return Err(ReportError::config("a workbook needs at least one sheet"));
        }
        package::write_package(&self.sheets, &self.formats)
    }

    /// Write the package to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        tracing::info!(
            path = %path.display(),
            sheets = self.sheets.len(),
            bytes = bytes.len(),
            "workbook saved"
        );
        Ok(())
    }
}

impl Workbook for XlsxWorkbook {
    type Sheet = XlsxSheet;

    fn add_worksheet(&mut self, name: &str) -> Result<&mut XlsxSheet> {
        validate_sheet_name(name, self.sheets.iter().map(|s| s.name.as_str()))?;
        self.sheets.push(XlsxSheet::new(name));
        self.sheets
            .last_mut()
            .ok_or_else(|| ReportError::config("sheet vanished after insert"))
    }

    fn worksheet(&self, index: usize) -> Option<&XlsxSheet> {
        self.sheets.get(index)
    }

    fn worksheet_mut(&mut self, index: usize) -> Option<&mut XlsxSheet> {
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_workbook_rejected() {
        let workbook = XlsxWorkbook::new();
        assert!(matches!(
            workbook.to_bytes(),
            Err(ReportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_last_write_wins() {
        let mut workbook = XlsxWorkbook::new();
        let sheet = workbook.add_worksheet("Sheet1").unwrap();
        sheet.write(0, 0, Some("a".into()), None);
        sheet.write(0, 0, Some("b".into()), None);
        assert_eq!(sheet.cell_count(), 1);
        assert_eq!(
            sheet.cells.get(&(0, 0)).and_then(|c| c.value.clone()),
            Some(CellValue::from("b"))
        );
    }

    #[test]
    fn test_bare_blank_clears_cell() {
        let mut sheet = XlsxSheet::new("Sheet1");
        sheet.write(0, 0, Some("a".into()), None);
        sheet.write(0, 1, None, Some(FormatId(0)));
        sheet.write(0, 0, None, None);
        assert_eq!(sheet.cell_count(), 1);
        assert!(sheet.cells.contains_key(&(0, 1)));
    }

    #[test]
    fn test_reversed_column_range_is_normalised() {
        let mut sheet = XlsxSheet::new("Sheet1");
        sheet.set_column(9, 2, None, None, ColumnOptions::hidden());
        let span = sheet.columns.first().unwrap();
        assert_eq!((span.first, span.last), (2, 9));
    }
}
