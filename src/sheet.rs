//! The grid sink: sheets receive absolute cell writes and visibility
//! directives, workbooks own sheets and formats.
//!
//! Layouts only ever see [`Sheet`]; styles allocate formats through
//! [`Workbook::add_format`]. Two backends implement both traits:
//! [`crate::memory`] for tests and dry runs, [`crate::export`] for `.xlsx`.

use crate::error::{ReportError, Result};
use crate::types::{CellValue, ColumnOptions, Format, FormatId};

/// Last addressable column (`XFD`).
pub const MAX_COLUMN: u32 = 16_383;

/// Last addressable row.
pub const MAX_ROW: u32 = 1_048_575;

/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// A single sheet accepting absolute-position writes.
///
/// Writes are infallible at this layer; the last write to a cell wins.
pub trait Sheet {
    fn name(&self) -> &str;

    /// Write `value` (or a blank when `None`) at 0-indexed `(row, column)`.
    fn write(&mut self, row: u32, column: u32, value: Option<CellValue>, format: Option<FormatId>);

    /// Sheet-wide directive for rows that never receive a write.
    fn set_default_row(&mut self, hide_unused_rows: bool);

    /// Properties for the inclusive column range `first_col..=last_col`.
    fn set_column(
        &mut self,
        first_col: u32,
        last_col: u32,
        width: Option<f64>,
        format: Option<FormatId>,
        options: ColumnOptions,
    );
}

/// A workbook owning sheets and the formats styles allocate.
pub trait Workbook {
    type Sheet: Sheet;

    /// Append a sheet and return it for drawing.
    fn add_worksheet(&mut self, name: &str) -> Result<&mut Self::Sheet>;

    fn worksheet(&self, index: usize) -> Option<&Self::Sheet>;

    fn worksheet_mut(&mut self, index: usize) -> Option<&mut Self::Sheet>;

    fn worksheet_count(&self) -> usize;

    /// Allocate a new, empty format.
    fn add_format(&mut self) -> &mut Format;

    fn format(&self, id: FormatId) -> Option<&Format>;
}

/// Check a new sheet name against Excel's rules and the existing names.
pub(crate) fn validate_sheet_name<'a>(
    name: &str,
    mut existing: impl Iterator<Item = &'a str>,
) -> Result<()> {
    if name.is_empty() || name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(ReportError::config(format!(
            "sheet name '{name}' must be 1 to {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if let Some(bad) = name.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(ReportError::config(format!(
            "sheet name '{name}' contains '{bad}'"
        )));
    }
    if existing.any(|n| n.eq_ignore_ascii_case(name)) {
        return Err(ReportError::config(format!(
            "sheet name '{name}' is already in use"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(""; "empty")]
    #[test_case("a/b"; "slash")]
    #[test_case("Sheet[1]"; "brackets")]
    #[test_case("abcdefghijklmnopqrstuvwxyz123456"; "too long")]
    fn test_invalid_sheet_names(name: &str) {
        assert!(validate_sheet_name(name, std::iter::empty()).is_err());
    }

    #[test]
    fn test_duplicate_sheet_name_case_insensitive() {
        let existing = ["Layouts"];
        assert!(validate_sheet_name("LAYOUTS", existing.iter().copied()).is_err());
        assert!(validate_sheet_name("Hidden", existing.iter().copied()).is_ok());
    }
}
