//! Generates worksheet XML from a buffered [`XlsxSheet`].
//!
//! Strings use inline strings (`t="inlineStr"`) so no shared string table
//! has to be built. Cell styles reference `cellXfs` entries; format `n`
//! maps to xf `n + 1` because xf 0 is the workbook default.

use std::borrow::Cow;

use quick_xml::escape::escape;

use crate::cell_ref::{cell_ref, col_to_letter};
use crate::error::{ReportError, Result};
use crate::sheet::{MAX_COLUMN, MAX_ROW};
use crate::types::{CellValue, FormatId};

use super::{ColumnSpan, XlsxCell, XlsxSheet};

/// Default row height in points (Calibri 11).
pub(crate) const DEFAULT_ROW_HEIGHT: f64 = 15.0;

/// Default column width in character units.
pub(crate) const DEFAULT_COL_WIDTH: f64 = 8.43;

/// `cellXfs` index for a format handle.
pub(crate) fn xf_index(format: FormatId) -> usize {
    format.index() + 1
}

/// Escape `text` for XML content or attributes.
///
/// Control characters XML 1.0 forbids are written as `_xHHHH_`, the OOXML
/// escape that spreadsheet apps decode back into the original character.
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_forbidden_control) {
        return escape(text);
    }
    let mut encoded = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if is_forbidden_control(c) {
            encoded.push_str(&format!("_x{:04X}_", u32::from(c)));
        } else {
            encoded.push(c);
        }
    }
    Cow::Owned(escape(encoded.as_str()).into_owned())
}

fn is_forbidden_control(c: char) -> bool {
    c.is_ascii_control() && c != '\t' && c != '\n' && c != '\r' && c != '\u{7f}'
}

/// Write a complete worksheet XML string from an [`XlsxSheet`].
pub(crate) fn write_sheet_xml(sheet: &XlsxSheet) -> Result<String> {
    check_grid_limits(sheet)?;

    let mut out = String::with_capacity(4096 + sheet.cells.len() * 48);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    out.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push('\n');

    // <dimension>
    out.push_str(&format!("<dimension ref=\"{}\"/>\n", dimension_ref(sheet)));

    // <sheetFormatPr>
    out.push_str(&format!(
        "<sheetFormatPr defaultRowHeight=\"{DEFAULT_ROW_HEIGHT}\""
    ));
    if sheet.hide_unused_rows {
        out.push_str(" zeroHeight=\"1\"");
    }
    out.push_str("/>\n");

    // <cols>
    let columns = merge_column_spans(&sheet.columns);
    if !columns.is_empty() {
        out.push_str("<cols>\n");
        for span in &columns {
            write_col(&mut out, span);
        }
        out.push_str("</cols>\n");
    }

    // <sheetData>
    if sheet.cells.is_empty() {
        out.push_str("<sheetData/>\n");
    } else {
        out.push_str("<sheetData>\n");
        write_sheet_data(&mut out, sheet);
        out.push_str("</sheetData>\n");
    }

    out.push_str("</worksheet>");
    Ok(out)
}

fn check_grid_limits(sheet: &XlsxSheet) -> Result<()> {
    if let Some((&(row, column), _)) = sheet
        .cells
        .iter()
        .find(|((row, column), _)| *row > MAX_ROW || *column > MAX_COLUMN)
    {
        return Err(ReportError::GridLimit { row, column });
    }
    if let Some(span) = sheet.columns.iter().find(|s| s.last > MAX_COLUMN) {
        return Err(ReportError::GridLimit {
            row: 0,
            column: span.last,
        });
    }
    Ok(())
}

/// Bounding range of all written cells, e.g. `A1:C3`; `A1` for an empty sheet.
fn dimension_ref(sheet: &XlsxSheet) -> String {
    let mut keys = sheet.cells.keys();
    let Some(&(first_row, first_col)) = keys.next() else {
        return "A1".to_string();
    };
    let (mut min_col, mut max_col, mut max_row) = (first_col, first_col, first_row);
    for &(row, col) in keys {
        min_col = min_col.min(col);
        max_col = max_col.max(col);
        max_row = max_row.max(row);
    }
    let start = cell_ref(first_row, min_col);
    let end = cell_ref(max_row, max_col);
    if start == end {
        start
    } else {
        format!("{start}:{end}")
    }
}

/// Flatten possibly-overlapping directives into sorted, disjoint spans.
/// Later directives take precedence where they overlap earlier ones.
pub(crate) fn merge_column_spans(spans: &[ColumnSpan]) -> Vec<ColumnSpan> {
    let mut merged: Vec<ColumnSpan> = Vec::new();
    for span in spans {
        let mut next = Vec::with_capacity(merged.len() + 2);
        for seg in merged {
            if seg.last < span.first || seg.first > span.last {
                next.push(seg);
                continue;
            }
            if seg.first < span.first {
                next.push(ColumnSpan {
                    last: span.first - 1,
                    ..seg.clone()
                });
            }
            if seg.last > span.last {
                next.push(ColumnSpan {
                    first: span.last + 1,
                    ..seg
                });
            }
        }
        next.push(span.clone());
        next.sort_by_key(|s| s.first);
        merged = next;
    }
    merged
}

/// Write a single `<col>` element.
fn write_col(out: &mut String, span: &ColumnSpan) {
    let width = match span.width {
        Some(w) => w,
        None if span.hidden => 0.0,
        None => DEFAULT_COL_WIDTH,
    };
    // XLSX is 1-based
    out.push_str(&format!(
        "<col min=\"{}\" max=\"{}\" width=\"{width}\"",
        u64::from(span.first) + 1,
        u64::from(span.last) + 1,
    ));
    if let Some(format) = span.format {
        out.push_str(&format!(" style=\"{}\"", xf_index(format)));
    }
    if span.hidden {
        out.push_str(" hidden=\"1\"");
    }
    if span.width.is_some() || span.hidden {
        out.push_str(" customWidth=\"1\"");
    }
    out.push_str("/>\n");
}

/// Write all cell rows into `<sheetData>`.
fn write_sheet_data(out: &mut String, sheet: &XlsxSheet) {
    let mut current_row: Option<u32> = None;
    for (&(row, col), cell) in &sheet.cells {
        if current_row != Some(row) {
            if current_row.is_some() {
                out.push_str("</row>\n");
            }
            out.push_str(&format!("<row r=\"{}\"", u64::from(row) + 1));
            if sheet.hide_unused_rows {
                // Written rows must not inherit the zero default height.
                out.push_str(&format!(
                    " ht=\"{DEFAULT_ROW_HEIGHT}\" customHeight=\"1\""
                ));
            }
            out.push('>');
            current_row = Some(row);
        }
        write_cell(out, row, col, cell);
    }
    if current_row.is_some() {
        out.push_str("</row>\n");
    }
}

/// Write a single `<c>` element.
fn write_cell(out: &mut String, row: u32, col: u32, cell: &XlsxCell) {
    out.push_str(&format!("<c r=\"{}{}\"", col_to_letter(col), u64::from(row) + 1));

    if let Some(format) = cell.format {
        out.push_str(&format!(" s=\"{}\"", xf_index(format)));
    }

    match &cell.value {
        None => out.push_str("/>"),
        Some(CellValue::String(s)) => {
            out.push_str(" t=\"inlineStr\"><is>");
            if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                out.push_str("<t xml:space=\"preserve\">");
            } else {
                out.push_str("<t>");
            }
            out.push_str(&escape_text(s));
            out.push_str("</t></is></c>");
        }
        Some(CellValue::Number(n)) if n.is_finite() => {
            out.push_str(&format!("><v>{n}</v></c>"));
        }
        Some(CellValue::Number(_)) => {
            out.push_str(" t=\"e\"><v>#NUM!</v></c>");
        }
        Some(CellValue::Boolean(b)) => {
            out.push_str(&format!(" t=\"b\"><v>{}</v></c>", u8::from(*b)));
        }
    }
}
