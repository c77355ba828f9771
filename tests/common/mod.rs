//! Common test utilities.
//!
//! Helpers to build styles for layout tests and to reopen XLSX packages
//! produced by the exporter with `zip` + `quick-xml`.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::rc::Rc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use xlreport::cell_ref::parse_cell_ref;
use xlreport::memory::{MemorySheet, MemoryWorkbook};
use xlreport::style::{EmptyStyle, FixedStyle, Style};
use xlreport::types::{CellValue, Footprint};

pub const RED: &str = "#FF0000";
pub const GREEN: &str = "#00FF00";
pub const BLUE: &str = "#0000FF";

// ============================================================================
// Layout helpers
// ============================================================================

/// A fixed style with `content` on a `color` background.
pub fn fixed(workbook: &mut MemoryWorkbook, content: &str, color: &str) -> Rc<dyn Style> {
    Rc::new(FixedStyle::new(workbook, content, Some(color)).expect("valid color"))
}

pub fn empty(workbook: &mut MemoryWorkbook) -> Rc<dyn Style> {
    Rc::new(EmptyStyle::new(workbook))
}

/// Value at `(row, column)` as a string.
pub fn text(sheet: &MemorySheet, row: u32, column: u32) -> Option<&str> {
    sheet.read(row, column).and_then(CellValue::as_str)
}

/// Panic if any recorded write falls outside `footprint`.
pub fn assert_within(sheet: &MemorySheet, footprint: &Footprint) {
    for write in sheet.writes() {
        assert!(
            footprint.contains(write.column, write.row),
            "write at row {}, column {} escapes {footprint:?}",
            write.row,
            write.column
        );
    }
}

// ============================================================================
// XLSX reading helpers
// ============================================================================

/// Read one part of an XLSX package as a string.
pub fn read_part(xlsx: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(xlsx)).expect("valid ZIP");
    let mut file = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"));
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

/// Names of all parts in the package.
pub fn part_names(xlsx: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(xlsx)).expect("valid ZIP");
    archive.file_names().map(str::to_string).collect()
}

fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Sheet names from `xl/workbook.xml`, in order.
pub fn sheet_names(xlsx: &[u8]) -> Vec<String> {
    let xml = read_part(xlsx, "xl/workbook.xml");
    let mut reader = Reader::from_str(&xml);
    let mut names = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e) | Event::Start(ref e)) if e.local_name().as_ref() == b"sheet" => {
                names.extend(attr(e, b"name"));
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    names
}

/// Solid fill colours (ARGB) for each `cellXfs` entry; `None` for no fill.
pub fn xf_fills(xlsx: &[u8]) -> Vec<Option<String>> {
    let xml = read_part(xlsx, "xl/styles.xml");
    let mut reader = Reader::from_str(&xml);
    let mut fills: Vec<Option<String>> = Vec::new();
    let mut xf_fill_ids: Vec<usize> = Vec::new();
    let mut in_fills = false;
    let mut in_cell_xfs = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"fills" => in_fills = true,
                b"cellXfs" => in_cell_xfs = true,
                b"fill" if in_fills => fills.push(None),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"fgColor" if in_fills => {
                    if let Some(last) = fills.last_mut() {
                        *last = attr(e, b"rgb");
                    }
                }
                b"xf" if in_cell_xfs => {
                    xf_fill_ids.push(attr(e, b"fillId").and_then(|v| v.parse().ok()).unwrap_or(0));
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"fills" => in_fills = false,
                b"cellXfs" => in_cell_xfs = false,
                _ => {}
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    xf_fill_ids
        .into_iter()
        .map(|id| fills.get(id).cloned().flatten())
        .collect()
}

/// A cell read back from worksheet XML.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedCell {
    pub value: Option<String>,
    pub cell_type: Option<String>,
    pub style: Option<usize>,
}

/// The parts of a worksheet the exporter writes.
#[derive(Debug, Default)]
pub struct ParsedSheet {
    /// Keyed by 0-indexed `(row, col)`.
    pub cells: HashMap<(u32, u32), ParsedCell>,
    pub zero_height: bool,
    /// 0-indexed inclusive ranges of hidden columns.
    pub hidden_cols: Vec<(u32, u32)>,
    pub dimension: Option<String>,
}

impl ParsedSheet {
    pub fn value(&self, row: u32, col: u32) -> Option<&str> {
        self.cells.get(&(row, col)).and_then(|c| c.value.as_deref())
    }
}

fn start_cell(e: &BytesStart) -> ((u32, u32), ParsedCell) {
    let r = attr(e, b"r").expect("cell without r");
    let (col, row) = parse_cell_ref(&r).expect("valid cell ref");
    let cell = ParsedCell {
        value: None,
        cell_type: attr(e, b"t"),
        style: attr(e, b"s").and_then(|s| s.parse().ok()),
    };
    ((row, col), cell)
}

fn note_sheet_element(sheet: &mut ParsedSheet, e: &BytesStart) {
    match e.local_name().as_ref() {
        b"sheetFormatPr" => sheet.zero_height = attr(e, b"zeroHeight").as_deref() == Some("1"),
        b"dimension" => sheet.dimension = attr(e, b"ref"),
        b"col" if attr(e, b"hidden").as_deref() == Some("1") => {
            let min: u32 = attr(e, b"min").unwrap().parse().unwrap();
            let max: u32 = attr(e, b"max").unwrap().parse().unwrap();
            sheet.hidden_cols.push((min - 1, max - 1));
        }
        _ => {}
    }
}

/// Parse `xl/worksheets/sheet{index + 1}.xml`.
pub fn parse_sheet(xlsx: &[u8], index: usize) -> ParsedSheet {
    let xml = read_part(xlsx, &format!("xl/worksheets/sheet{}.xml", index + 1));
    let mut reader = Reader::from_str(&xml);
    reader.trim_text(true);

    let mut sheet = ParsedSheet::default();
    let mut current: Option<((u32, u32), ParsedCell)> = None;
    let mut in_text = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"c" => current = Some(start_cell(e)),
                b"v" | b"t" => in_text = true,
                _ => note_sheet_element(&mut sheet, e),
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"c" => {
                    let (key, cell) = start_cell(e);
                    sheet.cells.insert(key, cell);
                }
                _ => note_sheet_element(&mut sheet, e),
            },
            Ok(Event::Text(ref t)) if in_text => {
                if let Some((_, cell)) = current.as_mut() {
                    cell.value = Some(t.unescape().unwrap().into_owned());
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"v" | b"t" => in_text = false,
                b"c" => {
                    if let Some((key, cell)) = current.take() {
                        sheet.cells.insert(key, cell);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => panic!("bad worksheet XML: {e}"),
            _ => {}
        }
    }
    sheet
}
