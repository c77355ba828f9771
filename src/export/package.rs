//! Assemble the OOXML package (a ZIP archive) for a workbook.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::types::Format;

use super::sheet_writer::{escape_text, write_sheet_xml};
use super::styles_writer::write_styles_xml;
use super::XlsxSheet;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Build the complete `.xlsx` file for `sheets`.
pub(crate) fn write_package(sheets: &[XlsxSheet], formats: &[Format]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    writer.start_file("[Content_Types].xml", options)?;
    writer.write_all(content_types_xml(sheets.len()).as_bytes())?;

    writer.start_file("_rels/.rels", options)?;
    writer.write_all(root_rels_xml().as_bytes())?;

    writer.start_file("xl/workbook.xml", options)?;
    writer.write_all(workbook_xml(sheets).as_bytes())?;

    writer.start_file("xl/_rels/workbook.xml.rels", options)?;
    writer.write_all(workbook_rels_xml(sheets.len()).as_bytes())?;

    writer.start_file("xl/styles.xml", options)?;
    writer.write_all(write_styles_xml(formats).as_bytes())?;

    for (idx, sheet) in sheets.iter().enumerate() {
        let xml = write_sheet_xml(sheet)?;
        tracing::debug!(sheet = %sheet.name, cells = sheet.cells.len(), "writing worksheet");
        writer.start_file(format!("xl/worksheets/sheet{}.xml", idx + 1), options)?;
        writer.write_all(xml.as_bytes())?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str(concat!(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    ));
    for i in 1..=sheet_count {
        out.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
    }
    out.push_str("</Types>");
    out
}

fn root_rels_xml() -> String {
    let mut out = String::from(XML_DECL);
    out.push_str(concat!(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
        "</Relationships>"
    ));
    out
}

fn workbook_xml(sheets: &[XlsxSheet]) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str(concat!(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        "<sheets>"
    ));
    for (idx, sheet) in sheets.iter().enumerate() {
        let n = idx + 1;
        out.push_str(&format!(
            r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            escape_text(&sheet.name)
        ));
    }
    out.push_str("</sheets></workbook>");
    out
}

/// Sheets take `rId1..=rIdN`; styles follow them.
fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 1..=sheet_count {
        out.push_str(&format!(
            r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        ));
    }
    out.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        sheet_count + 1
    ));
    out.push_str("</Relationships>");
    out
}
