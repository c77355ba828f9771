//! Generates `xl/styles.xml` from the workbook's formats.
//!
//! Every format gets its own `cellXfs` entry (see
//! [`super::sheet_writer::xf_index`]); formats with a background colour
//! also get a solid `patternFill`.

use crate::color::to_argb;
use crate::types::Format;

/// Fills 0 and 1 are reserved by Excel (`none` and `gray125`).
const RESERVED_FILLS: usize = 2;

pub(crate) fn write_styles_xml(formats: &[Format]) -> String {
    let mut out = String::with_capacity(1024 + formats.len() * 96);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);
    out.push('\n');

    out.push_str(concat!(
        r#"<fonts count="1"><font><sz val="11"/><color theme="1"/>"#,
        r#"<name val="Calibri"/><family val="2"/><scheme val="minor"/></font></fonts>"#,
        "\n"
    ));

    // <fills>
    let fill_colors: Vec<&str> = formats.iter().filter_map(Format::bg_color).collect();
    out.push_str(&format!(
        "<fills count=\"{}\">",
        RESERVED_FILLS + fill_colors.len()
    ));
    out.push_str(r#"<fill><patternFill patternType="none"/></fill>"#);
    out.push_str(r#"<fill><patternFill patternType="gray125"/></fill>"#);
    for color in &fill_colors {
        out.push_str(&format!(
            "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
            to_argb(color)
        ));
    }
    out.push_str("</fills>\n");

    out.push_str(concat!(
        r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
        "\n",
        r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
        "\n"
    ));

    // <cellXfs>: the default xf, then one per format in allocation order.
    out.push_str(&format!("<cellXfs count=\"{}\">", formats.len() + 1));
    out.push_str(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#);
    let mut next_fill = RESERVED_FILLS;
    for format in formats {
        if format.bg_color().is_some() {
            out.push_str(&format!(
                "<xf numFmtId=\"0\" fontId=\"0\" fillId=\"{next_fill}\" borderId=\"0\" xfId=\"0\" applyFill=\"1\"/>"
            ));
            next_fill += 1;
        } else {
            out.push_str(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#);
        }
    }
    out.push_str("</cellXfs>\n");

    out.push_str(concat!(
        r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
        "\n"
    ));
    out.push_str("</styleSheet>");
    out
}
