//! Colour utilities
//!
//! Formats take `#RRGGBB` colours; the XLSX package stores them as ARGB.

use crate::error::{ReportError, Result};

/// Validate a colour and normalise it to upper-case `#RRGGBB`.
///
/// Accepts `#RRGGBB`, `RRGGBB` and ARGB `#AARRGGBB` (the alpha byte is
/// dropped, as Excel ignores it for fills).
pub fn normalize_hex(color: &str) -> Result<String> {
    let hex = color.trim().trim_start_matches('#');
    let rgb = match hex.len() {
        6 => hex,
        8 => hex.get(2..).unwrap_or_default(),
        _ => return Err(ReportError::Color(color.to_string())),
    };
    if !rgb.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ReportError::Color(color.to_string()));
    }
    Ok(format!("#{}", rgb.to_ascii_uppercase()))
}

/// Convert a normalised `#RRGGBB` colour to the opaque `FFRRGGBB` form used
/// in `styles.xml`.
#[must_use]
pub fn to_argb(rgb: &str) -> String {
    format!("FF{}", rgb.trim_start_matches('#'))
}
