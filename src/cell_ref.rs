//! Utilities for formatting and parsing Excel-style cell references.

use crate::error::{ReportError, Result};

/// Convert a 0-indexed column to its letters (0 → "A", 26 → "AA").
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = u64::from(col) + 1; // Convert to 1-based
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or_default();
        result.insert(0, char::from(b'A' + offset));
        n /= 26;
    }
    result
}

/// Format a 0-indexed `(row, col)` pair as an A1 reference.
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), u64::from(row) + 1)
}

/// Parse a cell reference like "A1" into (col, row) where col and row are 0-indexed.
pub fn parse_cell_ref(cell_ref: &str) -> Result<(u32, u32)> {
    let invalid = || ReportError::CellRef(cell_ref.to_string());
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        if ch == '$' {
            continue;
        }
        if ch.is_ascii_alphabetic() && !saw_row {
            let upper = ch.to_ascii_uppercase();
            col = col
                .checked_mul(26)
                .and_then(|c| c.checked_add(u32::from(upper) - u32::from('A') + 1))
                .ok_or_else(invalid)?;
            saw_col = true;
        } else if let Some(digit) = ch.to_digit(10) {
            row = row
                .checked_mul(10)
                .and_then(|r| r.checked_add(digit))
                .ok_or_else(invalid)?;
            saw_row = true;
        } else {
            return Err(invalid());
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return Err(invalid());
    }

    Ok((col - 1, row - 1))
}
