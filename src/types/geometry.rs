use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Absolute or local grid position. Both axes are 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub column: u32,
    pub row: u32,
}

impl Position {
    /// Top-left corner of a sheet.
    pub const ORIGIN: Self = Self { column: 0, row: 0 };

    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Translate by `(columns, rows)`, failing instead of wrapping.
    pub fn offset(self, columns: u32, rows: u32) -> Result<Self> {
        let column = self.column.checked_add(columns).ok_or_else(|| {
            ReportError::OutOfRange(format!("column {} + {columns} overflows", self.column))
        })?;
        let row = self.row.checked_add(rows).ok_or_else(|| {
            ReportError::OutOfRange(format!("row {} + {rows} overflows", self.row))
        })?;
        Ok(Self { column, row })
    }
}

impl From<(u32, u32)> for Position {
    fn from((column, row): (u32, u32)) -> Self {
        Self { column, row }
    }
}

/// Width and height of a layout, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells covered.
    #[must_use]
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// The rectangle a layout may write to when drawn at a given origin.
///
/// The end coordinates are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub origin: Position,
    pub end_column: u32,
    pub end_row: u32,
}

impl Footprint {
    /// Anchor `size` at `origin`; fails if the far edge leaves the `u32` range.
    pub fn new(origin: Position, size: Size) -> Result<Self> {
        let end = origin.offset(size.width, size.height)?;
        Ok(Self {
            origin,
            end_column: end.column,
            end_row: end.row,
        })
    }

    #[must_use]
    pub fn contains(&self, column: u32, row: u32) -> bool {
        (self.origin.column..self.end_column).contains(&column)
            && (self.origin.row..self.end_row).contains(&row)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_overflow() {
        assert!(Position::new(u32::MAX, 0).offset(1, 0).is_err());
        assert_eq!(
            Position::new(1, 2).offset(3, 4).ok(),
            Some(Position::new(4, 6))
        );
    }

    #[test]
    fn test_footprint_contains_is_half_open() {
        let fp = Footprint::new(Position::new(1, 1), Size::new(2, 2)).unwrap();
        assert!(fp.contains(1, 1));
        assert!(fp.contains(2, 2));
        assert!(!fp.contains(3, 2));
        assert!(!fp.contains(0, 1));
    }
}
