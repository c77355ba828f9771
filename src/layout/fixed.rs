use std::rc::Rc;

use crate::error::{ReportError, Result};
use crate::sheet::Sheet;
use crate::style::Style;
use crate::types::{Position, Size};

use super::fill_footprint;

/// A block of a fixed number of cells, painted entirely with one style.
pub struct FixedSizeLayout {
    style: Rc<dyn Style>,
    size: Size,
}

impl FixedSizeLayout {
    /// Both dimensions must be at least 1.
    pub fn new(style: Rc<dyn Style>, width: u32, height: u32) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(ReportError::config(format!(
                "fixed layout needs positive dimensions, got {width}x{height}"
            )));
        }
        Ok(Self {
            style,
            size: Size::new(width, height),
        })
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn style(&self) -> &dyn Style {
        self.style.as_ref()
    }

    pub fn draw<S: Sheet + ?Sized>(&self, sheet: &mut S, origin: Position) -> Result<()> {
        tracing::trace!(?origin, size = ?self.size, "draw fixed");
        fill_footprint(self.style(), self.size, sheet, origin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::layout::test_support::{fixed_style, text, GREEN};
    use crate::memory::{MemorySheet, MemoryWorkbook};
    use test_case::test_case;

    #[test_case(0, 1; "zero width")]
    #[test_case(1, 0; "zero height")]
    #[test_case(0, 0; "both zero")]
    fn test_invalid_dimensions(width: u32, height: u32) {
        let mut workbook = MemoryWorkbook::new();
        let style = fixed_style(&mut workbook, "FixedContent", GREEN);
        let err = FixedSizeLayout::new(style, width, height).err().unwrap();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }

    #[test]
    fn test_size() {
        let mut workbook = MemoryWorkbook::new();
        let style = fixed_style(&mut workbook, "FixedContent", GREEN);
        let layout = FixedSizeLayout::new(style, 3, 1).unwrap();
        assert_eq!(layout.size(), Size::new(3, 1));
        assert_eq!(layout.size(), layout.size());
    }

    #[test]
    fn test_draw() {
        let mut workbook = MemoryWorkbook::new();
        let style = fixed_style(&mut workbook, "FixedContent", GREEN);
        let layout = FixedSizeLayout::new(style, 2, 2).unwrap();

        let mut sheet = MemorySheet::new("Sheet1");
        layout.draw(&mut sheet, Position::new(1, 1)).unwrap();

        assert_eq!(text(&sheet, 0, 0), None); // Before the origin
        assert_eq!(text(&sheet, 1, 1), Some("FixedContent"));
        assert_eq!(text(&sheet, 1, 2), Some("FixedContent"));
        assert_eq!(text(&sheet, 1, 3), None);
        assert_eq!(text(&sheet, 2, 1), Some("FixedContent"));
        assert_eq!(text(&sheet, 2, 2), Some("FixedContent"));
        assert_eq!(text(&sheet, 3, 1), None);
        assert_eq!(text(&sheet, 3, 3), None);
        assert_eq!(sheet.writes().len(), 4);
    }

    #[test]
    fn test_draw_is_row_major() {
        let mut workbook = MemoryWorkbook::new();
        let style = fixed_style(&mut workbook, "x", GREEN);
        let layout = FixedSizeLayout::new(style, 2, 2).unwrap();

        let mut sheet = MemorySheet::new("Sheet1");
        layout.draw(&mut sheet, Position::new(5, 0)).unwrap();

        let order: Vec<(u32, u32)> = sheet.writes().iter().map(|w| (w.row, w.column)).collect();
        assert_eq!(order, vec![(0, 5), (0, 6), (1, 5), (1, 6)]);
    }

    #[test]
    fn test_draw_past_addressable_range_writes_nothing() {
        let mut workbook = MemoryWorkbook::new();
        let style = fixed_style(&mut workbook, "x", GREEN);
        let layout = FixedSizeLayout::new(style, 2, 1).unwrap();

        let mut sheet = MemorySheet::new("Sheet1");
        let result = layout.draw(&mut sheet, Position::new(u32::MAX - 1, 0));
        assert!(matches!(result, Err(ReportError::OutOfRange(_))));
        assert!(sheet.writes().is_empty());
    }
}
