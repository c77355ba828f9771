use std::rc::Rc;

use crate::error::{ReportError, Result};
use crate::sheet::{Sheet, MAX_COLUMN};
use crate::style::Style;
use crate::types::{ColumnOptions, Position, Size};

use super::{fill_footprint, Layout};

/// Shows its child at the sheet origin and hides every row and column
/// outside of it.
///
/// Meant to be the outermost layout of a sheet: anything drawn outside the
/// child's footprint ends up hidden.
pub struct HideOutsideLayout {
    style: Rc<dyn Style>,
    child: Box<Layout>,
}

impl HideOutsideLayout {
    pub fn new(style: Rc<dyn Style>, child: Layout) -> Self {
        Self {
            style,
            child: Box::new(child),
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.child.size()
    }

    #[must_use]
    pub fn style(&self) -> &dyn Style {
        self.style.as_ref()
    }

    #[must_use]
    pub fn child(&self) -> &Layout {
        &self.child
    }

    /// Must be drawn at `(0, 0)`; any other origin fails before the sheet is
    /// touched.
    pub fn draw<S: Sheet + ?Sized>(&self, sheet: &mut S, origin: Position) -> Result<()> {
        if origin != Position::ORIGIN {
            return Err(ReportError::InvalidOrigin {
                column: origin.column,
                row: origin.row,
            });
        }
        let size = self.size();
        tracing::debug!(sheet = sheet.name(), ?size, "hiding cells outside layout");

        // Rows that never receive a write stay hidden.
        sheet.set_default_row(true);

        if size.width <= MAX_COLUMN {
            sheet.set_column(size.width, MAX_COLUMN, None, None, ColumnOptions::hidden());
        }

        fill_footprint(self.style(), size, sheet, origin)?;
        self.child.draw(sheet, origin)
    }
}
