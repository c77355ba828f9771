use std::rc::Rc;

use crate::error::{ReportError, Result};
use crate::sheet::Sheet;
use crate::style::Style;
use crate::types::{Position, Size};

use super::{checked_sum, fill_footprint, Layout};

/// Surrounds a child with margins painted in the padding's style.
///
/// Margins follow CSS order: top, right, bottom, left.
pub struct PaddingLayout {
    style: Rc<dyn Style>,
    child: Box<Layout>,
    top: u32,
    right: u32,
    bottom: u32,
    left: u32,
    size: Size,
}

impl PaddingLayout {
    /// At least one margin must be non-zero.
    pub fn new(
        style: Rc<dyn Style>,
        child: Layout,
        top: u32,
        right: u32,
        bottom: u32,
        left: u32,
    ) -> Result<Self> {
        if top == 0 && right == 0 && bottom == 0 && left == 0 {
            return Err(ReportError::config(
                "padding must be non-zero on at least one side; use the child directly",
            ));
        }
        let child_size = child.size();
        let size = Size::new(
            checked_sum([child_size.width, left, right].into_iter(), "padded width")?,
            checked_sum([child_size.height, top, bottom].into_iter(), "padded height")?,
        );
        Ok(Self {
            style,
            child: Box::new(child),
            top,
            right,
            bottom,
            left,
            size,
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

    #[must_use]
    pub fn child(&self) -> &Layout {
        &self.child
    }

    /// `(top, right, bottom, left)`.
    #[must_use]
    pub fn margins(&self) -> (u32, u32, u32, u32) {
        (self.top, self.right, self.bottom, self.left)
    }

    /// Paint the whole footprint with the padding style, then draw the
    /// child inside the margins over it.
    pub fn draw<S: Sheet + ?Sized>(&self, sheet: &mut S, origin: Position) -> Result<()> {
        tracing::trace!(?origin, size = ?self.size, "draw padding");
        fill_footprint(self.style(), self.size, sheet, origin)?;
        self.child
            .draw(sheet, origin.offset(self.left, self.top)?)
    }
}
