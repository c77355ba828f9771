//! Row and column composition.
//!
//! Both place children one after another along a main axis and size the
//! cross axis to the largest child. The shared logic is parameterised by
//! [`Axis`].

use std::rc::Rc;

use crate::error::{ReportError, Result};
use crate::sheet::Sheet;
use crate::style::Style;
use crate::types::{Position, Size};

use super::{checked_sum, fill_footprint, Layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "row",
            Self::Vertical => "column",
        }
    }

    /// Extent of `size` along this axis.
    fn main(self, size: Size) -> u32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    fn cross(self, size: Size) -> u32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    fn size(self, main: u32, cross: u32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    fn advance(self, cursor: Position, by: u32) -> Result<Position> {
        match self {
            Self::Horizontal => cursor.offset(by, 0),
            Self::Vertical => cursor.offset(0, by),
        }
    }
}

/// Children laid out along one axis.
struct Stack {
    axis: Axis,
    style: Rc<dyn Style>,
    children: Vec<Layout>,
    size: Size,
}

impl Stack {
    fn new(axis: Axis, style: Rc<dyn Style>, children: Vec<Layout>) -> Result<Self> {
        if children.is_empty() {
            return Err(ReportError::config(format!(
                "{} layout needs at least one child",
                axis.name()
            )));
        }
        let main = checked_sum(
            children.iter().map(|c| axis.main(c.size())),
            &format!("{} length", axis.name()),
        )?;
        let cross = children
            .iter()
            .map(|c| axis.cross(c.size()))
            .max()
            .unwrap_or_default();
        Ok(Self {
            axis,
            style,
            children,
            size: axis.size(main, cross),
        })
    }

    fn draw<S: Sheet + ?Sized>(&self, sheet: &mut S, origin: Position) -> Result<()> {
        tracing::trace!(?origin, size = ?self.size, kind = self.axis.name(), "draw stack");
        fill_footprint(self.style.as_ref(), self.size, sheet, origin)?;

        let mut cursor = origin;
        for (idx, child) in self.children.iter().enumerate() {
            child.draw(sheet, cursor)?;
            // Nothing follows the last child, and its far edge may sit on u32::MAX.
            if idx + 1 < self.children.len() {
                cursor = self.axis.advance(cursor, self.axis.main(child.size()))?;
            }
        }
        Ok(())
    }
}

/// Children side by side, left to right, top-aligned.
///
/// Width is the sum of the children's widths, height the tallest child's.
/// Cells below a shorter child keep the row's own style.
pub struct RowLayout(Stack);

impl RowLayout {
    pub fn new(style: Rc<dyn Style>, children: Vec<Layout>) -> Result<Self> {
        Stack::new(Axis::Horizontal, style, children).map(Self)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.0.size
    }

    #[must_use]
    pub fn style(&self) -> &dyn Style {
        self.0.style.as_ref()
    }

    #[must_use]
    pub fn children(&self) -> &[Layout] {
        &self.0.children
    }

    pub fn draw<S: Sheet + ?Sized>(&self, sheet: &mut S, origin: Position) -> Result<()> {
        self.0.draw(sheet, origin)
    }
}

/// Children stacked top to bottom, left-aligned.
///
/// Height is the sum of the children's heights, width the widest child's.
pub struct ColumnLayout(Stack);

impl ColumnLayout {
    pub fn new(style: Rc<dyn Style>, children: Vec<Layout>) -> Result<Self> {
        Stack::new(Axis::Vertical, style, children).map(Self)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.0.size
    }

    #[must_use]
    pub fn style(&self) -> &dyn Style {
        self.0.style.as_ref()
    }

    #[must_use]
    pub fn children(&self) -> &[Layout] {
        &self.0.children
    }

    pub fn draw<S: Sheet + ?Sized>(&self, sheet: &mut S, origin: Position) -> Result<()> {
        self.0.draw(sheet, origin)
    }
}
