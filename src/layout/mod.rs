//! Layout engine: composes rectangular blocks and draws them onto a sheet.
//!
//! A [`Layout`] is an immutable tree. Each node knows its [`Size`] (fixed at
//! construction) and how to paint itself at an absolute origin:
//! - Leaves ([`FixedSizeLayout`], [`TableLayout`]) paint their footprint
//! - Composites ([`PaddingLayout`], [`RowLayout`], [`ColumnLayout`],
//!   [`HideOutsideLayout`]) paint their own style across the whole footprint
//!   first, then draw each child at a translated origin
//!
//! Children are drawn in order, so later writes land on top of earlier ones.

mod fixed;
mod hide_outside;
mod padding;
mod stack;
mod table;

use std::rc::Rc;

use crate::error::Result;
use crate::sheet::Sheet;
use crate::style::{Style, TableStyle};
use crate::types::{Footprint, Position, Size};

pub use fixed::FixedSizeLayout;
pub use hide_outside::HideOutsideLayout;
pub use padding::PaddingLayout;
pub use stack::{ColumnLayout, RowLayout};
pub use table::TableLayout;

/// A node in a layout tree.
pub enum Layout {
    Fixed(FixedSizeLayout),
    Table(TableLayout),
    Padding(PaddingLayout),
    Row(RowLayout),
    Column(ColumnLayout),
    HideOutside(HideOutsideLayout),
}

impl Layout {
    /// A `width` x `height` block filled with `style`.
    pub fn fixed(style: Rc<dyn Style>, width: u32, height: u32) -> Result<Self> {
        FixedSizeLayout::new(style, width, height).map(Self::Fixed)
    }

    /// The style's table, header row included.
    pub fn table(style: Rc<TableStyle>) -> Result<Self> {
        TableLayout::new(style).map(Self::Table)
    }

    /// `child` surrounded by margins, in CSS order.
    pub fn padding(
        style: Rc<dyn Style>,
        child: Layout,
        top: u32,
        right: u32,
        bottom: u32,
        left: u32,
    ) -> Result<Self> {
        PaddingLayout::new(style, child, top, right, bottom, left).map(Self::Padding)
    }

    /// Children side by side, left to right.
    pub fn row(style: Rc<dyn Style>, children: Vec<Layout>) -> Result<Self> {
        RowLayout::new(style, children).map(Self::Row)
    }

    /// Children stacked, top to bottom.
    pub fn column(style: Rc<dyn Style>, children: Vec<Layout>) -> Result<Self> {
        ColumnLayout::new(style, children).map(Self::Column)
    }

    /// `child` at the sheet origin with everything outside it hidden.
    pub fn hide_outside(style: Rc<dyn Style>, child: Layout) -> Self {
        Self::HideOutside(HideOutsideLayout::new(style, child))
    }

    /// Width and height in cells. Stable for the lifetime of the layout.
    #[must_use]
    pub fn size(&self) -> Size {
        match self {
            Self::Fixed(l) => l.size(),
            Self::Table(l) => l.size(),
            Self::Padding(l) => l.size(),
            Self::Row(l) => l.size(),
            Self::Column(l) => l.size(),
            Self::HideOutside(l) => l.size(),
        }
    }

    #[must_use]
    pub fn style(&self) -> &dyn Style {
        match self {
            Self::Fixed(l) => l.style(),
            Self::Table(l) => l.style(),
            Self::Padding(l) => l.style(),
            Self::Row(l) => l.style(),
            Self::Column(l) => l.style(),
            Self::HideOutside(l) => l.style(),
        }
    }

    /// Child layouts in drawing order.
    #[must_use]
    pub fn children(&self) -> &[Layout] {
        match self {
            Self::Fixed(_) | Self::Table(_) => &[],
            Self::Padding(l) => std::slice::from_ref(l.child()),
            Self::Row(l) => l.children(),
            Self::Column(l) => l.children(),
            Self::HideOutside(l) => std::slice::from_ref(l.child()),
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Table(_) => "table",
            Self::Padding(_) => "padding",
            Self::Row(_) => "row",
            Self::Column(_) => "column",
            Self::HideOutside(_) => "hide_outside",
        }
    }

    /// Footprint of this layout when drawn at `origin`.
    pub fn footprint(&self, origin: Position) -> Result<Footprint> {
        Footprint::new(origin, self.size())
    }

    /// Paint the layout with its top-left corner at `origin`.
    ///
    /// Only cells inside [`Layout::footprint`] are written.
    pub fn draw<S: Sheet + ?Sized>(&self, sheet: &mut S, origin: Position) -> Result<()> {
        match self {
            Self::Fixed(l) => l.draw(sheet, origin),
            Self::Table(l) => l.draw(sheet, origin),
            Self::Padding(l) => l.draw(sheet, origin),
            Self::Row(l) => l.draw(sheet, origin),
            Self::Column(l) => l.draw(sheet, origin),
            Self::HideOutside(l) => l.draw(sheet, origin),
        }
    }
}

impl std::fmt::Debug for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layout")
            .field("kind", &self.kind())
            .field("size", &self.size())
            .field("children", &self.children())
            .finish()
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Layout {
                fn from(layout: $ty) -> Self {
                    Self::$variant(layout)
                }
            }
        )*
    };
}

impl_from_variant! {
    Fixed => FixedSizeLayout,
    Table => TableLayout,
    Padding => PaddingLayout,
    Row => RowLayout,
    Column => ColumnLayout,
    HideOutside => HideOutsideLayout,
}

/// Paint every cell of the `size` rectangle at `origin` with `style`,
/// row by row. The style sees local indices starting at `(0, 0)`.
pub(crate) fn fill_footprint<S: Sheet + ?Sized>(
    style: &dyn Style,
    size: Size,
    sheet: &mut S,
    origin: Position,
) -> Result<()> {
    // Validates that the far edge is addressable before anything is written.
    Footprint::new(origin, size)?;
    for row in 0..size.height {
        for column in 0..size.width {
            sheet.write(
                origin.row + row,
                origin.column + column,
                style.cell_content(column, row),
                style.cell_format(column, row),
            );
        }
    }
    Ok(())
}

/// Sum `values`, failing on overflow.
pub(crate) fn checked_sum(mut values: impl Iterator<Item = u32>, what: &str) -> Result<u32> {
    values.try_fold(0u32, |acc, v| {
        acc.checked_add(v).ok_or_else(|| {
            crate::error::ReportError::OutOfRange(format!("{what} exceeds {}", u32::MAX))
        })
    })
}
