//! Value types shared by layouts, styles and sinks.

mod cell;
mod format;
mod geometry;

pub use cell::CellValue;
pub use format::{ColumnOptions, Format, FormatId};
pub use geometry::{Footprint, Position, Size};
