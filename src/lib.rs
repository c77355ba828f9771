//! xlreport - compose rectangular layouts into XLSX reports
//!
//! A report is a tree of [`layout::Layout`]s. Leaves paint fixed blocks or
//! tables; composites pad, line up or stack their children, or hide
//! everything outside of them. Drawing a layout turns the tree into absolute
//! cell writes on a [`sheet::Sheet`]:
//! - [`memory::MemoryWorkbook`] records writes (tests, dry runs)
//! - [`export::XlsxWorkbook`] buffers them and saves an `.xlsx` file
//!
//! Layout trees can be built in code or from a JSON [`report::ReportDefinition`].
//!
//! # Usage
//!
//! ```no_run
//! use std::rc::Rc;
//! use xlreport::export::XlsxWorkbook;
//! use xlreport::layout::Layout;
//! use xlreport::sheet::Workbook;
//! use xlreport::style::{EmptyStyle, FixedStyle, Style};
//! use xlreport::types::Position;
//!
//! # fn main() -> xlreport::error::Result<()> {
//! let mut workbook = XlsxWorkbook::new();
//! let empty: Rc<dyn Style> = Rc::new(EmptyStyle::new(&mut workbook));
//! let green: Rc<dyn Style> = Rc::new(FixedStyle::new(&mut workbook, "Green", Some("#00FF00"))?);
//!
//! let layout = Layout::hide_outside(empty, Layout::fixed(green, 4, 4)?);
//! let sheet = workbook.add_worksheet("Hidden")?;
//! layout.draw(sheet, Position::ORIGIN)?;
//! workbook.save("report.xlsx")?;
//! # Ok(())
//! # }
//! ```

pub mod cell_ref;
pub mod color;
pub mod error;
pub mod export;
pub mod layout;
pub mod memory;
pub mod report;
pub mod sheet;
pub mod style;
pub mod table;
pub mod types;

pub use error::{ReportError, Result};
pub use layout::Layout;
pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
