use serde::Serialize;

use crate::color::normalize_hex;
use crate::error::Result;

/// Handle to a format owned by a workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FormatId(pub(crate) usize);

impl FormatId {
    /// Position of the format in its workbook's allocation order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Cell appearance allocated through [`crate::sheet::Workbook::add_format`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    #[serde(skip)]
    id: FormatId,
    #[serde(skip_serializing_if = "Option::is_none")]
    bg_color: Option<String>,
}

impl Format {
    pub(crate) fn new(id: FormatId) -> Self {
        Self { id, bg_color: None }
    }

    #[must_use]
    pub fn id(&self) -> FormatId {
        self.id
    }

    /// Set a solid background fill from a `#RRGGBB` colour.
    pub fn set_bg_color(&mut self, color: &str) -> Result<()> {
        self.bg_color = Some(normalize_hex(color)?);
        Ok(())
    }

    /// Background colour as `#RRGGBB` (upper case).
    #[must_use]
    pub fn bg_color(&self) -> Option<&str> {
        self.bg_color.as_deref()
    }

    /// Number of properties explicitly set on this format.
    #[must_use]
    pub fn num_properties(&self) -> usize {
        usize::from(self.bg_color.is_some())
    }

    /// True when no property has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_properties() == 0
    }
}

/// Extra options for a column range directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ColumnOptions {
    pub hidden: bool,
}

impl ColumnOptions {
    #[must_use]
    pub const fn hidden() -> Self {
        Self { hidden: true }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bg_color() {
        let mut format = Format::new(FormatId(0));
        assert_eq!(format.num_properties(), 0);
        format.set_bg_color("#0000ff").unwrap();
        assert_eq!(format.num_properties(), 1);
        assert_eq!(format.bg_color(), Some("#0000FF"));
    }

    #[test]
    fn test_set_bg_color_rejects_garbage() {
        let mut format = Format::new(FormatId(3));
        assert!(format.set_bg_color("blue").is_err());
        assert!(format.is_empty());
    }
}
