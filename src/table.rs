//! Tabular data rendered by [`crate::layout::TableLayout`].

use std::fmt;

use crate::error::{ReportError, Result};
use crate::types::CellValue;

/// A named table with fixed columns and rows appended one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    column_names: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table. At least one column is required.
    pub fn new<S: Into<String>>(name: impl Into<String>, column_names: Vec<S>) -> Result<Self> {
        if column_names.is_empty() {
            return Err(ReportError::config("a table needs at least one column name"));
        }
        Ok(Self {
            name: name.into(),
            column_names: column_names.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        })
    }

    /// Append a row; its length must match the number of columns.
    pub fn add_row<V: Into<CellValue>>(&mut self, row: Vec<V>) -> Result<()> {
        if row.len() != self.column_names.len() {
            return Err(ReportError::config(format!(
                "row has {} values, table '{}' has {} columns",
                row.len(),
                self.name,
                self.column_names.len()
            )));
        }
        self.rows.push(row.into_iter().map(Into::into).collect());
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.column_names.len()
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Cell at 0-indexed `(column, row)`; the header is not counted as a row.
    #[must_use]
    pub fn get_by_index(&self, column: usize, row: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Cell in the named column.
    #[must_use]
    pub fn get(&self, column_name: &str, row: usize) -> Option<&CellValue> {
        let column = self.column_names.iter().position(|c| c == column_name)?;
        self.get_by_index(column, row)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_names.join(","))?;
        for row in &self.rows {
            let values: Vec<String> = row.iter().map(ToString::to_string).collect();
            write!(f, "\n{}", values.join(","))?;
        }
        Ok(())
    }
}
