//! Report definitions: a JSON description of styles, tables and sheets
//! that is turned into layout trees and drawn into a workbook.
//!
//! ```json
//! {
//!   "styles": { "green": { "type": "fixed", "content": "Green", "background": "#00FF00" } },
//!   "sheets": [
//!     { "name": "Data", "layout": { "type": "fixed", "style": "green", "width": 2, "height": 2 } }
//!   ]
//! }
//! ```
//!
//! Styles and tables are referenced by name. Formats are allocated in name
//! order so the same definition always yields the same workbook.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::layout::Layout;
use crate::sheet::Workbook;
use crate::style::{EmptyStyle, FixedStyle, Style, TableStyle};
use crate::table::Table;
use crate::types::{CellValue, Position};

const DEMO_JSON: &str = include_str!("../demos/example_report.json");

/// Top-level report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportDefinition {
    #[serde(default)]
    pub styles: BTreeMap<String, StyleDefinition>,
    #[serde(default)]
    pub tables: BTreeMap<String, TableDefinition>,
    pub sheets: Vec<SheetDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum StyleDefinition {
    Empty,
    Fixed {
        content: CellValue,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<String>,
    },
    Table {
        table: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDefinition {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetDefinition {
    pub name: String,
    #[serde(default)]
    pub origin: Position,
    pub layout: LayoutDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum LayoutDefinition {
    Fixed {
        style: String,
        width: u32,
        height: u32,
    },
    Table {
        style: String,
    },
    Padding {
        style: String,
        #[serde(default)]
        top: u32,
        #[serde(default)]
        right: u32,
        #[serde(default)]
        bottom: u32,
        #[serde(default)]
        left: u32,
        child: Box<LayoutDefinition>,
    },
    Row {
        style: String,
        children: Vec<LayoutDefinition>,
    },
    Column {
        style: String,
        children: Vec<LayoutDefinition>,
    },
    HideOutside {
        style: String,
        child: Box<LayoutDefinition>,
    },
}

/// A built sheet, ready to draw.
#[derive(Debug)]
pub struct ReportSheet {
    pub name: String,
    pub origin: Position,
    pub layout: Layout,
}

/// Layout trees for every sheet of a report.
#[derive(Debug)]
pub struct Report {
    pub sheets: Vec<ReportSheet>,
}

impl Report {
    /// Add one worksheet per report sheet and draw its layout.
    pub fn draw_into<W: Workbook>(&self, workbook: &mut W) -> Result<()> {
        for sheet_def in &self.sheets {
            let sheet = workbook.add_worksheet(&sheet_def.name)?;
            tracing::debug!(
                sheet = %sheet_def.name,
                origin = ?sheet_def.origin,
                size = ?sheet_def.layout.size(),
                "drawing sheet"
            );
            sheet_def.layout.draw(sheet, sheet_def.origin)?;
        }
        Ok(())
    }
}

/// Styles resolved against a workbook, by name.
struct StyleRegistry {
    styles: HashMap<String, Rc<dyn Style>>,
    table_styles: HashMap<String, Rc<TableStyle>>,
}

impl StyleRegistry {
    fn style(&self, name: &str) -> Result<Rc<dyn Style>> {
        self.styles
            .get(name)
            .map(Rc::clone)
            .ok_or_else(|| ReportError::config(format!("unknown style '{name}'")))
    }

    fn table_style(&self, name: &str) -> Result<Rc<TableStyle>> {
        if let Some(style) = self.table_styles.get(name) {
            return Ok(Rc::clone(style));
        }
        if self.styles.contains_key(name) {
            return Err(ReportError::config(format!(
                "style '{name}' is not a table style"
            )));
        }
        Err(ReportError::config(format!("unknown style '{name}'")))
    }
}

impl ReportDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The stock four-sheet example report.
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_JSON)
    }

    /// Allocate styles in `workbook` and build every sheet's layout tree.
    pub fn build<W: Workbook>(&self, workbook: &mut W) -> Result<Report> {
        if self.sheets.is_empty() {
            return Err(ReportError::config("a report needs at least one sheet"));
        }
        let tables = self.build_tables()?;
        let registry = self.build_styles(workbook, &tables)?;

        let sheets = self
            .sheets
            .iter()
            .map(|sheet| -> Result<ReportSheet> {
                let layout = build_layout(&sheet.layout, &registry).map_err(|e| match e {
                    ReportError::InvalidConfig(msg) => {
                        ReportError::InvalidConfig(format!("sheet '{}': {msg}", sheet.name))
                    }
                    other => other,
                })?;
                Ok(ReportSheet {
                    name: sheet.name.clone(),
                    origin: sheet.origin,
                    layout,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(sheets = sheets.len(), "report built");
        Ok(Report { sheets })
    }

    /// Build and draw the report into `workbook`.
    pub fn render<W: Workbook>(&self, workbook: &mut W) -> Result<()> {
        self.build(workbook)?.draw_into(workbook)
    }

    fn build_tables(&self) -> Result<HashMap<&str, Rc<Table>>> {
        self.tables
            .iter()
            .map(|(name, def)| -> Result<(&str, Rc<Table>)> {
                let mut table = Table::new(name.as_str(), def.columns.clone())?;
                for row in &def.rows {
                    table.add_row(row.clone())?;
                }
                Ok((name.as_str(), Rc::new(table)))
            })
            .collect()
    }

    fn build_styles<W: Workbook>(
        &self,
        workbook: &mut W,
        tables: &HashMap<&str, Rc<Table>>,
    ) -> Result<StyleRegistry> {
        let mut registry = StyleRegistry {
            styles: HashMap::new(),
            table_styles: HashMap::new(),
        };
        for (name, def) in &self.styles {
            let style: Rc<dyn Style> = match def {
                StyleDefinition::Empty => Rc::new(EmptyStyle::new(workbook)),
                StyleDefinition::Fixed {
                    content,
                    background,
                } => Rc::new(FixedStyle::new(
                    workbook,
                    content.clone(),
                    background.as_deref(),
                )?),
                StyleDefinition::Table { table } => {
                    let table = tables.get(table.as_str()).ok_or_else(|| {
                        ReportError::config(format!(
                            "style '{name}' references unknown table '{table}'"
                        ))
                    })?;
                    let style = Rc::new(TableStyle::new(workbook, Rc::clone(table)));
                    registry
                        .table_styles
                        .insert(name.clone(), Rc::clone(&style));
                    style
                }
            };
            registry.styles.insert(name.clone(), style);
        }
        Ok(registry)
    }
}

fn build_layout(def: &LayoutDefinition, registry: &StyleRegistry) -> Result<Layout> {
    match def {
        LayoutDefinition::Fixed {
            style,
            width,
            height,
        } => Layout::fixed(registry.style(style)?, *width, *height),
        LayoutDefinition::Table { style } => Layout::table(registry.table_style(style)?),
        LayoutDefinition::Padding {
            style,
            top,
            right,
            bottom,
            left,
            child,
        } => Layout::padding(
            registry.style(style)?,
            build_layout(child, registry)?,
            *top,
            *right,
            *bottom,
            *left,
        ),
        LayoutDefinition::Row { style, children } => Layout::row(
            registry.style(style)?,
            build_children(children, registry)?,
        ),
        LayoutDefinition::Column { style, children } => Layout::column(
            registry.style(style)?,
            build_children(children, registry)?,
        ),
        LayoutDefinition::HideOutside { style, child } => Ok(Layout::hide_outside(
            registry.style(style)?,
            build_layout(child, registry)?,
        )),
    }
}

fn build_children(defs: &[LayoutDefinition], registry: &StyleRegistry) -> Result<Vec<Layout>> {
    defs.iter().map(|d| build_layout(d, registry)).collect()
}
