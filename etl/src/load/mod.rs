//! Load stage: write the star schema into a warehouse.
//!
//! Tables cross the warehouse seam as a [`Table`]: a name, explicit column
//! definitions and rows of typed [`Cell`]s. Every write replaces the
//! destination table wholesale. There is no transaction spanning tables, so
//! a failure part-way leaves earlier tables replaced and later ones stale.

pub mod memory;
pub mod postgres;
pub mod tables;

pub use memory::MemoryWarehouse;
pub use postgres::PgWarehouse;
pub use tables::star_tables;

use chrono::NaiveDateTime;

use crate::error::{LoadError, LoadResult};
use crate::logs::{log_info, log_info_indent, log_success};
use crate::models::StarSchema;

// =============================================================================
// Table model
// =============================================================================

/// Destination column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Unbounded character string
    Text,
    Integer,
    Timestamp,
}

impl ColumnType {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "BIGINT",
            ColumnType::Timestamp => "TIMESTAMP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
}

impl ColumnDef {
    pub const fn text(name: &'static str) -> Self {
        Self { name, ty: ColumnType::Text }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self { name, ty: ColumnType::Integer }
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self { name, ty: ColumnType::Timestamp }
    }
}

/// A single value. `Null` fits any column type.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Integer(i64),
    Timestamp(NaiveDateTime),
}

impl Cell {
    pub fn text(value: &Option<String>) -> Self {
        value.as_ref().map_or(Cell::Null, |s| Cell::Text(s.clone()))
    }

    pub fn integer(value: Option<i64>) -> Self {
        value.map_or(Cell::Null, Cell::Integer)
    }

    pub fn timestamp(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Cell::Null, Cell::Timestamp)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    fn fits(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Cell::Null, _)
                | (Cell::Text(_), ColumnType::Text)
                | (Cell::Integer(_), ColumnType::Integer)
                | (Cell::Timestamp(_), ColumnType::Timestamp)
        )
    }
}

/// A named table ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[ColumnDef]) -> Self {
        Self {
            name: name.into(),
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Check every row against the column definitions.
    pub fn validate(&self) -> LoadResult<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(LoadError::RowShape {
                    table: self.name.clone(),
                    row: i,
                    found: row.len(),
                    expected: self.columns.len(),
                });
            }
            if let Some((_, col)) = row.iter().zip(&self.columns).find(|(cell, col)| !cell.fits(col.ty)) {
                return Err(LoadError::CellType {
                    table: self.name.clone(),
                    row: i,
                    column: col.name.to_string(),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Warehouse seam
// =============================================================================

/// A relational store that accepts whole-table replacements.
#[allow(async_fn_in_trait)]
pub trait Warehouse {
    /// Drop `table.name` if it exists, recreate it from the column
    /// definitions and insert every row. No keys or constraints are declared.
    async fn replace_table(&mut self, table: &Table) -> LoadResult<()>;
}

/// Write the five star schema tables, aborting on the first failure.
///
/// Returns the number of tables written.
pub async fn load<W: Warehouse>(warehouse: &mut W, schema: &StarSchema) -> LoadResult<usize> {
    log_info("💾 Loading warehouse tables...");

    let tables = star_tables(schema);
    for table in &tables {
        log_info_indent(format!("Replacing {} ({} rows)", table.name, table.rows.len()), 1);
        warehouse.replace_table(table).await?;
    }

    log_success(format!("{} tables replaced", tables.len()));
    Ok(tables.len())
}
