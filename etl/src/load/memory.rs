//! In-process warehouse.
//!
//! Keeps replaced tables in memory so a run can be inspected or read back
//! without a database. Can be told to reject a named table to exercise
//! the abort-on-first-failure path.

use super::{Table, Warehouse};
use crate::error::{LoadError, LoadResult};

#[derive(Debug, Default)]
pub struct MemoryWarehouse {
    tables: Vec<Table>,
    writes: Vec<String>,
    reject: Option<String>,
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A warehouse that fails when asked to replace `table`.
    pub fn rejecting(table: impl Into<String>) -> Self {
        Self {
            reject: Some(table.into()),
            ..Self::default()
        }
    }

    /// Seed a table as if a previous run had written it.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Names of tables replaced so far, in write order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl Warehouse for MemoryWarehouse {
    async fn replace_table(&mut self, table: &Table) -> LoadResult<()> {
        if self.reject.as_deref() == Some(table.name.as_str()) {
            return Err(LoadError::Rejected(table.name.clone()));
        }
        table.validate()?;

        self.tables.retain(|t| t.name != table.name);
        self.tables.push(table.clone());
        self.writes.push(table.name.clone());
        Ok(())
    }
}
