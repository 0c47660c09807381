//! PostgreSQL warehouse backed by an sqlx pool.

use chrono::NaiveDateTime;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::query_builder::Separated;
use sqlx::{Postgres, QueryBuilder};

use super::{Cell, ColumnType, Table, Warehouse};
use crate::config::WarehouseConfig;
use crate::error::LoadResult;
use crate::logs::log_info;

/// Postgres accepts at most this many bind parameters per statement.
const MAX_BIND_PARAMS: usize = 65_535;

/// Upper bound on rows per INSERT statement.
const MAX_ROWS_PER_INSERT: usize = 1_000;

pub struct PgWarehouse {
    pool: PgPool,
}

impl PgWarehouse {
    /// Open a single-connection pool from the configured connection string.
    pub async fn connect(config: &WarehouseConfig) -> LoadResult<Self> {
        log_info(format!("Connecting to {}", config.redacted_connection_string()));
        let options: PgConnectOptions = config.connection_string().parse()?;
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Warehouse for PgWarehouse {
    async fn replace_table(&mut self, table: &Table) -> LoadResult<()> {
        table.validate()?;

        let mut tx = self.pool.begin().await?;
        sqlx::query(&drop_table_sql(&table.name)).execute(&mut *tx).await?;
        sqlx::query(&create_table_sql(table)).execute(&mut *tx).await?;

        let prefix = insert_prefix(table);
        for chunk in table.rows.chunks(rows_per_insert(table.columns.len())) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(&prefix);
            builder.push_values(chunk, |mut b, row| {
                for (cell, col) in row.iter().zip(&table.columns) {
                    bind_cell(&mut b, cell, col.ty);
                }
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

fn bind_cell<'args>(b: &mut Separated<'_, 'args, Postgres, &'static str>, cell: &Cell, ty: ColumnType) {
    match (cell, ty) {
        (Cell::Text(s), _) => b.push_bind(s.clone()),
        (Cell::Integer(n), _) => b.push_bind(*n),
        (Cell::Timestamp(t), _) => b.push_bind(*t),
        (Cell::Null, ColumnType::Text) => b.push_bind(None::<String>),
        (Cell::Null, ColumnType::Integer) => b.push_bind(None::<i64>),
        (Cell::Null, ColumnType::Timestamp) => b.push_bind(None::<NaiveDateTime>),
    };
}

/// Double-quote an identifier so mixed-case names like `Animal_id` survive.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn drop_table_sql(name: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_ident(name))
}

pub fn create_table_sql(table: &Table) -> String {
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(c.name), c.ty.sql_type()))
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(&table.name), columns.join(", "))
}

fn insert_prefix(table: &Table) -> String {
    let columns: Vec<String> = table.columns.iter().map(|c| quote_ident(c.name)).collect();
    format!("INSERT INTO {} ({}) ", quote_ident(&table.name), columns.join(", "))
}

fn rows_per_insert(column_count: usize) -> usize {
    (MAX_BIND_PARAMS / column_count.max(1)).clamp(1, MAX_ROWS_PER_INSERT)
}
