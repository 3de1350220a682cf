//! SQLite access to the sample database.
//!
//! One connection, opened read-only, held for the life of a command.
//! Every tutorial operation is a read; the sample database is never
//! written after it is fetched or seeded.

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use super::models::{ColumnInfo, QueryResult, SqlValue, TableInfo};
use crate::config::Config;

/// Read-only connection wrapper around the sample database.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens an existing sample database read-only.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Sample database not found at {}. Run 'sqlcoach fetch' first.",
                path.display()
            );
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        Ok(Self { conn })
    }

    /// Opens the sample database at the configured location.
    pub fn open_default() -> Result<Self> {
        let config = Config::load()?;
        let path = config.database_path()?;
        Self::open(&path)
    }

    /// Executes a query and materializes the full result set.
    ///
    /// The engine's own error is returned unmodified for malformed queries
    /// and missing tables. No pagination, retries, or timeouts; the
    /// workload is a small local file queried by one user.
    pub fn run_query(&self, sql: &str) -> Result<QueryResult, rusqlite::Error> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let column_count = columns.len();

        let mut rows = stmt.query([])?;
        let mut materialized = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(SqlValue::from(row.get_ref(i)?));
            }
            materialized.push(values);
        }

        Ok(QueryResult {
            columns,
            rows: materialized,
        })
    }

    /// Lists user tables with their row counts, alphabetically.
    pub fn list_tables(&self) -> Result<Vec<TableInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list tables")?;

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let row_count = self.table_count(&name)?;
            tables.push(TableInfo { name, row_count });
        }
        Ok(tables)
    }

    /// Returns the row count of a single table.
    pub fn table_count(&self, table: &str) -> Result<i64> {
        // Identifiers cannot be bound as parameters; quote instead.
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.replace('"', "\"\""));
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .with_context(|| format!("Failed to count rows in table '{table}'"))?;
        Ok(count)
    }

    /// Returns the declared schema of a table via `PRAGMA table_info`.
    pub fn table_schema(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let sql = format!(
            "PRAGMA table_info(\"{}\")",
            table.replace('"', "\"\"")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    name: row.get(1)?,
                    decl_type: row.get(2)?,
                    not_null: row.get::<_, i64>(3)? != 0,
                    primary_key: row.get::<_, i64>(5)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read table schema")?;

        if columns.is_empty() {
            anyhow::bail!("No such table: {table}");
        }
        Ok(columns)
    }
}
