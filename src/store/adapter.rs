//! # Execution Adapter
//!
//! Runs classified statements against SQLite and normalizes the outcome.
//!
//! The [`Store`] owns the process-wide connection behind a mutex; it is
//! opened once at startup and injected into the gateway handlers as
//! `Arc<Store>`. Each statement is its own implicit transaction and the
//! lock is held only for the statement's single round-trip. Statements
//! arriving here have already been approved by the classifier; nothing
//! is re-validated.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use super::bootstrap;
use super::errors::{StoreError, StoreResult};
use super::value::{Row, SqlValue};

/// Fixed sample records inserted by the seed operation.
///
/// Not user-supplied SQL; the seed path bypasses classification.
pub const SEED_ROWS: [(&str, &str); 4] = [
    ("Ada Lovelace", "1815-12-10"),
    ("Grace Hopper", "1906-12-09"),
    ("Alan Turing", "1912-06-23"),
    ("Katherine Johnson", "1918-08-26"),
];

/// Summary of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Rows the store reports as changed.
    pub affected: usize,
    /// Auto-generated key of the last inserted row; `None` when no row
    /// was inserted.
    pub insert_id: Option<i64>,
}

/// SQLite-backed store with explicit lifecycle: opened at startup,
/// dropped (and thereby closed) at shutdown.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (creating if needed) the database file and guarantees the
    /// permitted table exists. Any failure here is fatal to startup.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(|e| StoreError::Open(e.to_string()))?;
        bootstrap::ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory store (tests, throwaway serving).
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open(e.to_string()))?;
        bootstrap::ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Execution("store connection poisoned".to_string()))
    }

    /// Runs an approved read statement verbatim and returns every
    /// resulting row, columns as SQLite reports them, in SQLite's order.
    /// No column allowlist or row limit is imposed here.
    pub fn execute_read(&self, sql: &str) -> StoreResult<Vec<Row>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = stmt.query([])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut out = Row::new();
            for (i, column) in columns.iter().enumerate() {
                let value = SqlValue::from_sqlite(row.get_ref(i)?);
                out.insert(column.clone(), value.into_json());
            }
            result.push(out);
        }
        Ok(result)
    }

    /// Runs an approved write statement verbatim, with optional
    /// positional bound parameters.
    ///
    /// Bulk inserts (multiple value tuples) are supported; `insert_id`
    /// refers to the last inserted row per SQLite's semantics, and is
    /// `None` when no row was changed.
    pub fn execute_write(&self, sql: &str, params: &[SqlValue]) -> StoreResult<WriteOutcome> {
        let conn = self.conn()?;
        let affected = conn.execute(sql, rusqlite::params_from_iter(params.iter()))?;
        let insert_id = if affected > 0 {
            Some(conn.last_insert_rowid())
        } else {
            None
        };
        Ok(WriteOutcome {
            affected,
            insert_id,
        })
    }

    /// Inserts the fixed sample records in one bulk statement.
    pub fn seed(&self) -> StoreResult<WriteOutcome> {
        let tuples = vec!["(?, ?)"; SEED_ROWS.len()].join(", ");
        let sql = format!("INSERT INTO patient (name, dateOfBirth) VALUES {}", tuples);

        let params: Vec<SqlValue> = SEED_ROWS
            .iter()
            .flat_map(|(name, dob)| {
                [
                    SqlValue::Text((*name).to_string()),
                    SqlValue::Text((*dob).to_string()),
                ]
            })
            .collect();

        self.execute_write(&sql, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_on_empty_table_returns_no_rows() {
        let store = Store::in_memory().unwrap();
        let rows = store.execute_read("select * from patient").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_write_reports_affected_and_insert_id() {
        let store = Store::in_memory().unwrap();
        let outcome = store
            .execute_write(
                "insert into patient (name, dateOfBirth) values ('Ada Lovelace', '1815-12-10')",
                &[],
            )
            .unwrap();

        assert_eq!(outcome.affected, 1);
        assert_eq!(outcome.insert_id, Some(1));
    }

    #[test]
    fn test_bulk_insert_reports_last_row_id() {
        let store = Store::in_memory().unwrap();
        let outcome = store
            .execute_write(
                "insert into patient (name) values ('Ada'), ('Grace'), ('Alan')",
                &[],
            )
            .unwrap();

        assert_eq!(outcome.affected, 3);
        assert_eq!(outcome.insert_id, Some(3));
    }

    #[test]
    fn test_read_returns_columns_in_store_order() {
        let store = Store::in_memory().unwrap();
        store
            .execute_write(
                "insert into patient (name, dateOfBirth) values ('Ada Lovelace', '1815-12-10')",
                &[],
            )
            .unwrap();

        let rows = store.execute_read("select * from patient").unwrap();
        assert_eq!(rows.len(), 1);

        let columns: Vec<&String> = rows[0].keys().collect();
        assert_eq!(columns, ["id", "name", "dateOfBirth"]);
        assert_eq!(rows[0]["name"], serde_json::json!("Ada Lovelace"));
        assert_eq!(rows[0]["id"], serde_json::json!(1));
    }

    #[test]
    fn test_null_columns_surface_as_json_null() {
        let store = Store::in_memory().unwrap();
        store
            .execute_write("insert into patient (name) values ('Ada')", &[])
            .unwrap();

        let rows = store.execute_read("select * from patient").unwrap();
        assert_eq!(rows[0]["dateOfBirth"], serde_json::Value::Null);
    }

    #[test]
    fn test_store_error_carries_sqlite_message() {
        let store = Store::in_memory().unwrap();
        let err = store
            .execute_read("select nope from patient")
            .unwrap_err();

        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_seed_inserts_fixed_records() {
        let store = Store::in_memory().unwrap();
        let outcome = store.seed().unwrap();
        assert_eq!(outcome.affected, 4);
        assert_eq!(outcome.insert_id, Some(4));

        let rows = store
            .execute_read("select name, dateOfBirth from patient order by id")
            .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["name"], serde_json::json!("Ada Lovelace"));
        assert_eq!(rows[3]["name"], serde_json::json!("Katherine Johnson"));
    }

    #[test]
    fn test_bound_parameters_are_applied() {
        let store = Store::in_memory().unwrap();
        let outcome = store
            .execute_write(
                "insert into patient (name, dateOfBirth) values (?, ?)",
                &[
                    SqlValue::Text("Grace Hopper".to_string()),
                    SqlValue::Null,
                ],
            )
            .unwrap();
        assert_eq!(outcome.affected, 1);

        let rows = store
            .execute_read("select name from patient where dateOfBirth is null")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], serde_json::json!("Grace Hopper"));
    }
}
