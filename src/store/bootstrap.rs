//! # Store Bootstrap
//!
//! Idempotent schema creation for the permitted table. Runs before the
//! store handle is handed out, so execution never fails purely because
//! the table is missing. The table is never dropped or migrated by this
//! system.

use rusqlite::Connection;

use super::errors::{StoreError, StoreResult};

/// Create-if-absent DDL for the permitted table.
///
/// Columns: auto-generated integer key, required name, optional
/// date-of-birth. `dateOfBirth` is stored as text (ISO 8601 date).
const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS patient (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     name TEXT NOT NULL, \
     dateOfBirth TEXT\
     )";

/// Ensures the permitted table exists. Safe to call repeatedly.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute(CREATE_TABLE, [])
        .map_err(|e| StoreError::Open(e.to_string()))?;
    Ok(())
}
