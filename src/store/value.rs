//! # Dynamic Values
//!
//! Row shape is dictated by the statement and the store's schema, not
//! fixed at compile time. A row is an ordered mapping from column name
//! to a tagged [`SqlValue`]; column order is whatever SQLite reports.

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::Serialize;

/// One row of a read result. Keeps column order (serde_json is built
/// with `preserve_order`).
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A tagged SQL value as reported by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// 64-bit integer
    Integer(i64),
    /// Double-precision float
    Real(f64),
    /// UTF-8 text
    Text(String),
}

impl SqlValue {
    /// Converts a raw SQLite cell into a tagged value.
    ///
    /// Blobs do not occur in the permitted schema; if a statement
    /// manufactures one it is rendered as lossy UTF-8 text.
    pub fn from_sqlite(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(i) => SqlValue::Integer(i),
            ValueRef::Real(f) => SqlValue::Real(f),
            ValueRef::Text(t) => SqlValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => SqlValue::Text(String::from_utf8_lossy(b).into_owned()),
        }
    }

    /// Converts into a JSON value for the response envelope.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Integer(i) => serde_json::Value::from(i),
            SqlValue::Real(f) => serde_json::Value::from(f),
            SqlValue::Text(t) => serde_json::Value::from(t),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlValue::Null => Ok(ToSqlOutput::from(rusqlite::types::Null)),
            SqlValue::Integer(i) => Ok(ToSqlOutput::from(*i)),
            SqlValue::Real(f) => Ok(ToSqlOutput::from(*f)),
            SqlValue::Text(t) => Ok(ToSqlOutput::from(t.as_str())),
        }
    }
}
