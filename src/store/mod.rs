//! # Store
//!
//! SQLite-backed execution adapter for the gateway.
//!
//! The [`Store`] owns the single connection for the process lifetime. It
//! is opened once at startup, guarantees the permitted table exists
//! before the handle is handed out, and runs already-classified
//! statements verbatim, normalizing results into dynamic rows (reads) or
//! a change summary (writes).

pub mod adapter;
pub mod bootstrap;
pub mod errors;
pub mod value;

pub use adapter::{Store, WriteOutcome, SEED_ROWS};
pub use errors::{StoreError, StoreResult};
pub use value::{Row, SqlValue};
