//! sqlgate - A guarded SQL execution gateway
//!
//! Accepts textual SQL over HTTP and executes it against a single-table
//! SQLite store, but only after a restrictive classification gate.

pub mod classifier;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
