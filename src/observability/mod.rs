//! Observability for the gateway
//!
//! Structured JSON logging only:
//! - One log line = one event
//! - Deterministic key ordering
//! - Synchronous, no buffering, no background threads
//!
//! # Usage
//!
//! ```ignore
//! use sqlgate::observability::Logger;
//!
//! Logger::info("STATEMENT_EXECUTED", &[("rows", "42")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
