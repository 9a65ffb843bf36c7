//! # Statement Classifier
//!
//! Pure classification of incoming SQL text. Decides whether a statement
//! may execute before it ever reaches the store:
//!
//! - Denylist check (mutating/administrative keywords)
//! - Intent-shape check (read channel = select, write channel = insert)
//! - Scope check (must reference the permitted table)
//!
//! No I/O, no state. The gateway handlers call [`classify`] exactly once
//! per statement; the execution adapter never re-validates.

mod rules;

pub use rules::{classify, Classification, Intent, PERMITTED_TABLE};
