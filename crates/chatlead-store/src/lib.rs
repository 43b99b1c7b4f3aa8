//! Chatlead Storage Layer
//!
//! Holds one authoritative lead record per conversation and persists it.
//!
//! # Architecture
//!
//! - [`Accumulator`]: in-memory registry of conversations, each behind its own
//!   lock so updates to one conversation never interleave while different
//!   conversations proceed in parallel
//! - [`SqliteRecordStore`]: SQLite persistence for records and processed
//!   message ids, written through from inside the per-conversation lock
//!
//! # Examples
//!
//! ```no_run
//! use chatlead_store::SqliteRecordStore;
//!
//! let store = SqliteRecordStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

mod accumulator;
mod sqlite;

pub use accumulator::{Accumulator, IngestOutcome, SharedStore};
pub use sqlite::SqliteRecordStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A lock was poisoned by a panicking writer
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}
