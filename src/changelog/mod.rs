// src/changelog/mod.rs

//! Change-log abstractions.
//!
//! The change log is the only durable representation of catalog history.
//! It is assumed append-only and monotonic in time; the incremental
//! pipeline replays it to answer "what changed since time T".

pub mod local;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::ChangeRecord;

// Re-export for convenience
pub use local::JsonChangeLog;
pub use memory::MemoryChangeLog;

/// Trait for change-log backends.
#[async_trait]
pub trait ChangeLog: Send + Sync {
    /// Append one change record.
    async fn track(&self, record: ChangeRecord) -> Result<()>;

    /// Fetch records with `timestamp >= since`, oldest first.
    ///
    /// `None` returns the full log.
    async fn changes_since(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ChangeRecord>>;
}
