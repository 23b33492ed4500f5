// src/changelog/memory.rs

//! In-memory change log.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::changelog::ChangeLog;
use crate::error::Result;
use crate::models::ChangeRecord;

/// Change log that keeps records in memory. Used in tests and in
/// request-driven deployments that rebuild from providers on every pass.
#[derive(Debug, Default)]
pub struct MemoryChangeLog {
    records: Mutex<Vec<ChangeRecord>>,
}

impl MemoryChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().expect("change log lock").len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.lock().expect("change log lock").is_empty()
    }
}

#[async_trait]
impl ChangeLog for MemoryChangeLog {
    async fn track(&self, record: ChangeRecord) -> Result<()> {
        self.records.lock().expect("change log lock").push(record);
        Ok(())
    }

    async fn changes_since(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ChangeRecord>> {
        let records = self.records.lock().expect("change log lock");
        Ok(records
            .iter()
            .filter(|r| since.is_none_or(|ts| r.timestamp >= ts))
            .cloned()
            .collect())
    }
}
