// src/models/index.rs

//! Index pointer data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pointer to one shard, used only inside the index document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    /// Location of the shard document
    pub url: String,

    /// Last modification time of the shard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl IndexEntry {
    /// Create an index entry with only a url.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            last_modified: None,
        }
    }

    /// Set the last modification time.
    pub fn with_last_modified(mut self, ts: DateTime<Utc>) -> Self {
        self.last_modified = Some(ts);
        self
    }
}

impl From<&str> for IndexEntry {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for IndexEntry {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}
