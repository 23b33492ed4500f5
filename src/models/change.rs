// src/models/change.rs

//! Change records, the durable representation of catalog history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entry;

/// The kind of change applied to a url.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Update,
    Remove,
}

/// One logged add/update/remove event tied to a url and timestamp.
///
/// `entry` carries the full record for `Add` and `Update` and is absent
/// for `Remove`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<Entry>,
    pub timestamp: DateTime<Utc>,
}

impl ChangeRecord {
    /// Record the addition of an entry.
    pub fn add(entry: Entry, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: ChangeKind::Add,
            url: entry.url.clone(),
            entry: Some(entry),
            timestamp,
        }
    }

    /// Record an update to an entry.
    pub fn update(entry: Entry, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: ChangeKind::Update,
            url: entry.url.clone(),
            entry: Some(entry),
            timestamp,
        }
    }

    /// Record the removal of a url.
    pub fn remove(url: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: ChangeKind::Remove,
            url: url.into(),
            entry: None,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let now = Utc::now();
        let add = ChangeRecord::add(Entry::new("/a"), now);
        assert_eq!(add.kind, ChangeKind::Add);
        assert_eq!(add.url, "/a");
        assert!(add.entry.is_some());

        let remove = ChangeRecord::remove("/a", now);
        assert_eq!(remove.kind, ChangeKind::Remove);
        assert!(remove.entry.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let record = ChangeRecord::add(Entry::new("/a"), Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"kind\":\"add\""));

        let parsed: ChangeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
