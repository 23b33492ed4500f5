// src/changelog/local.rs

//! JSON-file change log.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use crate::changelog::ChangeLog;
use crate::error::{AppError, Result};
use crate::models::ChangeRecord;

/// Change log persisted as a JSON array on disk.
///
/// Each `track` rewrites the file atomically (write to temp, then rename).
/// Suitable for batch deployments where one pass runs at a time.
#[derive(Debug, Clone)]
pub struct JsonChangeLog {
    path: PathBuf,
}

impl JsonChangeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<Vec<ChangeRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn save(&self, records: &[ChangeRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ChangeLog for JsonChangeLog {
    async fn track(&self, record: ChangeRecord) -> Result<()> {
        let mut records = self.load().await?;
        records.push(record);
        self.save(&records).await
    }

    async fn changes_since(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ChangeRecord>> {
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .filter(|r| since.is_none_or(|ts| r.timestamp >= ts))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use chrono::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let log = JsonChangeLog::new(tmp.path().join("changes.json"));

        let changes = log.changes_since(None).await.unwrap();
        assert!(changes.is_empty());
    }

    #[tokio::test]
    async fn test_track_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("changes.json");

        let log = JsonChangeLog::new(&path);
        log.track(ChangeRecord::add(Entry::new("/a"), Utc::now()))
            .await
            .unwrap();
        log.track(ChangeRecord::remove("/b", Utc::now()))
            .await
            .unwrap();

        let reopened = JsonChangeLog::new(&path);
        let changes = reopened.changes_since(None).await.unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].url, "/a");
        assert_eq!(changes[1].url, "/b");
    }

    #[tokio::test]
    async fn test_since_filter() {
        let tmp = TempDir::new().unwrap();
        let log = JsonChangeLog::new(tmp.path().join("changes.json"));

        let t0 = Utc::now();
        let t1 = t0 + Duration::minutes(5);
        log.track(ChangeRecord::add(Entry::new("/old"), t0))
            .await
            .unwrap();
        log.track(ChangeRecord::add(Entry::new("/new"), t1))
            .await
            .unwrap();

        let changes = log.changes_since(Some(t0 + Duration::minutes(1))).await.unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].url, "/new");
    }
}
