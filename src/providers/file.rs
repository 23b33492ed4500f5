// src/providers/file.rs

//! Seed-file provider.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Entry;

use super::{EntrySource, UrlProvider};

/// Provider that reads a JSON array of entries from disk.
///
/// This is the adapter the CLI uses: a build step dumps the site's URL
/// catalog to a JSON file and the generator consumes it from there.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UrlProvider for FileProvider {
    async fn entries(&self) -> Result<EntrySource> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| AppError::provider(self.path.display().to_string(), e))?;
        let entries: Vec<Entry> = serde_json::from_slice(&bytes)?;
        Ok(EntrySource::eager(entries))
    }
}
