// src/storage/memory.rs

//! In-memory storage implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::SitemapStorage;
use crate::utils::url::normalize_base;

/// Storage backend that keeps documents in memory.
///
/// Used by the request-driven facade (each request renders into a fresh
/// instance) and by tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    public_base_url: String,
    files: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new(public_base_url: impl AsRef<str>) -> Self {
        Self {
            public_base_url: normalize_base(public_base_url.as_ref()),
            files: Mutex::new(HashMap::new()),
        }
    }

    /// Get a stored document by filename.
    pub fn get(&self, filename: &str) -> Option<String> {
        self.files.lock().expect("storage lock").get(filename).cloned()
    }

    /// Names of all stored documents, sorted.
    pub fn filenames(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .lock()
            .expect("storage lock")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.files.lock().expect("storage lock").len()
    }

    /// Whether no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.files.lock().expect("storage lock").is_empty()
    }
}

#[async_trait]
impl SitemapStorage for MemoryStorage {
    async fn write(&self, filename: &str, content: &str) -> Result<()> {
        self.files
            .lock()
            .expect("storage lock")
            .insert(filename.to_string(), content.to_string());
        Ok(())
    }

    fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.public_base_url, filename)
    }
}
