// src/storage/local.rs

//! Local filesystem storage implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::storage::SitemapStorage;
use crate::utils::url::normalize_base;

/// Filesystem storage backend.
///
/// Documents are written atomically (write to temp, then rename) so a
/// crawler fetching mid-write never sees a truncated document.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    /// Create a storage rooted at the given directory, serving files under
    /// the given public base URL.
    pub fn new(root_dir: impl Into<PathBuf>, public_base_url: impl AsRef<str>) -> Self {
        Self {
            root_dir: root_dir.into(),
            public_base_url: normalize_base(public_base_url.as_ref()),
        }
    }

    /// Get the full path for a filename.
    fn path(&self, filename: &str) -> PathBuf {
        self.root_dir.join(filename)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SitemapStorage for LocalStorage {
    async fn write(&self, filename: &str, content: &str) -> Result<()> {
        let path = self.path(filename);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        log::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.public_base_url, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read_back() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), "https://example.com");

        storage.write("sitemap.xml", "<urlset/>").await.unwrap();

        let content = std::fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert_eq!(content, "<urlset/>");
    }

    #[tokio::test]
    async fn test_overwrite_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), "https://example.com");

        storage.write("sitemap.xml", "old").await.unwrap();
        storage.write("sitemap.xml", "new").await.unwrap();

        let content = std::fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert_eq!(content, "new");
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), "https://example.com");

        storage.write("sitemap.xml", "<urlset/>").await.unwrap();
        assert!(!tmp.path().join("sitemap.tmp").exists());
    }

    #[test]
    fn test_url_for_joins_base() {
        let storage = LocalStorage::new("/tmp/out", "https://example.com/");
        assert_eq!(
            storage.url_for("sitemap-1.xml"),
            "https://example.com/sitemap-1.xml"
        );
    }
}
