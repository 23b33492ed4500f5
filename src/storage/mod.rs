// src/storage/mod.rs

//! Storage abstractions for rendered documents.
//!
//! The generator only needs two operations from a backend: persist a named
//! document and answer what public URL that name maps to. Backends are thin;
//! all sharding and naming decisions happen upstream in the pipeline.

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Trait for sitemap document storage backends.
#[async_trait]
pub trait SitemapStorage: Send + Sync {
    /// Persist a rendered document under the given filename.
    async fn write(&self, filename: &str, content: &str) -> Result<()>;

    /// Public-facing URL for a previously (or about-to-be) written filename.
    ///
    /// May be absolute or base-relative; relative values are resolved
    /// against the configured base URL when they land in a document.
    fn url_for(&self, filename: &str) -> String;
}
