// src/providers/mod.rs

//! URL providers, the input side of a generation pass.
//!
//! A provider hands back an [`EntrySource`]: either an already-materialized
//! collection or a lazy stream. The source is the single consumption
//! boundary, so the generator loop pulls entries one at a time through one
//! dispatch point regardless of how the provider produces them.

mod file;

use std::fmt;

use async_trait::async_trait;
use futures::stream::{BoxStream, Stream, StreamExt};

use crate::error::Result;
use crate::models::Entry;

pub use file::FileProvider;

/// A source of catalog entries, consumed once per generation pass.
#[async_trait]
pub trait UrlProvider: Send + Sync {
    /// Produce this provider's entries.
    async fn entries(&self) -> Result<EntrySource>;
}

/// Tagged union over the two shapes a provider can produce.
pub enum EntrySource {
    /// An already-materialized collection.
    Eager(std::vec::IntoIter<Entry>),
    /// A lazy sequence, consumed incrementally.
    Stream(BoxStream<'static, Result<Entry>>),
}

// Boxed streams are opaque, so Debug cannot be derived.
impl fmt::Debug for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(iter) => f.debug_tuple("Eager").field(&iter.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl EntrySource {
    /// Wrap a materialized collection.
    pub fn eager(entries: Vec<Entry>) -> Self {
        Self::Eager(entries.into_iter())
    }

    /// Wrap a lazy stream.
    pub fn stream(stream: impl Stream<Item = Result<Entry>> + Send + 'static) -> Self {
        Self::Stream(stream.boxed())
    }

    /// Pull the next entry, if any.
    pub async fn next(&mut self) -> Option<Result<Entry>> {
        match self {
            Self::Eager(iter) => iter.next().map(Ok),
            Self::Stream(stream) => stream.next().await,
        }
    }

    /// Drain the source into a vector.
    pub async fn collect(mut self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        while let Some(entry) = self.next().await {
            entries.push(entry?);
        }
        Ok(entries)
    }
}

/// Provider over a fixed, in-memory entry collection.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    entries: Vec<Entry>,
}

impl StaticProvider {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl UrlProvider for StaticProvider {
    async fn entries(&self) -> Result<EntrySource> {
        Ok(EntrySource::eager(self.entries.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_eager_source_yields_in_order() {
        let mut source = EntrySource::eager(vec![Entry::new("/a"), Entry::new("/b")]);
        assert_eq!(source.next().await.unwrap().unwrap().url, "/a");
        assert_eq!(source.next().await.unwrap().unwrap().url, "/b");
        assert!(source.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_source_yields_lazily() {
        let stream = futures::stream::iter(vec![Ok(Entry::new("/a")), Ok(Entry::new("/b"))]);
        let mut source = EntrySource::stream(stream);
        assert_eq!(source.next().await.unwrap().unwrap().url, "/a");
        assert_eq!(source.next().await.unwrap().unwrap().url, "/b");
        assert!(source.next().await.is_none());
    }

    #[tokio::test]
    async fn test_collect_propagates_errors() {
        let stream = futures::stream::iter(vec![
            Ok(Entry::new("/a")),
            Err(crate::error::AppError::provider("test", "boom")),
        ]);
        let source = EntrySource::stream(stream);
        assert!(source.collect().await.is_err());
    }

    #[test]
    fn test_source_debug_stays_opaque() {
        let eager = EntrySource::eager(vec![Entry::new("/a")]);
        assert_eq!(format!("{eager:?}"), "Eager(1)");

        let stream = EntrySource::stream(futures::stream::iter(vec![Ok(Entry::new("/a"))]));
        assert_eq!(format!("{stream:?}"), "Stream(..)");
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticProvider::new(vec![Entry::new("/a")]);
        let entries = provider.entries().await.unwrap().collect().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "/a");
    }
}
