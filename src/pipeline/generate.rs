// src/pipeline/generate.rs

//! Catalog generation: providers → shards → storage writes → index write.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::Result;
use crate::models::IndexEntry;
use crate::providers::UrlProvider;
use crate::serializer::{IndexSerializer, UrlSetSerializer};
use crate::storage::SitemapStorage;

/// Metadata about one completed generation pass.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Number of shard files written
    pub shard_count: usize,
    /// Total entries across all shards
    pub entry_count: usize,
    /// Public URL of the index document
    pub index_url: String,
    /// Timestamp of the pass
    pub timestamp: DateTime<Utc>,
}

/// Turns an ordered list of providers into a sharded, stored catalog plus
/// index document.
///
/// Entries are pulled one at a time, so memory use is bounded by
/// `max_entries_per_file` rather than total catalog size. Providers are
/// drained strictly in order, storage writes are sequential and awaited,
/// and the index is written last. A failed write aborts the pass with no
/// index write and no rollback of already-flushed shards; callers retry
/// the whole pass.
pub struct SitemapGenerator {
    providers: Vec<Arc<dyn UrlProvider>>,
    storage: Arc<dyn SitemapStorage>,
    config: Config,
}

impl SitemapGenerator {
    /// Create a generator over the given providers and storage.
    pub fn new(
        providers: Vec<Arc<dyn UrlProvider>>,
        storage: Arc<dyn SitemapStorage>,
        config: Config,
    ) -> Self {
        Self {
            providers,
            storage,
            config,
        }
    }

    /// The providers this generator consumes, in order.
    pub fn providers(&self) -> &[Arc<dyn UrlProvider>] {
        &self.providers
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one full generation pass.
    ///
    /// Shards are numbered contiguously from 1. Every non-final shard holds
    /// exactly `max_entries_per_file` entries; a shard with zero entries is
    /// never written. The index document is written unconditionally, even
    /// for an empty catalog.
    pub async fn generate(&self) -> Result<GenerationSummary> {
        let mut index = IndexSerializer::new(&self.config.base_url, self.config.pretty);
        let mut shard = self.new_shard();
        let mut next_shard = 1usize;
        let mut entry_count = 0usize;

        for provider in &self.providers {
            let mut source = provider.entries().await?;
            while let Some(entry) = source.next().await {
                shard.add(entry?)?;
                entry_count += 1;

                if shard.len() >= self.config.max_entries_per_file {
                    self.flush_shard(&mut shard, &mut index, &mut next_shard)
                        .await?;
                }
            }
        }

        if !shard.is_empty() {
            self.flush_shard(&mut shard, &mut index, &mut next_shard)
                .await?;
        }

        let index_xml = index.to_xml()?;
        self.storage.write(&self.config.filename, &index_xml).await?;
        let index_url = self.storage.url_for(&self.config.filename);

        let shard_count = next_shard - 1;
        log::info!(
            "Generation pass complete: {} entries in {} shards, index at {}",
            entry_count,
            shard_count,
            index_url
        );

        Ok(GenerationSummary {
            shard_count,
            entry_count,
            index_url,
            timestamp: Utc::now(),
        })
    }

    fn new_shard(&self) -> UrlSetSerializer {
        UrlSetSerializer::new(&self.config.base_url, self.config.pretty)
    }

    /// Serialize the active shard, persist it, register it in the index,
    /// and reset the accumulator.
    async fn flush_shard(
        &self,
        shard: &mut UrlSetSerializer,
        index: &mut IndexSerializer,
        next_shard: &mut usize,
    ) -> Result<()> {
        let filename = self.config.shard_filename(*next_shard);
        let xml = shard.to_xml()?;
        self.storage.write(&filename, &xml).await?;

        index.add(IndexEntry::new(self.storage.url_for(&filename)).with_last_modified(Utc::now()));
        log::info!("Flushed shard {} ({} entries)", filename, shard.len());

        *next_shard += 1;
        *shard = self.new_shard();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use crate::providers::{EntrySource, StaticProvider};
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;

    fn test_config(max_entries_per_file: usize) -> Config {
        let mut config = Config::new("https://example.com");
        config.max_entries_per_file = max_entries_per_file;
        config
    }

    fn entries(urls: &[&str]) -> Vec<Entry> {
        urls.iter().map(|u| Entry::new(*u)).collect()
    }

    fn generator(
        providers: Vec<Arc<dyn UrlProvider>>,
        max_entries_per_file: usize,
    ) -> (SitemapGenerator, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new("https://example.com"));
        let generator =
            SitemapGenerator::new(providers, storage.clone(), test_config(max_entries_per_file));
        (generator, storage)
    }

    #[tokio::test]
    async fn test_five_entries_two_per_shard() {
        let provider = Arc::new(StaticProvider::new(entries(&[
            "/a", "/b", "/c", "/d", "/e",
        ])));
        let (generator, storage) = generator(vec![provider], 2);

        let summary = generator.generate().await.unwrap();
        assert_eq!(summary.shard_count, 3);
        assert_eq!(summary.entry_count, 5);

        assert_eq!(
            storage.filenames(),
            vec![
                "sitemap-1.xml",
                "sitemap-2.xml",
                "sitemap-3.xml",
                "sitemap.xml"
            ]
        );

        let shard1 = storage.get("sitemap-1.xml").unwrap();
        assert!(shard1.contains("<loc>https://example.com/a</loc>"));
        assert!(shard1.contains("<loc>https://example.com/b</loc>"));
        assert!(!shard1.contains("/c<"));

        let shard3 = storage.get("sitemap-3.xml").unwrap();
        assert!(shard3.contains("<loc>https://example.com/e</loc>"));
        assert_eq!(shard3.matches("<url>").count(), 1);

        let index = storage.get("sitemap.xml").unwrap();
        assert_eq!(index.matches("<sitemap>").count(), 3);
        assert!(index.contains("<loc>https://example.com/sitemap-1.xml</loc>"));
        assert!(index.contains("<loc>https://example.com/sitemap-2.xml</loc>"));
        assert!(index.contains("<loc>https://example.com/sitemap-3.xml</loc>"));
    }

    #[tokio::test]
    async fn test_exact_multiple_leaves_no_partial_shard() {
        let provider = Arc::new(StaticProvider::new(entries(&["/a", "/b", "/c", "/d"])));
        let (generator, storage) = generator(vec![provider], 2);

        let summary = generator.generate().await.unwrap();
        assert_eq!(summary.shard_count, 2);
        assert_eq!(storage.len(), 3); // two shards + index
    }

    #[tokio::test]
    async fn test_empty_catalog_writes_only_empty_index() {
        let provider = Arc::new(StaticProvider::new(vec![]));
        let (generator, storage) = generator(vec![provider], 2);

        let summary = generator.generate().await.unwrap();
        assert_eq!(summary.shard_count, 0);
        assert_eq!(summary.entry_count, 0);

        assert_eq!(storage.filenames(), vec!["sitemap.xml"]);
        let index = storage.get("sitemap.xml").unwrap();
        assert!(!index.contains("<sitemap>"));
    }

    #[tokio::test]
    async fn test_multiple_providers_drained_in_order() {
        let first = Arc::new(StaticProvider::new(entries(&["/a", "/b"])));
        let second = Arc::new(StaticProvider::new(entries(&["/c"])));
        let (generator, storage) = generator(vec![first, second], 2);

        let summary = generator.generate().await.unwrap();
        assert_eq!(summary.shard_count, 2);

        let shard1 = storage.get("sitemap-1.xml").unwrap();
        assert!(shard1.contains("/a<"));
        assert!(shard1.contains("/b<"));
        let shard2 = storage.get("sitemap-2.xml").unwrap();
        assert!(shard2.contains("/c<"));
    }

    struct LazyProvider {
        urls: Vec<&'static str>,
    }

    #[async_trait]
    impl UrlProvider for LazyProvider {
        async fn entries(&self) -> crate::error::Result<EntrySource> {
            let items: Vec<_> = self.urls.iter().map(|u| Ok(Entry::new(*u))).collect();
            Ok(EntrySource::stream(futures::stream::iter(items)))
        }
    }

    #[tokio::test]
    async fn test_lazy_provider_sharded_identically() {
        let provider = Arc::new(LazyProvider {
            urls: vec!["/a", "/b", "/c"],
        });
        let (generator, storage) = generator(vec![provider], 2);

        let summary = generator.generate().await.unwrap();
        assert_eq!(summary.shard_count, 2);
        assert_eq!(summary.entry_count, 3);
        assert_eq!(storage.len(), 3);
    }

    #[tokio::test]
    async fn test_provider_error_aborts_pass_without_index() {
        struct FailingProvider;

        #[async_trait]
        impl UrlProvider for FailingProvider {
            async fn entries(&self) -> crate::error::Result<EntrySource> {
                Err(crate::error::AppError::provider("failing", "unreachable"))
            }
        }

        let ok = Arc::new(StaticProvider::new(entries(&["/a", "/b"])));
        let bad = Arc::new(FailingProvider);
        let (generator, storage) =
            generator(vec![ok as Arc<dyn UrlProvider>, bad as Arc<dyn UrlProvider>], 2);

        assert!(generator.generate().await.is_err());
        // The first shard flushed before the failure, but no index exists.
        assert!(storage.get("sitemap.xml").is_none());
        assert!(storage.get("sitemap-1.xml").is_some());
    }

    #[tokio::test]
    async fn test_ceil_division_shard_count() {
        for (n, m, expected) in [(1, 1, 1), (10, 3, 4), (9, 3, 3), (50, 7, 8)] {
            let urls: Vec<String> = (0..n).map(|i| format!("/page/{i}")).collect();
            let provider = Arc::new(StaticProvider::new(
                urls.iter().map(|u| Entry::new(u.as_str())).collect(),
            ));
            let (generator, _storage) = generator(vec![provider], m);

            let summary = generator.generate().await.unwrap();
            assert_eq!(summary.shard_count, expected, "N={n} M={m}");
        }
    }
}
