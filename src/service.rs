// src/service.rs

//! Request-driven serving facade.
//!
//! Pure composition over the generator: each request runs a full pass into
//! a fresh in-memory storage and returns the requested document. The HTTP
//! route layer owns the actual wiring; it only needs to hand the response
//! fields to its framework.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::pipeline::SitemapGenerator;
use crate::providers::UrlProvider;
use crate::storage::MemoryStorage;

/// A freshly rendered document plus the headers the route should send.
#[derive(Debug, Clone)]
pub struct SitemapResponse {
    pub body: String,
    pub content_type: &'static str,
    pub cache_control: String,
}

/// Serves sitemap documents rendered on demand.
pub struct SitemapService {
    providers: Vec<Arc<dyn UrlProvider>>,
    config: Config,
    ttl: Duration,
}

impl SitemapService {
    /// Create a service over the given providers; the cache TTL comes from
    /// the configuration.
    pub fn new(providers: Vec<Arc<dyn UrlProvider>>, config: Config) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        Self {
            providers,
            config,
            ttl,
        }
    }

    /// Render and return one document.
    ///
    /// `None` returns the index document; a filename returns that shard.
    /// An unknown filename is a not-found error, which the route layer maps
    /// to its 404.
    pub async fn respond(&self, filename: Option<&str>) -> Result<SitemapResponse> {
        let storage = Arc::new(MemoryStorage::new(&self.config.base_url));
        let generator = SitemapGenerator::new(
            self.providers.clone(),
            storage.clone(),
            self.config.clone(),
        );
        generator.generate().await?;

        let name = filename.unwrap_or(&self.config.filename);
        let body = storage
            .get(name)
            .ok_or_else(|| AppError::not_found(name))?;

        Ok(SitemapResponse {
            body,
            content_type: "application/xml",
            cache_control: format!("max-age={}", self.ttl.as_secs()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use crate::providers::StaticProvider;

    fn service(urls: &[&str], max_entries_per_file: usize) -> SitemapService {
        let entries: Vec<Entry> = urls.iter().map(|u| Entry::new(*u)).collect();
        let provider: Arc<dyn UrlProvider> = Arc::new(StaticProvider::new(entries));

        let mut config = Config::new("https://example.com");
        config.max_entries_per_file = max_entries_per_file;
        config.cache_ttl_secs = 600;

        SitemapService::new(vec![provider], config)
    }

    #[tokio::test]
    async fn test_serves_index_by_default() {
        let service = service(&["/a", "/b"], 10);

        let response = service.respond(None).await.unwrap();
        assert!(response.body.contains("<sitemapindex"));
        assert!(response.body.contains("sitemap-1.xml"));
        assert_eq!(response.content_type, "application/xml");
        assert_eq!(response.cache_control, "max-age=600");
    }

    #[tokio::test]
    async fn test_serves_named_shard() {
        let service = service(&["/a", "/b", "/c"], 2);

        let response = service.respond(Some("sitemap-2.xml")).await.unwrap();
        assert!(response.body.contains("<urlset"));
        assert!(response.body.contains("<loc>https://example.com/c</loc>"));
    }

    #[tokio::test]
    async fn test_unknown_filename_is_not_found() {
        let service = service(&["/a"], 10);

        let err = service.respond(Some("sitemap-99.xml")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_each_request_renders_fresh() {
        let service = service(&["/a"], 10);

        let first = service.respond(None).await.unwrap();
        let second = service.respond(None).await.unwrap();
        assert_eq!(first.body, second.body);
    }
}
