// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL that path-only entry urls are resolved against
    #[serde(default)]
    pub base_url: String,

    /// Maximum entries per shard file (the public protocol ceiling)
    #[serde(default = "defaults::max_entries_per_file")]
    pub max_entries_per_file: usize,

    /// Output filename for the index document; shards derive from its stem
    #[serde(default = "defaults::filename")]
    pub filename: String,

    /// Indent the rendered documents (cosmetic only)
    #[serde(default)]
    pub pretty: bool,

    /// Cache TTL in seconds for request-driven serving
    #[serde(default = "defaults::cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Seed the change log with one add record per entry after a full pass
    #[serde(default)]
    pub auto_track: bool,
}

impl Config {
    /// Create a configuration with defaults for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::validation("base_url is empty"));
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(AppError::validation(format!(
                "base_url is not a valid URL: {}",
                self.base_url
            )));
        }
        if self.max_entries_per_file == 0 {
            return Err(AppError::validation("max_entries_per_file must be > 0"));
        }
        if self.filename.trim().is_empty() {
            return Err(AppError::validation("filename is empty"));
        }
        Ok(())
    }

    /// Shard filename for a 1-based shard number, derived from the index
    /// filename stem.
    pub fn shard_filename(&self, shard_number: usize) -> String {
        let stem = self
            .filename
            .strip_suffix(".xml")
            .unwrap_or(&self.filename);
        format!("{stem}-{shard_number}.xml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_entries_per_file: defaults::max_entries_per_file(),
            filename: defaults::filename(),
            pretty: false,
            cache_ttl_secs: defaults::cache_ttl_secs(),
            auto_track: false,
        }
    }
}

mod defaults {
    pub fn max_entries_per_file() -> usize {
        50_000
    }

    pub fn filename() -> String {
        "sitemap.xml".to_string()
    }

    pub fn cache_ttl_secs() -> u64 {
        3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_entries_per_file, 50_000);
        assert_eq!(config.filename, "sitemap.xml");
        assert!(!config.pretty);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::default().validate().is_err());

        let mut config = Config::new("https://example.com");
        assert!(config.validate().is_ok());

        config.max_entries_per_file = 0;
        assert!(config.validate().is_err());

        let config = Config::new("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shard_filename_from_stem() {
        let config = Config::new("https://example.com");
        assert_eq!(config.shard_filename(1), "sitemap-1.xml");
        assert_eq!(config.shard_filename(12), "sitemap-12.xml");

        let mut config = Config::new("https://example.com");
        config.filename = "catalog.xml".to_string();
        assert_eq!(config.shard_filename(3), "catalog-3.xml");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
            base_url = "https://example.com"
            max_entries_per_file = 100
            pretty = true
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.max_entries_per_file, 100);
        assert!(config.pretty);
        assert_eq!(config.filename, "sitemap.xml");
    }
}
