// src/serializer/index.rs

//! Index (`<sitemapindex>`) document serializer.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::Result;
use crate::models::IndexEntry;

use super::{SITEMAP_NS, UrlResolver, finish_document, format_date, make_writer,
    write_text_element, xml_err};

/// Accumulates shard pointers and renders the index document.
#[derive(Debug, Clone)]
pub struct IndexSerializer {
    resolver: UrlResolver,
    pretty: bool,
    entries: Vec<IndexEntry>,
}

impl IndexSerializer {
    /// Create an empty serializer for the given base URL.
    pub fn new(base_url: &str, pretty: bool) -> Self {
        Self {
            resolver: UrlResolver::new(base_url),
            pretty,
            entries: Vec::new(),
        }
    }

    /// Add one shard pointer.
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.push(entry);
    }

    /// Add a bare url, normalized to a pointer with no date.
    pub fn add_url(&mut self, url: impl Into<String>) {
        self.entries.push(IndexEntry::new(url));
    }

    /// Number of accumulated pointers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pointers have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the index document.
    ///
    /// An index with zero pointers is valid output, not an error.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = make_writer(self.pretty);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;

        let mut root = BytesStart::new("sitemapindex");
        root.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(root)).map_err(xml_err)?;

        for entry in &self.entries {
            writer
                .write_event(Event::Start(BytesStart::new("sitemap")))
                .map_err(xml_err)?;
            write_text_element(&mut writer, "loc", &self.resolver.resolve(&entry.url))?;
            if let Some(ts) = &entry.last_modified {
                write_text_element(&mut writer, "lastmod", &format_date(ts))?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("sitemap")))
                .map_err(xml_err)?;
        }

        finish_document(writer, "sitemapindex")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_index_is_valid() {
        let serializer = IndexSerializer::new("https://example.com", false);
        let xml = serializer.to_xml().unwrap();
        assert!(
            xml.contains("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">")
        );
        assert!(xml.ends_with("</sitemapindex>"));
        assert!(!xml.contains("<sitemap>"));
    }

    #[test]
    fn test_shard_pointers_rendered() {
        let mut serializer = IndexSerializer::new("https://example.com", false);
        serializer.add(
            IndexEntry::new("/sitemap-1.xml")
                .with_last_modified(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
        );
        serializer.add_url("https://example.com/sitemap-2.xml");

        let xml = serializer.to_xml().unwrap();
        assert!(xml.contains("<loc>https://example.com/sitemap-1.xml</loc>"));
        assert!(xml.contains("<lastmod>2024-01-15</lastmod>"));
        assert!(xml.contains("<loc>https://example.com/sitemap-2.xml</loc>"));
        assert_eq!(xml.matches("<sitemap>").count(), 2);
    }

    #[test]
    fn test_escapes_pointer_urls() {
        let mut serializer = IndexSerializer::new("https://example.com", false);
        serializer.add_url("/maps/sitemap.xml?v=1&rev=2");
        let xml = serializer.to_xml().unwrap();
        assert!(xml.contains("v=1&amp;rev=2"));
    }
}
