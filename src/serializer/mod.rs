// src/serializer/mod.rs

//! Wire-format document serializers.
//!
//! Two independent serializers share the formatting rules in this module:
//!
//! - [`UrlSetSerializer`]: renders one shard (`<urlset>`) document
//! - [`IndexSerializer`]: renders the index (`<sitemapindex>`) document
//!
//! Both are pure transformations over their accumulated entries; neither
//! performs any I/O. All text and attribute content is entity-escaped
//! (`& < > " '`) on write, so untrusted provider data cannot break the
//! document structure.

mod index;
mod urlset;

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{AppError, Result};
use crate::utils::url;

pub use index::IndexSerializer;
pub use urlset::UrlSetSerializer;

/// Standard sitemap namespace, shared by shard and index documents.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Namespace for language-alternate links.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Namespace for the image extension.
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Namespace for the video extension.
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";

/// Namespace for the news extension.
pub const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";

/// Resolves entry urls against a configured base URL.
///
/// The trailing slash on the base is stripped once at construction.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base: String,
}

impl UrlResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: url::normalize_base(base_url),
        }
    }

    /// Resolve a url: scheme-carrying urls pass through, anything else is
    /// treated as a path under the base.
    pub fn resolve(&self, href: &str) -> String {
        url::resolve(&self.base, href)
    }
}

/// Render a timestamp at calendar-date precision (ISO 8601 date only).
pub(crate) fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

pub(crate) fn xml_err(e: impl std::fmt::Display) -> AppError {
    AppError::xml(e)
}

/// Create an XML writer over an in-memory buffer.
pub(crate) fn make_writer(pretty: bool) -> Writer<Vec<u8>> {
    if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    }
}

/// Write `<name>text</name>` with entity escaping.
pub(crate) fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}

/// Finish a document: close the root element and return the rendered string.
pub(crate) fn finish_document(mut writer: Writer<Vec<u8>>, root: &str) -> Result<String> {
    writer
        .write_event(Event::End(BytesEnd::new(root)))
        .map_err(xml_err)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| AppError::xml(format!("document is not valid UTF-8: {e}")))
}
