// src/serializer/urlset.rs

//! Shard (`<urlset>`) document serializer.

use quick_xml::events::{BytesDecl, BytesStart, Event};

use crate::error::{AppError, Result};
use crate::models::Entry;

use super::{
    IMAGE_NS, NEWS_NS, SITEMAP_NS, UrlResolver, VIDEO_NS, XHTML_NS, finish_document, format_date,
    make_writer, write_text_element, xml_err,
};

/// Accumulates entries and renders one shard document.
///
/// Extension namespaces (xhtml, image, video, news) are declared on the
/// root element only when at least one accumulated entry uses them.
#[derive(Debug, Clone)]
pub struct UrlSetSerializer {
    resolver: UrlResolver,
    pretty: bool,
    entries: Vec<Entry>,
}

impl UrlSetSerializer {
    /// Create an empty serializer for the given base URL.
    pub fn new(base_url: &str, pretty: bool) -> Self {
        Self {
            resolver: UrlResolver::new(base_url),
            pretty,
            entries: Vec::new(),
        }
    }

    /// Add one entry.
    ///
    /// Fails fast on an entry with a missing url, so a malformed entry can
    /// never reach the rendered document.
    pub fn add(&mut self, entry: Entry) -> Result<()> {
        if entry.url.trim().is_empty() {
            return Err(AppError::validation("entry is missing a url"));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Add a collection of entries.
    pub fn add_all(&mut self, entries: impl IntoIterator<Item = Entry>) -> Result<()> {
        for entry in entries {
            self.add(entry)?;
        }
        Ok(())
    }

    /// Number of accumulated entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the shard document.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = make_writer(self.pretty);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;

        let mut root = BytesStart::new("urlset");
        root.push_attribute(("xmlns", SITEMAP_NS));
        if self.entries.iter().any(|e| !e.alternates.is_empty()) {
            root.push_attribute(("xmlns:xhtml", XHTML_NS));
        }
        if self.entries.iter().any(|e| !e.images.is_empty()) {
            root.push_attribute(("xmlns:image", IMAGE_NS));
        }
        if self.entries.iter().any(|e| !e.videos.is_empty()) {
            root.push_attribute(("xmlns:video", VIDEO_NS));
        }
        if self.entries.iter().any(|e| e.news.is_some()) {
            root.push_attribute(("xmlns:news", NEWS_NS));
        }
        writer.write_event(Event::Start(root)).map_err(xml_err)?;

        for entry in &self.entries {
            self.write_entry(&mut writer, entry)?;
        }

        finish_document(writer, "urlset")
    }

    fn write_entry(&self, writer: &mut quick_xml::Writer<Vec<u8>>, entry: &Entry) -> Result<()> {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_err)?;

        write_text_element(writer, "loc", &self.resolver.resolve(&entry.url))?;

        if let Some(ts) = &entry.last_modified {
            write_text_element(writer, "lastmod", &format_date(ts))?;
        }
        if let Some(freq) = &entry.change_frequency {
            write_text_element(writer, "changefreq", freq.as_str())?;
        }
        if let Some(priority) = entry.priority {
            write_text_element(writer, "priority", &priority.to_string())?;
        }

        for alternate in &entry.alternates {
            let mut link = BytesStart::new("xhtml:link");
            link.push_attribute(("rel", "alternate"));
            link.push_attribute(("hreflang", alternate.language.as_str()));
            link.push_attribute(("href", self.resolver.resolve(&alternate.url).as_str()));
            writer.write_event(Event::Empty(link)).map_err(xml_err)?;
        }

        for image in &entry.images {
            writer
                .write_event(Event::Start(BytesStart::new("image:image")))
                .map_err(xml_err)?;
            write_text_element(writer, "image:loc", &self.resolver.resolve(&image.url))?;
            if let Some(title) = &image.title {
                write_text_element(writer, "image:title", title)?;
            }
            if let Some(caption) = &image.caption {
                write_text_element(writer, "image:caption", caption)?;
            }
            writer
                .write_event(Event::End(quick_xml::events::BytesEnd::new("image:image")))
                .map_err(xml_err)?;
        }

        for video in &entry.videos {
            writer
                .write_event(Event::Start(BytesStart::new("video:video")))
                .map_err(xml_err)?;
            write_text_element(
                writer,
                "video:thumbnail_loc",
                &self.resolver.resolve(&video.thumbnail_url),
            )?;
            write_text_element(writer, "video:title", &video.title)?;
            write_text_element(writer, "video:description", &video.description)?;
            writer
                .write_event(Event::End(quick_xml::events::BytesEnd::new("video:video")))
                .map_err(xml_err)?;
        }

        if let Some(news) = &entry.news {
            writer
                .write_event(Event::Start(BytesStart::new("news:news")))
                .map_err(xml_err)?;
            writer
                .write_event(Event::Start(BytesStart::new("news:publication")))
                .map_err(xml_err)?;
            write_text_element(writer, "news:name", &news.publication_name)?;
            write_text_element(writer, "news:language", &news.publication_language)?;
            writer
                .write_event(Event::End(quick_xml::events::BytesEnd::new(
                    "news:publication",
                )))
                .map_err(xml_err)?;
            write_text_element(
                writer,
                "news:publication_date",
                &format_date(&news.publication_date),
            )?;
            write_text_element(writer, "news:title", &news.title)?;
            writer
                .write_event(Event::End(quick_xml::events::BytesEnd::new("news:news")))
                .map_err(xml_err)?;
        }

        writer
            .write_event(Event::End(quick_xml::events::BytesEnd::new("url")))
            .map_err(xml_err)?;
        Ok(())
    }
}
