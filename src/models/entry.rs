// src/models/entry.rs

//! Catalog entry data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One URL record in the catalog.
///
/// The `url` field is the unique key within a generation pass: wherever an
/// entry set is materialized into a map, the last entry processed for a
/// given url wins, with no merging of fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Location, either absolute or a path resolved against the base URL
    pub url: String,

    /// Last modification time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,

    /// How frequently the page is expected to change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_frequency: Option<ChangeFrequency>,

    /// Relative priority, conventionally 0.0-1.0 (not validated or clamped)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,

    /// Language-alternate links, order-sensitive
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<Alternate>,

    /// Image extension blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,

    /// Video extension blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Video>,

    /// News extension block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<NewsMetadata>,
}

impl Entry {
    /// Create an entry with only a url.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            last_modified: None,
            change_frequency: None,
            priority: None,
            alternates: Vec::new(),
            images: Vec::new(),
            videos: Vec::new(),
            news: None,
        }
    }

    /// Set the last modification time.
    pub fn with_last_modified(mut self, ts: DateTime<Utc>) -> Self {
        self.last_modified = Some(ts);
        self
    }

    /// Set the change frequency hint.
    pub fn with_change_frequency(mut self, freq: ChangeFrequency) -> Self {
        self.change_frequency = Some(freq);
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Append a language-alternate link.
    pub fn with_alternate(mut self, alternate: Alternate) -> Self {
        self.alternates.push(alternate);
        self
    }

    /// Append an image block.
    pub fn with_image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }

    /// Append a video block.
    pub fn with_video(mut self, video: Video) -> Self {
        self.videos.push(video);
        self
    }

    /// Set the news block.
    pub fn with_news(mut self, news: NewsMetadata) -> Self {
        self.news = Some(news);
        self
    }

    /// Field equality as seen by the diff calculator.
    ///
    /// Compares `last_modified`, `change_frequency`, `priority`, and the
    /// alternates list in order. Extension blocks (`images`, `videos`,
    /// `news`) do not participate: an entry whose only change is in those
    /// blocks reports as unchanged.
    pub fn diff_eq(&self, other: &Entry) -> bool {
        self.last_modified == other.last_modified
            && self.change_frequency == other.change_frequency
            && self.priority == other.priority
            && self.alternates == other.alternates
    }
}

/// Change frequency hints for a sitemap entry.
///
/// These values indicate how frequently a page is likely to change;
/// crawlers may not follow them strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// The page changes every time it is accessed.
    Always,
    /// The page changes hourly.
    Hourly,
    /// The page changes daily.
    Daily,
    /// The page changes weekly.
    Weekly,
    /// The page changes monthly.
    Monthly,
    /// The page changes yearly.
    Yearly,
    /// The page is archived and will not change.
    Never,
}

impl ChangeFrequency {
    /// The wire-format token for this frequency.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl std::str::FromStr for ChangeFrequency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(AppError::validation(format!(
                "invalid change frequency: {s}"
            ))),
        }
    }
}

/// A language-alternate link for an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alternate {
    /// BCP 47 language tag
    pub language: String,
    /// Location of the alternate page
    pub url: String,
}

impl Alternate {
    pub fn new(language: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            url: url.into(),
        }
    }
}

/// An image attached to an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Location of the image
    pub url: String,
    /// Image title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Image caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            caption: None,
        }
    }
}

/// A video attached to an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    /// Location of the video thumbnail
    pub thumbnail_url: String,
    /// Video title
    pub title: String,
    /// Video description
    pub description: String,
}

/// News metadata attached to an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsMetadata {
    /// Publication name
    pub publication_name: String,
    /// Publication language
    pub publication_language: String,
    /// Article title
    pub title: String,
    /// Publication date
    pub publication_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_entry() -> Entry {
        Entry::new("/about")
            .with_last_modified(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
            .with_change_frequency(ChangeFrequency::Weekly)
            .with_priority(0.8)
    }

    #[test]
    fn test_diff_eq_same_fields() {
        let a = sample_entry();
        let b = sample_entry();
        assert!(a.diff_eq(&b));
    }

    #[test]
    fn test_diff_eq_detects_field_change() {
        let a = sample_entry();
        let b = sample_entry().with_priority(0.2);
        assert!(!a.diff_eq(&b));
    }

    #[test]
    fn test_diff_eq_ignores_extension_blocks() {
        let a = sample_entry();
        let b = sample_entry().with_image(Image::new("/img/hero.png"));
        assert!(a.diff_eq(&b));
    }

    #[test]
    fn test_diff_eq_alternates_order_sensitive() {
        let a = sample_entry()
            .with_alternate(Alternate::new("en", "/en/about"))
            .with_alternate(Alternate::new("de", "/de/about"));
        let b = sample_entry()
            .with_alternate(Alternate::new("de", "/de/about"))
            .with_alternate(Alternate::new("en", "/en/about"));
        assert!(!a.diff_eq(&b));
    }

    #[test]
    fn test_change_frequency_from_str() {
        assert_eq!(
            "weekly".parse::<ChangeFrequency>().unwrap(),
            ChangeFrequency::Weekly
        );
        assert_eq!(
            "WEEKLY".parse::<ChangeFrequency>().unwrap(),
            ChangeFrequency::Weekly
        );
        assert!("sometimes".parse::<ChangeFrequency>().is_err());
    }

    #[test]
    fn test_entry_json_round_trip() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"change_frequency\":\"weekly\""));

        let parsed: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
