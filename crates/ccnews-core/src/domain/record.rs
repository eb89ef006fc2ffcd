//! Capture records decoded from WARC containers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article fields extracted from a page's HTML.
///
/// Every field is optional; the whole struct being absent on a
/// [`CaptureRecord`] means extraction produced nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub hostname: Option<String>,
    pub tags: Option<String>,
    pub categories: Option<String>,
    /// Main article text with boilerplate removed.
    pub text: Option<String>,
    /// Publication date declared by the page.
    pub date: Option<DateTime<Utc>>,
    /// When the page was captured.
    pub date_crawled: Option<DateTime<Utc>>,
}

impl ExtractedContent {
    /// True when no field carries a value.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.title.is_none()
            && self.excerpt.is_none()
            && self.hostname.is_none()
            && self.tags.is_none()
            && self.categories.is_none()
            && self.text.is_none()
            && self.date.is_none()
            && self.date_crawled.is_none()
    }
}

/// One record decoded from a capture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// `WARC-Record-ID` header.
    pub id: String,
    /// Top-level domain of the target URI (e.g. `.com`).
    pub url: Option<String>,
    /// Raw `WARC-Date` header.
    pub date: String,
    /// Raw `Content-Length` header of the record.
    pub content_length: String,
    /// `Content-Type` of the captured HTTP response.
    pub mime_type: Option<String>,
    pub content: Option<ExtractedContent>,
}

impl CaptureRecord {
    /// True when extraction produced content for this record.
    #[must_use]
    pub const fn has_content(&self) -> bool {
        self.content.is_some()
    }
}
