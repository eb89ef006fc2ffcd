//! Record validation and conversion.

use ccnews_core::{CaptureRecord, ContentExtractor, ExtractedContent};
use chrono::{DateTime, Utc};
use url::Url;

use crate::container::RawRecord;

/// Only HTML responses are worth extracting.
///
/// The HTTP `Content-Type` must be exactly `text/html`; parameters such as
/// a charset disqualify the record.
pub fn is_record_valid(record: &RawRecord) -> bool {
    record.warc_type == "response"
        && record
            .http_headers
            .as_ref()
            .and_then(|h| h.content_type())
            .is_some_and(|ct| ct == "text/html")
}

/// Top-level domain of `uri` with a leading dot, e.g. `.uk`.
///
/// A single-label host is returned as is. Unparseable URIs yield `None`.
pub fn extract_top_level_domain(uri: &str) -> Option<String> {
    let parsed = match Url::parse(uri) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(uri = %uri, error = %e, "Cannot extract top-level domain");
            return None;
        }
    };
    let host = parsed.host_str()?;
    match host.rsplit_once('.') {
        Some((_, tld)) => Some(format!(".{tld}")),
        None => Some(host.to_string()),
    }
}

fn parse_crawl_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Build a [`CaptureRecord`] from a valid record, running extraction.
///
/// Extracted content picks up the crawl date from `WARC-Date` and, when the
/// extractor has none, the hostname of the target URI.
pub fn process_record(record: &RawRecord, extractor: &dyn ContentExtractor) -> CaptureRecord {
    let target_uri = record.target_uri.as_deref();

    let content = if record.payload.is_empty() {
        None
    } else {
        extractor.extract(&record.payload)
    };
    let content = content.map(|c| ExtractedContent {
        hostname: c.hostname.or_else(|| {
            target_uri
                .and_then(|u| Url::parse(u).ok())
                .and_then(|u| u.host_str().map(str::to_string))
        }),
        date_crawled: c.date_crawled.or_else(|| parse_crawl_date(&record.date)),
        ..c
    });

    CaptureRecord {
        id: record.record_id.clone(),
        url: target_uri.and_then(extract_top_level_domain),
        date: record.date.clone(),
        content_length: record.content_length.clone(),
        mime_type: record
            .http_headers
            .as_ref()
            .and_then(|h| h.content_type())
            .map(str::to_string),
        content,
    }
}
