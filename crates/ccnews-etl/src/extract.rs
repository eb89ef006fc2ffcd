//! Readability-based article extraction.

use std::panic::{AssertUnwindSafe, catch_unwind};

use ccnews_core::{ContentExtractor, ExtractedContent};
use chrono::{DateTime, Utc};
use dom_smoothie::Readability;

/// [`ContentExtractor`] backed by `dom_smoothie`, a port of readability.js.
///
/// Payloads are decoded as UTF-8, replacing invalid sequences. Parser
/// failures and panics both yield `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityExtractor;

impl ReadabilityExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse(html: &str) -> Option<ExtractedContent> {
        let mut readability = Readability::new(html, None, None).ok()?;
        let article = readability.parse().ok()?;

        let content = ExtractedContent {
            title: non_blank(article.title),
            excerpt: article.excerpt.and_then(non_blank),
            text: non_blank(article.text_content.to_string()),
            date: article.published_time.as_deref().and_then(parse_published),
            ..Default::default()
        };
        (!content.is_blank()).then_some(content)
    }
}

impl ContentExtractor for ReadabilityExtractor {
    fn extract(&self, payload: &[u8]) -> Option<ExtractedContent> {
        let html = String::from_utf8_lossy(payload);
        if html.trim().is_empty() {
            return None;
        }
        catch_unwind(AssertUnwindSafe(|| Self::parse(&html))).unwrap_or_else(|_| {
            tracing::debug!("Readability parser panicked");
            None
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Test Article</title>
  <meta property="article:published_time" content="2025-06-30T18:00:00Z">
</head>
<body>
  <nav><a href="/">Home</a> | <a href="/world">World</a></nav>
  <article>
    <h1>Test Article</h1>
    <p>The harbour authority confirmed on Monday that the new breakwater, under
    construction since early spring, will be finished ahead of the storm season.
    Engineers said the final stone blocks were placed overnight.</p>
    <p>Local fishermen welcomed the news, saying the old wall had been failing for
    years and that several boats were damaged during last winter's gales. The
    council expects the project to come in slightly under budget.</p>
    <p>Work on the access road will continue through the summer months, with
    partial closures planned for weekday mornings only.</p>
  </article>
  <footer>Copyright 2025</footer>
</body>
</html>"#;

    #[test]
    fn test_extracts_title_and_text() {
        let content = ReadabilityExtractor::new()
            .extract(ARTICLE.as_bytes())
            .unwrap();

        assert_eq!(content.title.as_deref(), Some("Test Article"));
        let text = content.text.unwrap();
        assert!(text.contains("breakwater"));
        assert!(!text.contains("Copyright 2025"));
        assert!(content.date_crawled.is_none());
    }

    #[test]
    fn test_blank_payload_is_none() {
        let extractor = ReadabilityExtractor::new();
        assert!(extractor.extract(b"").is_none());
        assert!(extractor.extract(b"   \r\n").is_none());
    }

    #[test]
    fn test_invalid_utf8_does_not_panic() {
        let mut payload = ARTICLE.as_bytes().to_vec();
        payload.extend_from_slice(&[0xff, 0xfe, 0x00]);
        let _ = ReadabilityExtractor::new().extract(&payload);
    }

    #[test]
    fn test_published_time_parsing() {
        assert_eq!(
            parse_published(" 2025-06-30T18:00:00+02:00 ").map(|d| d.to_rfc3339()),
            Some("2025-06-30T16:00:00+00:00".to_string())
        );
        assert!(parse_published("yesterday").is_none());
    }
}
