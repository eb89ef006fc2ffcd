//! Shared fakes and WARC builders for ingestion tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use ccnews_core::{
    ContentExtractor, Dataset, DownloadProgressPort, ExtractedContent, FileDescriptor,
    HttpRequest, HttpTransport, ResponseContent, StreamedResponse, TransportError,
    TransportResult,
};
use flate2::Compression;
use flate2::write::GzEncoder;
use futures_util::StreamExt;
use futures_util::stream;

pub const HTML: &str = "<html><head><title>Harbour wall finished</title></head>\
    <body><article><p>The new breakwater was completed ahead of the storm season, \
    the harbour authority said on Monday.</p></article></body></html>";

// ============================================================================
// WARC builders
// ============================================================================

pub fn warc_record(warc_type: &str, id: &str, uri: &str, block: &[u8]) -> Vec<u8> {
    let mut out = format!(
        "WARC/1.0\r\n\
         WARC-Type: {warc_type}\r\n\
         WARC-Record-ID: <urn:uuid:{id}>\r\n\
         WARC-Date: 2025-07-01T00:43:26Z\r\n\
         WARC-Target-URI: {uri}\r\n\
         Content-Length: {}\r\n\r\n",
        block.len()
    )
    .into_bytes();
    out.extend_from_slice(block);
    out.extend_from_slice(b"\r\n\r\n");
    out
}

/// A record with exactly `headers` plus `Content-Length`.
pub fn record_with_headers(headers: &[(&str, &[u8])], block: &[u8]) -> Vec<u8> {
    let mut out = b"WARC/1.0\r\n".to_vec();
    for (name, value) in headers {
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(value);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("Content-Length: {}\r\n\r\n", block.len()).as_bytes());
    out.extend_from_slice(block);
    out.extend_from_slice(b"\r\n\r\n");
    out
}

pub fn http_block(content_type: &str, body: &str) -> Vec<u8> {
    format!("HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\n\r\n{body}").into_bytes()
}

pub fn html_record(id: &str, uri: &str) -> Vec<u8> {
    warc_record("response", id, uri, &http_block("text/html", HTML))
}

/// A gzip container of `records`, one member per record.
pub fn gzip_container(records: &[Vec<u8>]) -> Vec<u8> {
    records
        .iter()
        .flat_map(|record| {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
            encoder.write_all(record).unwrap();
            encoder.finish().unwrap()
        })
        .collect()
}

/// A typical capture file: crawl metadata, one HTML page and one JSON response.
pub fn capture_file(file_id: &str) -> Vec<u8> {
    gzip_container(&[
        warc_record("warcinfo", &format!("{file_id}-info"), "urn:info", b"software: test"),
        html_record(&format!("{file_id}-page"), "https://www.example.co.uk/news/1"),
        warc_record(
            "response",
            &format!("{file_id}-json"),
            "https://api.example.com/feed",
            &http_block("application/json", "{\"items\":[]}"),
        ),
    ])
}

pub fn descriptor(id: &str) -> FileDescriptor {
    FileDescriptor {
        filepath: format!("crawl-data/CC-NEWS/2025/07/CC-NEWS-20250701000000-{id}.warc.gz"),
        dataset: Dataset::CcNews,
        year: "2025".to_string(),
        month: "07".to_string(),
        timestamp: "20250701000000".to_string(),
        id: id.to_string(),
    }
}

// ============================================================================
// FakeTransport
// ============================================================================

enum Canned {
    Body(Bytes),
    Status(u16),
}

/// Serves canned capture files keyed by file ID and tracks concurrency.
pub struct FakeTransport {
    files: HashMap<String, Canned>,
    delay: Duration,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub requested: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            delay: Duration::from_millis(20),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_file(mut self, id: &str, body: Vec<u8>) -> Self {
        self.files.insert(id.to_string(), Canned::Body(Bytes::from(body)));
        self
    }

    pub fn with_status(mut self, id: &str, status: u16) -> Self {
        self.files.insert(id.to_string(), Canned::Status(status));
        self
    }

    fn file_id(url: &str) -> String {
        url.trim_end_matches(".warc.gz")
            .rsplit('-')
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn request(&self, _request: &HttpRequest) -> TransportResult<ResponseContent> {
        Err(TransportError::connection("catalog requests are not served"))
    }

    async fn stream(&self, request: &HttpRequest) -> TransportResult<StreamedResponse> {
        let id = Self::file_id(&request.url);
        self.requested.lock().unwrap().push(id.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.files.get(&id) {
            Some(Canned::Body(body)) => {
                // Split in two to exercise chunked writes
                let mid = body.len() / 2;
                let chunks = vec![Ok(body.slice(..mid)), Ok(body.slice(mid..))];
                Ok(StreamedResponse {
                    content_length: body.len() as u64,
                    chunks: stream::iter(chunks).boxed(),
                })
            }
            Some(Canned::Status(status)) => Err(TransportError::from_status(
                *status,
                None,
                format!("HTTP {status}"),
            )),
            None => Err(TransportError::from_status(404, None, "not found")),
        }
    }
}

// ============================================================================
// Recording collaborators
// ============================================================================

/// Records every payload it is asked to extract.
#[derive(Default)]
pub struct RecordingExtractor {
    pub payloads: Mutex<Vec<String>>,
}

impl ContentExtractor for RecordingExtractor {
    fn extract(&self, payload: &[u8]) -> Option<ExtractedContent> {
        self.payloads
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(payload).to_string());
        Some(ExtractedContent {
            title: Some("Harbour wall finished".to_string()),
            ..Default::default()
        })
    }
}

/// Records progress calls as `(event, slot)` pairs.
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<(&'static str, usize)>>,
    pub bytes: AtomicUsize,
}

impl DownloadProgressPort for RecordingProgress {
    fn begin(&self, slot: usize, _file_id: &str, _total: u64) {
        self.events.lock().unwrap().push(("begin", slot));
    }

    fn advance(&self, _slot: usize, bytes: u64) {
        self.bytes.fetch_add(bytes as usize, Ordering::SeqCst);
    }

    fn finish(&self, slot: usize) {
        self.events.lock().unwrap().push(("finish", slot));
    }
}
