//! Resolve a catalog, pick a range from it and build download URLs.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use ccnews_catalog::{CatalogResolver, RangeError, parse_id_range, render_catalog_table, select_files};
use ccnews_core::{
    CatalogSettings, HttpRequest, HttpTransport, ResponseContent, StreamedResponse, TransportError,
    TransportResult, YearMonth,
};
use flate2::Compression;
use flate2::write::GzEncoder;

/// Serves one gzip listing for every request and counts calls.
struct ListingTransport {
    body: Bytes,
    calls: AtomicUsize,
}

impl ListingTransport {
    fn new(lines: &[String]) -> Self {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(lines.join("\n").as_bytes()).unwrap();
        Self {
            body: Bytes::from(encoder.finish().unwrap()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HttpTransport for ListingTransport {
    async fn request(&self, _request: &HttpRequest) -> TransportResult<ResponseContent> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResponseContent::Bytes(self.body.clone()))
    }

    async fn stream(&self, _request: &HttpRequest) -> TransportResult<StreamedResponse> {
        Err(TransportError::connection("not used"))
    }
}

fn listing() -> Vec<String> {
    (3800..3810)
        .map(|id| format!("crawl-data/CC-NEWS/2025/07/CC-NEWS-2025070100{id}-{id:05}.warc.gz"))
        .chain(std::iter::once("garbage line".to_string()))
        .collect()
}

#[tokio::test]
async fn test_resolve_select_and_build_urls() {
    let transport = Arc::new(ListingTransport::new(&listing()));
    let resolver = CatalogResolver::new(
        transport.clone(),
        CatalogSettings::default().with_base_url("https://cc.test/CC-NEWS"),
    );
    let period: YearMonth = "2025/07".parse().unwrap();

    let catalog = resolver.get_catalog(period).await.unwrap();
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog.id_range().as_deref(), Some("03800 - 03809"));

    let table = render_catalog_table(&catalog, 3);
    assert!(table.starts_with("First 3 WARC filepaths:"));
    assert!(table.ends_with("...7 more"));

    let selection = parse_id_range("3802 - 3804", catalog.ids()).unwrap();
    let files = select_files(&catalog.files, &selection).unwrap();
    let urls = resolver.file_urls(files);
    assert_eq!(urls, vec![
        "https://cc.test/CC-NEWS/2025/07/CC-NEWS-20250701003802-03802.warc.gz",
        "https://cc.test/CC-NEWS/2025/07/CC-NEWS-20250701003803-03803.warc.gz",
        "https://cc.test/CC-NEWS/2025/07/CC-NEWS-20250701003804-03804.warc.gz",
    ]);

    // Second lookup is served from the cache
    resolver.get_catalog(period).await.unwrap();
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_out_of_range_request_reports_bounds() {
    let transport = Arc::new(ListingTransport::new(&listing()));
    let resolver = CatalogResolver::new(transport, CatalogSettings::default());
    let catalog = resolver
        .get_catalog(YearMonth::new(2025, 7).unwrap())
        .await
        .unwrap();

    let err = parse_id_range("3790-3801", catalog.ids()).unwrap_err();
    assert_eq!(
        err,
        RangeError::OutOfBounds {
            min: "03800".to_string(),
            max: "03809".to_string(),
        }
    );
}
