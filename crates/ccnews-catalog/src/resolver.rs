//! Catalog resolver.

use std::io::Read;
use std::sync::Arc;

use ccnews_core::{
    Catalog, CatalogSettings, Dataset, FileDescriptor, HttpRequest, HttpTransport,
    ResponseContent, YearMonth,
};
use flate2::read::MultiGzDecoder;

use crate::cache::CatalogCache;
use crate::error::{CatalogError, CatalogResult};
use crate::parsing::parse_catalog_lines;
use crate::url;

/// Fetches, parses and caches monthly catalogs.
pub struct CatalogResolver {
    transport: Arc<dyn HttpTransport>,
    settings: CatalogSettings,
    cache: CatalogCache,
}

impl CatalogResolver {
    pub fn new(transport: Arc<dyn HttpTransport>, settings: CatalogSettings) -> Self {
        Self {
            transport,
            settings,
            cache: CatalogCache::new(),
        }
    }

    pub const fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Resolve the catalog for `period`.
    ///
    /// Cached catalogs are returned without network I/O. A 404 from the
    /// server maps to [`CatalogError::NotFound`].
    pub async fn get_catalog(&self, period: YearMonth) -> CatalogResult<Arc<Catalog>> {
        if let Some(catalog) = self.cache.get(period) {
            tracing::debug!(period = %period, "Catalog cache hit");
            return Ok(catalog);
        }

        let catalog_url = url::catalog_url(&self.settings.base_url, period);
        tracing::info!(url = %catalog_url, "Fetching catalog");

        let content = match self.transport.request(&HttpRequest::get(&catalog_url)).await {
            Ok(content) => content,
            Err(e) if e.is_not_found() => return Err(CatalogError::NotFound { period }),
            Err(e) => return Err(CatalogError::Fetch(e)),
        };

        let body = match content {
            ResponseContent::Bytes(body) => body,
            other => {
                return Err(CatalogError::UnexpectedContent {
                    url: catalog_url,
                    kind: other.kind(),
                });
            }
        };

        let text = gunzip(&body).map_err(|e| CatalogError::Decompress {
            url: catalog_url.clone(),
            message: e.to_string(),
        })?;
        let files = parse_catalog_lines(&text);
        tracing::info!(period = %period, files = files.len(), "Catalog parsed");

        Ok(self.cache.insert(Catalog {
            url: catalog_url,
            dataset: Dataset::CcNews,
            period,
            files,
        }))
    }

    /// Download URL for one capture file.
    pub fn file_url(&self, file: &FileDescriptor) -> String {
        url::file_url(&self.settings.base_url, file)
    }

    /// Download URLs for several capture files, in order.
    pub fn file_urls(&self, files: &[FileDescriptor]) -> Vec<String> {
        files.iter().map(|f| self.file_url(f)).collect()
    }
}

fn gunzip(body: &[u8]) -> std::io::Result<String> {
    let mut text = String::new();
    MultiGzDecoder::new(body).read_to_string(&mut text)?;
    Ok(text)
}
