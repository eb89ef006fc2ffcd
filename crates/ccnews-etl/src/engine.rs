//! Bounded-concurrency ingestion across files.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::FutureExt;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;

use ccnews_core::settings::{DEFAULT_CATALOG_BASE_URL, DEFAULT_MAX_CONCURRENCY};
use ccnews_core::{
    CatalogSettings, ContentExtractor, DownloadProgressPort, EtlSettings, FileDescriptor,
    HttpTransport, IngestionOutcome, NoopProgress,
};

use crate::worker::{WorkerContext, ingest_file};

// ============================================================================
// Slot pool
// ============================================================================

/// Fixed set of worker slots.
///
/// The semaphore bounds how many files are in flight; the free list tells
/// each worker which slot index (and progress line) it owns.
struct SlotPool {
    permits: Arc<Semaphore>,
    free: Arc<Mutex<Vec<usize>>>,
}

impl SlotPool {
    fn new(slots: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(slots)),
            free: Arc::new(Mutex::new((0..slots).rev().collect())),
        }
    }

    /// Wait for a free slot.
    async fn acquire(&self) -> Option<SlotLease> {
        let permit = Arc::clone(&self.permits).acquire_owned().await.ok()?;
        let slot = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()?;
        Some(SlotLease {
            slot,
            free: Arc::clone(&self.free),
            _permit: permit,
        })
    }
}

/// A held slot, returned to the pool on drop.
struct SlotLease {
    slot: usize,
    free: Arc<Mutex<Vec<usize>>>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for SlotLease {
    fn drop(&mut self) {
        // Runs before the permit is released
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(self.slot);
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Downloads and decodes capture files, a bounded number at a time.
///
/// A run never fails as a whole: every input file yields exactly one
/// [`IngestionOutcome`], in completion order.
pub struct IngestionEngine {
    ctx: WorkerContext,
    max_concurrency: usize,
}

impl IngestionEngine {
    /// Engine with default base URL and concurrency, and no progress display.
    pub fn new(transport: Arc<dyn HttpTransport>, extractor: Arc<dyn ContentExtractor>) -> Self {
        Self {
            ctx: WorkerContext {
                transport,
                extractor,
                progress: Arc::new(NoopProgress),
                base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            },
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Apply catalog and engine settings.
    #[must_use]
    pub fn with_settings(self, catalog: &CatalogSettings, etl: &EtlSettings) -> Self {
        self.with_base_url(catalog.base_url.clone())
            .with_max_concurrency(etl.max_concurrency)
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn DownloadProgressPort>) -> Self {
        self.ctx.progress = progress;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.ctx.base_url = base_url.into();
        self
    }

    /// Set the number of worker slots; zero is treated as one.
    #[must_use]
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Ingest `files`, returning one outcome per file in completion order.
    pub async fn run(&self, files: &[FileDescriptor]) -> Vec<IngestionOutcome> {
        let pool = SlotPool::new(self.max_concurrency);
        let mut tasks = JoinSet::new();
        let mut pending: Vec<String> = Vec::with_capacity(files.len());
        let mut outcomes = Vec::with_capacity(files.len());

        tracing::info!(
            files = files.len(),
            max_concurrency = self.max_concurrency,
            "Starting ingestion run"
        );

        for file in files {
            let Some(lease) = pool.acquire().await else {
                outcomes.push(IngestionOutcome::failed(file.id.clone(), "no worker slot available"));
                continue;
            };
            pending.push(file.id.clone());

            let ctx = self.ctx.clone();
            let file = file.clone();
            tasks.spawn(async move {
                let outcome = AssertUnwindSafe(ingest_file(&ctx, &file, lease.slot))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        tracing::error!(file_id = %file.id, "Worker panicked");
                        ctx.progress.finish(lease.slot);
                        IngestionOutcome::failed(file.id.clone(), "worker panicked")
                    });
                drop(lease);
                outcome
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    log_outcome(&outcome);
                    if let Some(pos) = pending.iter().position(|id| *id == outcome.file_id) {
                        pending.swap_remove(pos);
                    }
                    outcomes.push(outcome);
                }
                Err(e) => tracing::error!(error = %e, "Worker task did not complete"),
            }
        }

        // Tasks that vanished without an outcome still get one
        outcomes.extend(
            pending
                .into_iter()
                .map(|id| IngestionOutcome::failed(id, "worker task did not complete")),
        );
        outcomes
    }
}

fn log_outcome(outcome: &IngestionOutcome) {
    match outcome.failure_reason() {
        None => tracing::info!(
            file_id = %outcome.file_id,
            records = outcome.records.len(),
            skipped = outcome.skipped_records,
            failed = outcome.failed_records,
            bytes = outcome.bytes_downloaded,
            "Ingested file"
        ),
        Some(reason) => tracing::warn!(file_id = %outcome.file_id, reason = %reason, "File ingestion failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ccnews_core::{
        Dataset, HttpRequest, NoopExtractor, ResponseContent, StreamedResponse, TransportError,
        TransportResult,
    };

    fn descriptor(id: &str) -> FileDescriptor {
        FileDescriptor {
            filepath: format!("crawl-data/CC-NEWS/2025/07/CC-NEWS-20250701000000-{id}.warc.gz"),
            dataset: Dataset::CcNews,
            year: "2025".to_string(),
            month: "07".to_string(),
            timestamp: "20250701000000".to_string(),
            id: id.to_string(),
        }
    }

    /// Panics for file 00002, refuses everything else.
    struct PanickyTransport;

    #[async_trait]
    impl HttpTransport for PanickyTransport {
        async fn request(&self, _request: &HttpRequest) -> TransportResult<ResponseContent> {
            Err(TransportError::connection("not used"))
        }

        async fn stream(&self, request: &HttpRequest) -> TransportResult<StreamedResponse> {
            assert!(!request.url.ends_with("-00002.warc.gz"), "transport exploded");
            Err(TransportError::connection("refused"))
        }
    }

    #[tokio::test]
    async fn test_slot_pool_hands_out_distinct_slots() {
        let pool = SlotPool::new(2);
        let a = pool.acquire().await.unwrap();
        let b = pool.acquire().await.unwrap();
        assert_ne!(a.slot, b.slot);
        assert_eq!(pool.permits.available_permits(), 0);

        let freed = a.slot;
        drop(a);
        let c = pool.acquire().await.unwrap();
        assert_eq!(c.slot, freed);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let engine = IngestionEngine::new(Arc::new(PanickyTransport), Arc::new(NoopExtractor))
            .with_max_concurrency(0);
        assert_eq!(engine.max_concurrency(), 1);
    }

    #[tokio::test]
    async fn test_panicking_worker_becomes_failed_outcome() {
        let engine = IngestionEngine::new(Arc::new(PanickyTransport), Arc::new(NoopExtractor))
            .with_max_concurrency(2);
        let files = vec![descriptor("00001"), descriptor("00002"), descriptor("00003")];

        let outcomes = engine.run(&files).await;
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| !o.is_success()));

        let panicked = outcomes.iter().find(|o| o.file_id == "00002").unwrap();
        assert_eq!(panicked.failure_reason(), Some("worker panicked"));
        let refused = outcomes.iter().find(|o| o.file_id == "00001").unwrap();
        assert!(refused.failure_reason().unwrap().contains("refused"));
    }

    #[tokio::test]
    async fn test_empty_selection_yields_no_outcomes() {
        let engine = IngestionEngine::new(Arc::new(PanickyTransport), Arc::new(NoopExtractor));
        assert!(engine.run(&[]).await.is_empty());
    }
}
