//! Per-file ingestion.
//!
//! A worker downloads one capture file into a transient buffer, then decodes
//! it on the blocking pool. Record failures are logged and skipped; only a
//! failed download fails the file.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use ccnews_core::{
    CaptureRecord, ContentExtractor, DownloadProgressPort, FileDescriptor, HttpTransport,
    IngestionOutcome,
};

use crate::buffer::DownloadBuffer;
use crate::container::{decode_container, open_container};
use crate::error::{EtlError, EtlResult};
use crate::record::{is_record_valid, process_record};

/// Collaborators shared by every worker of a run.
#[derive(Clone)]
pub(crate) struct WorkerContext {
    pub transport: Arc<dyn HttpTransport>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub progress: Arc<dyn DownloadProgressPort>,
    pub base_url: String,
}

/// Records decoded from one container.
#[derive(Debug, Default)]
pub(crate) struct DecodeReport {
    pub records: Vec<CaptureRecord>,
    pub skipped: usize,
    pub failed: usize,
}

/// Ingest `file` using worker slot `slot`.
pub(crate) async fn ingest_file(
    ctx: &WorkerContext,
    file: &FileDescriptor,
    slot: usize,
) -> IngestionOutcome {
    let url = ccnews_catalog::file_url(&ctx.base_url, file);
    tracing::debug!(file_id = %file.id, slot, url = %url, "Downloading capture file");

    let buffer = match DownloadBuffer::download(
        ctx.transport.as_ref(),
        &url,
        &file.id,
        slot,
        ctx.progress.as_ref(),
    )
    .await
    {
        Ok(buffer) => buffer,
        Err(e) => return IngestionOutcome::failed(file.id.clone(), e.to_string()),
    };
    let bytes = buffer.bytes();

    let extractor = Arc::clone(&ctx.extractor);
    let file_id = file.id.clone();
    let decoded = tokio::task::spawn_blocking(move || {
        // The buffer moves in so it is dropped once decoding ends
        decode_buffer(&buffer, &file_id, extractor.as_ref())
    })
    .await
    .map_err(|e| EtlError::Task {
        message: e.to_string(),
    })
    .and_then(|report| report);

    match decoded {
        Ok(report) => IngestionOutcome::succeeded(file.id.clone(), report.records)
            .with_bytes(bytes)
            .with_record_counts(report.skipped, report.failed),
        Err(e) => IngestionOutcome::failed(file.id.clone(), e.to_string()).with_bytes(bytes),
    }
}

fn decode_buffer(
    buffer: &DownloadBuffer,
    file_id: &str,
    extractor: &dyn ContentExtractor,
) -> EtlResult<DecodeReport> {
    let reader = open_container(buffer.reader()?)?;
    Ok(decode_records(reader, file_id, extractor))
}

/// Decode and convert every valid record in `reader`.
///
/// A framing error ends decoding; records converted before it are kept.
pub(crate) fn decode_records<R: std::io::BufRead>(
    reader: R,
    file_id: &str,
    extractor: &dyn ContentExtractor,
) -> DecodeReport {
    let mut report = DecodeReport::default();

    let decoded = decode_container(reader, |raw| {
        if !is_record_valid(&raw) {
            report.skipped += 1;
            return;
        }
        match catch_unwind(AssertUnwindSafe(|| process_record(&raw, extractor))) {
            Ok(record) => report.records.push(record),
            Err(_) => {
                tracing::warn!(file_id = %file_id, record_id = %raw.record_id, "Record processing panicked; skipping");
                report.failed += 1;
            }
        }
    });

    if let Err(e) = decoded {
        tracing::warn!(
            file_id = %file_id,
            records = report.records.len(),
            error = %e,
            "Container decoding stopped early"
        );
    }

    report
}
