//! Transient download buffers.

use ccnews_core::{DownloadProgressPort, HttpRequest, HttpTransport};
use futures_util::StreamExt;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use crate::error::EtlResult;

/// A fully downloaded capture file on disk.
///
/// The backing file is removed when the buffer is dropped.
#[derive(Debug)]
pub(crate) struct DownloadBuffer {
    file: NamedTempFile,
    bytes: u64,
}

impl DownloadBuffer {
    /// Stream `url` into a fresh temporary file.
    ///
    /// Progress is reported on `slot`; the slot is marked finished whether or
    /// not the download completes.
    pub(crate) async fn download(
        transport: &dyn HttpTransport,
        url: &str,
        file_id: &str,
        slot: usize,
        progress: &dyn DownloadProgressPort,
    ) -> EtlResult<Self> {
        let result = Self::fill(transport, url, file_id, slot, progress).await;
        progress.finish(slot);
        result
    }

    async fn fill(
        transport: &dyn HttpTransport,
        url: &str,
        file_id: &str,
        slot: usize,
        progress: &dyn DownloadProgressPort,
    ) -> EtlResult<Self> {
        let response = transport.stream(&HttpRequest::get(url)).await?;
        progress.begin(slot, file_id, response.content_length);

        let file = NamedTempFile::new()?;
        let mut writer = tokio::fs::File::from_std(file.reopen()?);
        let mut chunks = response.chunks;
        let mut bytes = 0u64;

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
            progress.advance(slot, chunk.len() as u64);
        }
        writer.flush().await?;

        tracing::debug!(file_id = %file_id, bytes, path = %file.path().display(), "Buffered capture file");
        Ok(Self { file, bytes })
    }

    pub(crate) const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// A new handle positioned at the start of the buffer.
    pub(crate) fn reader(&self) -> std::io::Result<std::fs::File> {
        self.file.reopen()
    }
}
