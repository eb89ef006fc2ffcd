//! Download progress port.
//!
//! Progress is keyed by worker slot, not by file: each slot owns one
//! display line that is reset whenever the slot picks up a new file.

/// Receives per-slot download progress.
pub trait DownloadProgressPort: Send + Sync {
    /// A slot started downloading `file_id`; `total` is 0 when unknown.
    fn begin(&self, slot: usize, file_id: &str, total: u64);

    /// `bytes` more were written by the slot.
    fn advance(&self, slot: usize, bytes: u64);

    /// The slot finished (successfully or not) and is idle.
    fn finish(&self, slot: usize);
}

/// Progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl DownloadProgressPort for NoopProgress {
    fn begin(&self, _slot: usize, _file_id: &str, _total: u64) {}

    fn advance(&self, _slot: usize, _bytes: u64) {}

    fn finish(&self, _slot: usize) {}
}
