//! Ingestion errors.
//!
//! These never escape a run: they become the `reason` of a failed
//! outcome or a log line.

use ccnews_core::TransportError;
use thiserror::Error;

/// Result type alias for ingestion operations.
pub type EtlResult<T> = Result<T, EtlError>;

/// Errors raised while ingesting one file.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The download could not be started or was interrupted.
    #[error("Download failed: {0}")]
    Download(#[from] TransportError),

    /// The transient buffer could not be written or read.
    #[error("Buffer I/O error: {0}")]
    Buffer(#[from] std::io::Error),

    /// The WARC container is malformed past this point.
    #[error("Malformed WARC container: {message}")]
    Container {
        /// Parser error
        message: String,
    },

    /// A blocking decode task did not complete.
    #[error("Decode task failed: {message}")]
    Task {
        /// Join error description
        message: String,
    },
}
