//! Core domain types and port definitions for `ccnews`.
//!
//! This crate owns everything the adapters agree on: the catalog and capture
//! record model, the transport/extractor/progress ports, and the settings
//! surface. It performs no I/O of its own.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    Catalog, CaptureRecord, Dataset, ExtractedContent, FileDescriptor, IngestionOutcome,
    OutcomeStatus, PeriodParseError, RangeSelection, RunSummary, YearMonth,
};
pub use ports::{
    ContentExtractor, DownloadProgressPort, HttpMethod, HttpRequest, HttpTransport,
    NoopExtractor, NoopProgress, ResponseContent, StreamedResponse, TransportError,
    TransportResult,
};
pub use settings::{CatalogSettings, EtlSettings, HttpSettings, Settings, SettingsError};

// Used only by the `#[tokio::test]` port checks
#[cfg(test)]
use tokio as _;
