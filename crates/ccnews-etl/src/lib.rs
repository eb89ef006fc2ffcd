//! WARC ingestion engine for `ccnews`.
//!
//! [`IngestionEngine`] downloads a selection of capture files with bounded
//! concurrency, decodes each WARC container and turns valid HTML responses
//! into [`CaptureRecord`]s. Failures are isolated per record and per file;
//! a run always yields one outcome per input file.
//!
//! [`CaptureRecord`]: ccnews_core::CaptureRecord
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod buffer;
mod container;
mod engine;
mod error;
mod extract;
mod progress;
mod record;
mod worker;

// ============================================================================
// Public API
// ============================================================================

pub use container::{HttpHeaders, RawRecord, decode_container, open_container};
pub use engine::IngestionEngine;
pub use error::{EtlError, EtlResult};
pub use extract::ReadabilityExtractor;
pub use progress::SlotProgress;
pub use record::{extract_top_level_domain, is_record_valid, process_record};

// Silence unused dev-dependency warnings
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use bytes as _;
