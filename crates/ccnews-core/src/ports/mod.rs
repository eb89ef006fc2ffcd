//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the ingestion pipeline expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - Transport errors are core-owned and classified (connection/client/server)
//! - Extraction and progress are synchronous; transport is async

pub mod extractor;
pub mod progress;
pub mod transport;

pub use extractor::{ContentExtractor, NoopExtractor};
pub use progress::{DownloadProgressPort, NoopProgress};
pub use transport::{
    HttpMethod, HttpRequest, HttpTransport, ResponseContent, StreamedResponse, TransportError,
    TransportResult,
};
