//! Retrying HTTP transport for `ccnews`.
//!
//! [`ReqwestTransport`] implements the core [`HttpTransport`] port on top of
//! `reqwest`, adding exponential backoff for transient failures, error
//! classification and media-type based body decoding.
//!
//! [`HttpTransport`]: ccnews_core::HttpTransport
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod chunking;
mod content;
mod retry;
mod transport;

// ============================================================================
// Public API
// ============================================================================

pub use content::{ContentKind, classify_media_type};
pub use transport::ReqwestTransport;

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
