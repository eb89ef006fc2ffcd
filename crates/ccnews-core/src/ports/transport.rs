//! HTTP transport port.
//!
//! The catalog resolver and ingestion workers talk to the network only
//! through [`HttpTransport`]. The production implementation lives in
//! `ccnews-http`; tests substitute in-memory fakes.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Request
// ============================================================================

/// HTTP verbs the transport understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }

    /// Parse a method name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let method = match name.trim().to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            _ => return None,
        };
        Some(method)
    }

    /// Methods that may be repeated without changing server state.
    #[must_use]
    pub const fn is_idempotent(self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Extra headers, sent in insertion order.
    pub headers: Vec<(String, String)>,
    /// Query parameters appended to the URL.
    pub params: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }
}

// ============================================================================
// Response
// ============================================================================

/// A fully read response body, classified by media type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseContent {
    Text(String),
    Json(serde_json::Value),
    Bytes(Bytes),
}

impl ResponseContent {
    /// Borrow the body as raw bytes, if it was classified as binary.
    #[must_use]
    pub const fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Json(_) => "json",
            Self::Bytes(_) => "bytes",
        }
    }
}

/// A response whose body is consumed lazily.
///
/// The chunk stream is single-pass. A read failure part-way through is
/// yielded as an `Err` item and ends the stream.
pub struct StreamedResponse {
    /// Declared `Content-Length`, or 0 when the server did not send one.
    pub content_length: u64,
    pub chunks: BoxStream<'static, TransportResult<Bytes>>,
}

impl fmt::Debug for StreamedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamedResponse")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Classified transport failure.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// No usable response: connect failure, timeout, or a broken stream.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the failure
        message: String,
    },

    /// The server answered with a 4xx status.
    #[error("Client error {status}: {message}")]
    Client {
        /// HTTP status code
        status: u16,
        /// Parsed response body
        body: Option<ResponseContent>,
        /// Reason phrase or summary
        message: String,
    },

    /// The server answered with a 5xx status.
    #[error("Server error {status}: {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Parsed response body
        body: Option<ResponseContent>,
        /// Reason phrase or summary
        message: String,
    },

    /// The body could not be decoded as its declared media type.
    #[error("Decode error: {message}")]
    Decode {
        /// What failed to decode
        message: String,
    },
}

impl TransportError {
    /// Build a client or server error from a status code.
    pub fn from_status(
        status: u16,
        body: Option<ResponseContent>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        if status >= 500 {
            Self::Server {
                status,
                body,
                message,
            }
        } else {
            Self::Client {
                status,
                body,
                message,
            }
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// HTTP status, when the server answered.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Connection { .. } | Self::Decode { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Client { status: 404, .. })
    }

    /// Parsed error body, when the server sent one.
    #[must_use]
    pub const fn body(&self) -> Option<&ResponseContent> {
        match self {
            Self::Client { body, .. } | Self::Server { body, .. } => body.as_ref(),
            Self::Connection { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Result type alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

// ============================================================================
// Port
// ============================================================================

/// Port trait for HTTP access.
///
/// Implementations retry transient failures themselves; callers see only
/// the final classified outcome.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a request and read the whole body.
    async fn request(&self, request: &HttpRequest) -> TransportResult<ResponseContent>;

    /// Perform a request and hand back the body as a chunk stream.
    async fn stream(&self, request: &HttpRequest) -> TransportResult<StreamedResponse>;
}
