//! Catalog resolution errors.

use ccnews_core::{TransportError, YearMonth};
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from resolving a monthly catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No catalog is published for the period.
    #[error("No catalog found for {period}")]
    NotFound {
        /// The requested period
        period: YearMonth,
    },

    /// The catalog could not be fetched.
    #[error("Failed to fetch catalog: {0}")]
    Fetch(#[from] TransportError),

    /// The body was not a readable gzip text stream.
    #[error("Failed to decompress catalog from {url}: {message}")]
    Decompress {
        /// Catalog URL
        url: String,
        /// Decoder error
        message: String,
    },

    /// The transport classified the body as something other than bytes.
    #[error("Unexpected {kind} content for catalog {url}")]
    UnexpectedContent {
        /// Catalog URL
        url: String,
        /// What the transport returned instead
        kind: &'static str,
    },
}

impl CatalogError {
    /// True when the catalog simply does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
