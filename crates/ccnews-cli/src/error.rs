//! CLI-specific error types and exit codes.

use ccnews_catalog::CatalogError;
use ccnews_core::{SettingsError, TransportError, YearMonth};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No catalog is published for the requested month.
    #[error("No capture files found for {period}. Try once again with another date!")]
    CatalogNotFound {
        /// The requested year-month.
        period: YearMonth,
    },

    /// The catalog could not be fetched or decoded.
    #[error("Failed to load the catalog: {0}")]
    Catalog(CatalogError),

    /// Settings from the environment are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] SettingsError),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Transport(#[from] TransportError),

    /// The interactive prompt failed.
    #[error("Input error: {message}")]
    Input {
        /// Line editor error
        message: String,
    },

    /// Writing to the terminal failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The user left the prompt. "Aborted." has already been printed.
    #[error("Aborted.")]
    Aborted {
        /// 0 for an explicit quit, 1 for EOF or interrupt.
        exit_code: i32,
    },
}

impl CliError {
    /// Map error to process exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 74: I/O error (`EX_IOERR`)
    /// - 78: Configuration error (`EX_CONFIG`)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::CatalogNotFound { .. } | Self::Catalog(_) | Self::Transport(_) => 1,
            Self::Input { .. } | Self::Io(_) => 74,
            Self::Config(_) => 78,
            Self::Aborted { exit_code } => *exit_code,
        }
    }

    /// True when the message has already reached the user.
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { period } => Self::CatalogNotFound { period },
            other => Self::Catalog(other),
        }
    }
}
