//! Crawl periods and dataset identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Dataset
// ============================================================================

/// Datasets whose monthly listings can be ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dataset {
    /// Common Crawl news crawl.
    #[serde(rename = "CC-NEWS")]
    CcNews,
}

impl Dataset {
    /// Name used in catalog paths and capture file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CcNews => "CC-NEWS",
        }
    }

    /// Parse a dataset from its path segment.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "CC-NEWS" => Some(Self::CcNews),
            _ => None,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Year / Month
// ============================================================================

/// Error returned when a period string cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PeriodParseError {
    /// Input did not look like `YYYY/MM`.
    #[error("expected YYYY/MM, got '{input}'")]
    Format {
        /// The rejected input.
        input: String,
    },

    /// Month outside 1..=12.
    #[error("month must be between 01 and 12, got {month}")]
    Month {
        /// The rejected month.
        month: u32,
    },
}

/// A calendar month identifying one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    /// Create a period, validating the month.
    pub fn new(year: u16, month: u32) -> Result<Self, PeriodParseError> {
        match u8::try_from(month) {
            Ok(m) if (1..=12).contains(&m) => Ok(Self { year, month: m }),
            _ => Err(PeriodParseError::Month { month }),
        }
    }

    /// Four-digit year, e.g. `2025`.
    #[must_use]
    pub fn yyyy(&self) -> String {
        format!("{:04}", self.year)
    }

    /// Two-digit month, e.g. `07`.
    #[must_use]
    pub fn mm(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Key used for caching catalogs (`YYYY/MM`).
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PeriodParseError;

    /// Accepts `YYYY/MM` and `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let format_err = || PeriodParseError::Format {
            input: input.to_string(),
        };

        let (year, month) = input
            .split_once('/')
            .or_else(|| input.split_once('-'))
            .ok_or_else(format_err)?;

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format_err());
        }
        if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format_err());
        }

        let year: u16 = year.parse().map_err(|_| format_err())?;
        let month: u32 = month.parse().map_err(|_| format_err())?;
        Self::new(year, month)
    }
}
