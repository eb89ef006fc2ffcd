//! Monthly catalog model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::period::{Dataset, YearMonth};

/// One capture file listed in a monthly catalog.
///
/// Example catalog line:
/// `crawl-data/CC-NEWS/2025/01/CC-NEWS-20250101020153-00156.warc.gz`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Original catalog line.
    pub filepath: String,
    pub dataset: Dataset,
    /// Four-digit year.
    pub year: String,
    /// Two-digit month.
    pub month: String,
    /// Capture timestamp, `YYYYMMDDhhmmss`.
    pub timestamp: String,
    /// Zero-padded file ID; width follows the catalog.
    pub id: String,
}

impl fmt::Display for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} - {} - {}",
            self.year, self.month, self.timestamp, self.id
        )
    }
}

/// The resolved file listing for one year-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// URL the listing was fetched from.
    pub url: String,
    pub dataset: Dataset,
    pub period: YearMonth,
    /// Entries in catalog-line order.
    pub files: Vec<FileDescriptor>,
}

impl Catalog {
    /// Number of listed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no line of the listing was well formed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File IDs in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.iter().map(|f| f.id.as_str())
    }

    /// Human-readable span of IDs: `first` or `first - last`.
    ///
    /// Returns `None` for an empty catalog.
    #[must_use]
    pub fn id_range(&self) -> Option<String> {
        let first = self.files.first()?;
        let last = self.files.last()?;
        if first.id == last.id {
            Some(first.id.clone())
        } else {
            Some(format!("{} - {}", first.id, last.id))
        }
    }
}

/// A validated, zero-padded inclusive ID range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelection {
    pub start: String,
    pub end: String,
}

impl RangeSelection {
    /// True when the range names exactly one file.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str) -> FileDescriptor {
        FileDescriptor {
            filepath: format!("crawl-data/CC-NEWS/2025/07/CC-NEWS-20250701004326-{id}.warc.gz"),
            dataset: Dataset::CcNews,
            year: "2025".to_string(),
            month: "07".to_string(),
            timestamp: "20250701004326".to_string(),
            id: id.to_string(),
        }
    }

    fn catalog(ids: &[&str]) -> Catalog {
        Catalog {
            url: "https://example.com/2025/07/warc.paths.gz".to_string(),
            dataset: Dataset::CcNews,
            period: YearMonth::new(2025, 7).unwrap(),
            files: ids.iter().map(|id| descriptor(id)).collect(),
        }
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(
            descriptor("02814").to_string(),
            "2025/07 - 20250701004326 - 02814"
        );
    }

    #[test]
    fn test_id_range() {
        assert_eq!(catalog(&[]).id_range(), None);
        assert_eq!(catalog(&["00007"]).id_range().as_deref(), Some("00007"));
        assert_eq!(
            catalog(&["00001", "00002", "00009"]).id_range().as_deref(),
            Some("00001 - 00009")
        );
    }

    #[test]
    fn test_ids_preserve_order() {
        let c = catalog(&["00003", "00001", "00002"]);
        assert_eq!(c.ids().collect::<Vec<_>>(), ["00003", "00001", "00002"]);
        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
    }
}
