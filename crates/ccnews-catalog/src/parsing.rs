//! Catalog line parsing.
//!
//! Each catalog line has the shape
//! `<prefix>/<dataset>/<year>/<month>/<dataset>-<timestamp>-<id>.<ext>`.
//! Lines that do not match are dropped with a warning.

use ccnews_core::{Dataset, FileDescriptor};
use thiserror::Error;

const WARC_SUFFIX: &str = ".warc.gz";
const SEGMENTS: usize = 5;

/// Why a catalog line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("expected 5 path segments, found {found}")]
    SegmentCount { found: usize },

    #[error("unknown dataset '{name}'")]
    UnknownDataset { name: String },

    #[error("dataset mismatch: directory '{dir}', file name '{file}'")]
    DatasetMismatch { dir: String, file: String },

    #[error("malformed {field}: '{value}'")]
    Malformed { field: &'static str, value: String },
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn check_digits(field: &'static str, value: &str, len: Option<usize>) -> Result<(), PathParseError> {
    if all_digits(value) && len.is_none_or(|n| value.len() == n) {
        Ok(())
    } else {
        Err(PathParseError::Malformed {
            field,
            value: value.to_string(),
        })
    }
}

/// Parse one catalog line into a [`FileDescriptor`].
pub fn parse_file_path(line: &str) -> Result<FileDescriptor, PathParseError> {
    let filepath = line.trim();
    let segments: Vec<&str> = filepath.split('/').collect();
    if segments.len() != SEGMENTS {
        return Err(PathParseError::SegmentCount {
            found: segments.len(),
        });
    }
    let (dir_dataset, year, month, file_name) =
        (segments[1], segments[2], segments[3], segments[4]);

    let dataset = Dataset::from_segment(dir_dataset).ok_or_else(|| {
        PathParseError::UnknownDataset {
            name: dir_dataset.to_string(),
        }
    })?;
    check_digits("year", year, Some(4))?;
    check_digits("month", month, Some(2))?;

    let stem = file_name
        .strip_suffix(WARC_SUFFIX)
        .or_else(|| file_name.split_once('.').map(|(stem, _)| stem))
        .unwrap_or(file_name);

    // Dataset names contain '-', so split from the right
    let mut parts = stem.rsplitn(3, '-');
    let (Some(id), Some(timestamp), Some(file_dataset)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(PathParseError::Malformed {
            field: "file name",
            value: file_name.to_string(),
        });
    };

    if file_dataset != dir_dataset {
        return Err(PathParseError::DatasetMismatch {
            dir: dir_dataset.to_string(),
            file: file_dataset.to_string(),
        });
    }
    check_digits("timestamp", timestamp, None)?;
    check_digits("id", id, None)?;

    Ok(FileDescriptor {
        filepath: filepath.to_string(),
        dataset,
        year: year.to_string(),
        month: month.to_string(),
        timestamp: timestamp.to_string(),
        id: id.to_string(),
    })
}

/// Parse every non-blank line, dropping malformed ones.
pub fn parse_catalog_lines(text: &str) -> Vec<FileDescriptor> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_file_path(line) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!(line = %line, error = %e, "Skipping malformed catalog line");
                None
            }
        })
        .collect()
}
