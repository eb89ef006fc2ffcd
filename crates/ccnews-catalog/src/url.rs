//! URL templates for catalogs and capture files.

use ccnews_core::{FileDescriptor, YearMonth};

/// `{base}/{yyyy}/{mm}/warc.paths.gz`
pub fn catalog_url(base: &str, period: YearMonth) -> String {
    format!(
        "{}/{}/{}/warc.paths.gz",
        base.trim_end_matches('/'),
        period.yyyy(),
        period.mm()
    )
}

/// `{base}/{yyyy}/{mm}/{dataset}-{timestamp}-{id}.warc.gz`
pub fn file_url(base: &str, file: &FileDescriptor) -> String {
    format!(
        "{}/{}/{}/{}-{}-{}.warc.gz",
        base.trim_end_matches('/'),
        file.year,
        file.month,
        file.dataset,
        file.timestamp,
        file.id
    )
}
