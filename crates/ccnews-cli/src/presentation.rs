//! Text shown to the user.

use indicatif::HumanBytes;

use ccnews_core::{FileDescriptor, IngestionOutcome, RunSummary, YearMonth};

pub fn intro(period: YearMonth) -> String {
    format!(
        "This command loads WARC files from the CC-NEWS dataset.\n\n\
         You have entered year and month: {period}\n\n\
         Now the app will query CC-NEWS to see if any news are available for this date.\n"
    )
}

pub fn selection_help(id_range: &str) -> String {
    format!(
        "Now you can choose a range (or just one) from the ID column and those files will be loaded.\n\n\
         ATTENTION: EACH FILE IS APPROX. 1 GB IN SIZE, SO DON'T SPECIFY MANY!\n\n\
         Range of available IDs: {id_range}"
    )
}

/// Announce the files about to be loaded.
pub fn loading_message(files: &[FileDescriptor]) -> String {
    match files {
        [] => "Nothing to load.".to_string(),
        [single] => format!("Loading file {}...", single.id),
        [first, .., last] => format!(
            "Loading {} files from {} to {}...",
            files.len(),
            first.id,
            last.id
        ),
    }
}

/// One line per file.
pub fn outcome_line(outcome: &IngestionOutcome) -> String {
    match outcome.failure_reason() {
        Some(reason) => format!("  {}: FAILED ({reason})", outcome.file_id),
        None => {
            let with_content = outcome.records.iter().filter(|r| r.has_content()).count();
            format!(
                "  {}: {} records ({with_content} with content, {} skipped, {} failed), {}",
                outcome.file_id,
                outcome.records.len(),
                outcome.skipped_records,
                outcome.failed_records,
                HumanBytes(outcome.bytes_downloaded)
            )
        }
    }
}

pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Done: {} of {} files ingested, {} records ({} with content), {} downloaded.",
        summary.files_succeeded,
        summary.files_succeeded + summary.files_failed,
        summary.records,
        summary.records_with_content,
        HumanBytes(summary.bytes_downloaded)
    )
}
