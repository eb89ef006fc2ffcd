//! Logging setup.
//!
//! Log lines go to stderr through the progress display, which is suspended
//! while each line is written so bars are redrawn below it.

use std::io::{self, Write};

use indicatif::MultiProgress;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Crates whose logs are capped at `warn` unless `RUST_LOG` says otherwise.
const NOISY_CRATES: [&str; 6] = [
    "html5ever",
    "selectors",
    "dom_smoothie",
    "hyper",
    "reqwest",
    "rustls",
];

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    NOISY_CRATES
        .iter()
        .fold(level.to_string(), |acc, krate| format!("{acc},{krate}=warn"))
}

/// Install the global subscriber.
pub fn init(verbose: bool, multi: MultiProgress) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(ProgressAwareWriter::new(multi))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

/// [`MakeWriter`] that suspends a [`MultiProgress`] around each write.
#[derive(Clone)]
pub struct ProgressAwareWriter {
    multi: MultiProgress,
}

impl ProgressAwareWriter {
    pub const fn new(multi: MultiProgress) -> Self {
        Self { multi }
    }
}

impl<'a> MakeWriter<'a> for ProgressAwareWriter {
    type Writer = SuspendingWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingWriter { multi: &self.multi }
    }
}

/// Writes one formatted event to stderr with the bars hidden.
pub struct SuspendingWriter<'a> {
    multi: &'a MultiProgress,
}

impl Write for SuspendingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn test_default_filter_caps_noisy_crates() {
        let filter = default_filter(false);
        assert!(filter.starts_with("info,"));
        assert!(filter.contains("html5ever=warn"));
        assert!(filter.contains("reqwest=warn"));
        assert!(default_filter(true).starts_with("debug,"));
        // Must be a valid directive list
        assert!(EnvFilter::try_new(filter).is_ok());
    }

    #[test]
    fn test_writer_reports_full_length() {
        let writer = ProgressAwareWriter::new(MultiProgress::with_draw_target(
            ProgressDrawTarget::hidden(),
        ));
        let mut out = writer.make_writer();
        assert_eq!(out.write(b"line\n").unwrap(), 5);
        out.flush().unwrap();
    }
}
