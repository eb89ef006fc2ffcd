//! Command-line arguments.

use clap::Parser;

use ccnews_core::{Settings, YearMonth};

use crate::error::CliError;

/// Load CC-NEWS capture files for one month.
///
/// Looks up the month's catalog, lets you pick an ID or a range of IDs and
/// ingests the selected files.
#[derive(Debug, Parser)]
#[command(name = "ccnews")]
#[command(version)]
pub struct Cli {
    /// Year and month in YYYY/MM format (e.g. 2023/09)
    #[arg(value_name = "YYYY/MM")]
    pub period: YearMonth,

    /// Files downloaded at once (overrides CCNEWS_ETL_MAX_CONCURRENCY)
    #[arg(short = 'c', long = "max-concurrency")]
    pub max_concurrency: Option<usize>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Settings from the environment with command-line overrides applied.
    pub fn settings(&self) -> Result<Settings, CliError> {
        self.settings_from(|key| std::env::var(key).ok())
    }

    fn settings_from<F>(&self, lookup: F) -> Result<Settings, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::from_lookup(lookup)?;
        if let Some(n) = self.max_concurrency {
            settings.etl = settings.etl.with_max_concurrency(n);
            settings.validate()?;
        }
        Ok(settings)
    }
}
