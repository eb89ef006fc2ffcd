//! CLI entry point.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use indicatif::MultiProgress;

use ccnews_cli::{Cli, app, logging};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log lines share the terminal with the download bars
    let multi = MultiProgress::new();
    logging::init(cli.verbose, multi.clone()).context("Failed to initialise logging")?;

    match app::run(&cli, multi).await {
        Ok(summary) => {
            tracing::debug!(?summary, "Session finished");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if !e.is_reported() {
                eprintln!("{e}");
            }
            Ok(ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1)))
        }
    }
}
