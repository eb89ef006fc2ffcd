//! The interactive session: catalog, selection, ingestion, summary.

use std::io::{self, Write};
use std::sync::Arc;

use indicatif::MultiProgress;

use ccnews_catalog::{CatalogResolver, render_catalog_table};
use ccnews_core::{HttpTransport, IngestionOutcome, RunSummary, Settings, YearMonth};
use ccnews_etl::{IngestionEngine, ReadabilityExtractor, SlotProgress};
use ccnews_http::ReqwestTransport;

use crate::error::CliError;
use crate::parser::Cli;
use crate::presentation::{intro, loading_message, outcome_line, selection_help, summary_line};
use crate::prompt::{EditorSource, LineSource, prompt_for_files};

/// Run the session on the terminal.
pub async fn run(cli: &Cli, multi: MultiProgress) -> Result<RunSummary, CliError> {
    let settings = cli.settings()?;
    tracing::debug!(?settings, "Loaded settings");

    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(settings.http.clone())?);
    let mut source = EditorSource::new()?;
    let outcomes = ingest(
        cli.period,
        &settings,
        transport,
        &mut source,
        &mut io::stdout(),
        multi,
    )
    .await?;
    Ok(RunSummary::from_outcomes(&outcomes))
}

/// Resolve the catalog for `period`, ask which files to load and ingest them.
///
/// Everything meant for the user is written to `out`; progress bars are
/// added to `multi` only once ingestion starts.
pub async fn ingest<S, W>(
    period: YearMonth,
    settings: &Settings,
    transport: Arc<dyn HttpTransport>,
    source: &mut S,
    out: &mut W,
    multi: MultiProgress,
) -> Result<Vec<IngestionOutcome>, CliError>
where
    S: LineSource,
    W: Write,
{
    writeln!(out, "{}", intro(period))?;

    let resolver = CatalogResolver::new(Arc::clone(&transport), settings.catalog.clone());
    let catalog = resolver.get_catalog(period).await?;
    writeln!(out, "{}\n", render_catalog_table(&catalog, settings.etl.table_length))?;

    let Some(id_range) = catalog.id_range() else {
        return Err(CliError::CatalogNotFound { period });
    };
    writeln!(out, "{}", selection_help(&id_range))?;

    let files = prompt_for_files(source, out, &catalog)?;
    writeln!(out, "{}", loading_message(files))?;
    out.flush()?;

    let progress = Arc::new(SlotProgress::with_multi(multi, settings.etl.max_concurrency));
    let engine = IngestionEngine::new(transport, Arc::new(ReadabilityExtractor::new()))
        .with_settings(&settings.catalog, &settings.etl)
        .with_progress(progress.clone());
    let outcomes = engine.run(files).await;
    progress.clear();

    for outcome in &outcomes {
        writeln!(out, "{}", outcome_line(outcome))?;
    }
    writeln!(out, "{}", summary_line(&RunSummary::from_outcomes(&outcomes)))?;
    Ok(outcomes)
}
