mod bootstrap;

use anyhow::Result;
use merge_core::log::TracingSink;
use merge_core::settings::Settings;
use merge_data::merge::{merge_sources, report_summary};
use merge_data::reader::FileSystem;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings)?;

    tracing::debug!(
        "merge-transactions v{} starting with {} sources",
        env!("CARGO_PKG_VERSION"),
        settings.sources.len()
    );

    let dates = settings.date_format();
    let currency = settings.currency_format();
    let sink = TracingSink;

    let outcome = merge_sources(&settings.sources, &FileSystem, &dates, &sink);
    report_summary(&outcome.summary(), &currency, &sink);

    // Skipped sources and lines are only visible in the log; the exit status stays 0.
    let incomplete = outcome.incomplete_sources().count();
    if incomplete > 0 {
        tracing::debug!("{} of {} sources were not fully read", incomplete, outcome.reports.len());
    }
    let skipped = outcome.skipped_lines();
    if skipped > 0 {
        tracing::debug!("{} malformed lines skipped", skipped);
    }

    Ok(())
}
