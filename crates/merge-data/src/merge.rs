//! Run pipeline: ingest every source in order, then report the summary.

use std::path::PathBuf;

use merge_core::formatting::{CurrencyFormat, DateFormat};
use merge_core::log::{Channel, LogSink, Severity};
use merge_core::models::Purchase;

use crate::aggregator::Summary;
use crate::reader::{read_source, SourceProvider, SourceReport, SourceStatus};

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything produced by [`merge_sources`].
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Purchases in order of appearance across all sources.
    pub purchases: Vec<Purchase>,
    /// One report per source, in processing order.
    pub reports: Vec<SourceReport>,
}

impl MergeOutcome {
    pub fn summary(&self) -> Summary {
        Summary::from_purchases(&self.purchases)
    }

    /// Sources that were skipped entirely or cut short.
    pub fn incomplete_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.reports
            .iter()
            .filter(|r| r.status != SourceStatus::Completed)
    }

    /// Lines skipped for line-level faults, summed over every source.
    pub fn skipped_lines(&self) -> usize {
        self.reports
            .iter()
            .flat_map(|r| r.skipped.iter())
            .filter(|(kind, _)| kind.is_line_level())
            .map(|(_, count)| count)
            .sum()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Ingest `sources` one after another into a single purchase list.
///
/// Never fails: whatever could not be read is logged and left out.
pub fn merge_sources<P: SourceProvider>(
    sources: &[PathBuf],
    provider: &P,
    dates: &DateFormat,
    sink: &dyn LogSink,
) -> MergeOutcome {
    let mut purchases = Vec::new();
    let mut reports = Vec::with_capacity(sources.len());

    for path in sources {
        let report = read_source(path, provider, dates, &mut purchases, sink);
        if report.status != SourceStatus::Missing {
            sink.log(
                Channel::FileAccess,
                Severity::Info,
                &format!(
                    "{}: {} lines read, {} imported, {} skipped",
                    path.display(),
                    report.lines_read,
                    report.imported,
                    report.skipped_total()
                ),
            );
        }
        reports.push(report);
    }

    MergeOutcome { purchases, reports }
}

/// Emit the run summary on the transaction channel.
pub fn report_summary(summary: &Summary, currency: &CurrencyFormat, sink: &dyn LogSink) {
    let info = |message: String| sink.log(Channel::Transactions, Severity::Info, &message);

    info(format!("{} transactions imported", summary.count));
    info(format!("total value: {}", currency.format(summary.total)));
    info(format!("max value: {}", currency.format(summary.max)));
    if let Some(min) = summary.min {
        info(format!("min value: {}", currency.format(min)));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
