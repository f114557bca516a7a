//! Transaction file ingestion.
//!
//! Reads `<label>,<amount>,<DD-MM-YYYY>` lines from one source at a time and
//! appends every well-formed line to a caller-owned [`Purchase`] list. Faults
//! never escape this module: a bad line is skipped, a missing or unreadable
//! source is skipped, and each is reported through the [`LogSink`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use merge_core::error::{FaultKind, LineError, SourceError};
use merge_core::formatting::DateFormat;
use merge_core::log::{Channel, LogSink, Severity};
use merge_core::models::Purchase;

pub const FIELD_DELIMITER: char = ',';
pub const FIELD_COUNT: usize = 3;

// ── Source access ─────────────────────────────────────────────────────────────

/// Opens and releases the line-reading handle behind a source identifier.
pub trait SourceProvider {
    type Handle: BufRead;

    fn open(&self, path: &Path) -> io::Result<Self::Handle>;

    /// Release a handle returned by [`SourceProvider::open`].
    fn release(&self, handle: Self::Handle) -> io::Result<()>;
}

/// Reads sources from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl SourceProvider for FileSystem {
    type Handle = BufReader<File>;

    fn open(&self, path: &Path) -> io::Result<Self::Handle> {
        File::open(path).map(BufReader::new)
    }

    fn release(&self, handle: Self::Handle) -> io::Result<()> {
        // std closes on drop and has no fallible close for read-only files.
        drop(handle.into_inner());
        Ok(())
    }
}

/// Owns an open handle and releases it exactly once when dropped, including
/// during unwinding.
struct OpenSource<'a, P: SourceProvider> {
    provider: &'a P,
    handle: Option<P::Handle>,
    path: &'a Path,
    sink: &'a dyn LogSink,
}

impl<'a, P: SourceProvider> OpenSource<'a, P> {
    fn new(provider: &'a P, handle: P::Handle, path: &'a Path, sink: &'a dyn LogSink) -> Self {
        Self {
            provider,
            handle: Some(handle),
            path,
            sink,
        }
    }

    /// `None` only after the handle has been released.
    fn reader(&mut self) -> Option<&mut P::Handle> {
        self.handle.as_mut()
    }
}

impl<P: SourceProvider> Drop for OpenSource<'_, P> {
    fn drop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Err(source) = self.provider.release(handle) {
            let err = SourceError::Release {
                path: self.path.to_path_buf(),
                source,
            };
            self.sink
                .log(Channel::FileAccess, err.kind().severity(), &err.to_string());
        }
    }
}

// ── Per-line parsing ──────────────────────────────────────────────────────────

/// A line that was skipped, together with the reason.
#[derive(Debug)]
pub struct LineFault {
    pub error: LineError,
    pub line: String,
}

impl LineFault {
    pub fn kind(&self) -> FaultKind {
        self.error.kind()
    }

    /// Operator-facing message for the file-access channel.
    pub fn message(&self, path: &Path) -> String {
        match self.kind() {
            FaultKind::DateFormat => format!(
                "cannot parse date from string - please check whether syntax is correct: {}",
                self.line
            ),
            FaultKind::NumberFormat => format!(
                "cannot parse double from string - please check whether syntax is correct: {}",
                self.line
            ),
            _ => format!(
                "unexpected content in file {}, line: {} ({})",
                path.display(),
                self.line,
                self.error
            ),
        }
    }
}

/// Result of classifying one input line.
#[derive(Debug)]
pub enum LineOutcome {
    Parsed(Purchase),
    Skipped(LineFault),
}

/// Parse one `<label>,<amount>,<date>` line.
///
/// The label is kept verbatim; amount and date are trimmed before parsing.
pub fn parse_line(line: &str, dates: &DateFormat) -> Result<Purchase, LineError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let &[label, amount, date] = fields.as_slice() else {
        return Err(LineError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    if label.trim().is_empty() {
        return Err(LineError::EmptyLabel);
    }

    let amount = parse_amount(amount)?;
    let occurred_on = dates.parse(date).map_err(|source| LineError::DateFormat {
        value: date.trim().to_string(),
        source,
    })?;

    Ok(Purchase::new(label, amount, occurred_on))
}

/// Classify a line without ever failing.
pub fn classify_line(line: &str, dates: &DateFormat) -> LineOutcome {
    match parse_line(line, dates) {
        Ok(purchase) => LineOutcome::Parsed(purchase),
        Err(error) => LineOutcome::Skipped(LineFault {
            error,
            line: line.to_string(),
        }),
    }
}

fn parse_amount(text: &str) -> Result<f64, LineError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LineError::NumberFormat(trimmed.to_string())),
    }
}

// ── SourceReport ──────────────────────────────────────────────────────────────

/// How processing of a source ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// Read to the end.
    Completed,
    /// Did not exist; nothing was read.
    Missing,
    /// Could not be opened, or a read failed part-way.
    ReadFailed,
}

/// Tally of what happened while ingesting one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub path: PathBuf,
    pub status: SourceStatus,
    pub lines_read: usize,
    pub imported: usize,
    pub skipped: BTreeMap<FaultKind, usize>,
}

impl SourceReport {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            status: SourceStatus::Completed,
            lines_read: 0,
            imported: 0,
            skipped: BTreeMap::new(),
        }
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn skipped_of(&self, kind: FaultKind) -> usize {
        self.skipped.get(&kind).copied().unwrap_or(0)
    }

    fn record_skip(&mut self, kind: FaultKind) {
        *self.skipped.entry(kind).or_insert(0) += 1;
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Ingest one source, appending every well-formed line to `purchases`.
///
/// * A missing source is logged at warn and skipped.
/// * Any other open failure, or a read failure mid-stream, is logged at error
///   and stops reading this source; purchases already read are kept.
/// * A malformed line is logged at error and skipped.
///
/// The handle is released exactly once before this returns, whichever way
/// processing ended.
pub fn read_source<P: SourceProvider>(
    path: &Path,
    provider: &P,
    dates: &DateFormat,
    purchases: &mut Vec<Purchase>,
    sink: &dyn LogSink,
) -> SourceReport {
    let mut report = SourceReport::new(path);
    sink.log(
        Channel::FileAccess,
        Severity::Info,
        &format!("import data from {}", path.display()),
    );

    let handle = match provider.open(path) {
        Ok(handle) => handle,
        Err(source) => {
            let err = SourceError::from_open(path, source);
            report.status = match err.kind() {
                FaultKind::MissingSource => SourceStatus::Missing,
                _ => SourceStatus::ReadFailed,
            };
            log_source_fault(&err, sink);
            return report;
        }
    };

    let mut source = OpenSource::new(provider, handle, path, sink);
    if let Some(reader) = source.reader() {
        read_lines(reader, path, dates, purchases, &mut report, sink);
    }

    report
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_lines<R: BufRead>(
    reader: &mut R,
    path: &Path,
    dates: &DateFormat,
    purchases: &mut Vec<Purchase>,
    report: &mut SourceReport,
    sink: &dyn LogSink,
) {
    let mut raw = Vec::new();
    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw) {
            Ok(0) => return,
            Ok(_) => {}
            Err(source) => {
                let err = SourceError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                report.status = SourceStatus::ReadFailed;
                log_source_fault(&err, sink);
                return;
            }
        }
        let line = decode_line(&raw);
        report.lines_read += 1;

        match classify_line(&line, dates) {
            LineOutcome::Parsed(purchase) => {
                sink.log(
                    Channel::FileAccess,
                    Severity::Debug,
                    &format!("imported transaction {}", purchase),
                );
                purchases.push(purchase);
                report.imported += 1;
            }
            LineOutcome::Skipped(fault) => {
                sink.log(
                    Channel::FileAccess,
                    fault.kind().severity(),
                    &fault.message(path),
                );
                report.record_skip(fault.kind());
            }
        }
    }
}

/// Strip the `\n` or `\r\n` terminator and decode, replacing invalid UTF-8
/// with U+FFFD.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

fn log_source_fault(err: &SourceError, sink: &dyn LogSink) {
    let message = match err {
        SourceError::Missing { .. } => format!("{} - skip", err),
        _ => err.to_string(),
    };
    sink.log(Channel::FileAccess, err.kind().severity(), &message);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
