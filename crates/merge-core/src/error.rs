use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::log::Severity;

// ── FaultKind ─────────────────────────────────────────────────────────────────

/// Classification of every fault the ingestion engine recovers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaultKind {
    /// The source does not exist; the whole source is skipped.
    MissingSource,
    /// The source could not be opened or a read failed mid-stream.
    IoFailure,
    /// The date field did not match `DD-MM-YYYY`.
    DateFormat,
    /// The amount field was not a finite number.
    NumberFormat,
    /// Any other per-line problem, e.g. a missing field.
    GenericLine,
    /// Releasing the read handle failed.
    ReleaseFailure,
}

impl FaultKind {
    /// Severity the fault is logged at.
    pub fn severity(&self) -> Severity {
        match self {
            FaultKind::MissingSource => Severity::Warn,
            _ => Severity::Error,
        }
    }

    /// `true` for faults that skip a single line rather than a source.
    pub fn is_line_level(&self) -> bool {
        matches!(
            self,
            FaultKind::DateFormat | FaultKind::NumberFormat | FaultKind::GenericLine
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::MissingSource => "missing-source",
            FaultKind::IoFailure => "io-failure",
            FaultKind::DateFormat => "date-format",
            FaultKind::NumberFormat => "number-format",
            FaultKind::GenericLine => "generic-line",
            FaultKind::ReleaseFailure => "resource-release-failure",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── LineError ─────────────────────────────────────────────────────────────────

/// Why a single input line could not be turned into a purchase.
#[derive(Error, Debug)]
pub enum LineError {
    /// The line did not split into the expected fields.
    #[error("expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// The label column was empty.
    #[error("label field is empty")]
    EmptyLabel,

    /// The amount column is not a finite number.
    #[error("invalid amount: {0:?}")]
    NumberFormat(String),

    /// The date column does not match the expected pattern.
    #[error("invalid date {value:?}: {source}")]
    DateFormat {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl LineError {
    pub fn kind(&self) -> FaultKind {
        match self {
            LineError::FieldCount { .. } | LineError::EmptyLabel => FaultKind::GenericLine,
            LineError::NumberFormat(_) => FaultKind::NumberFormat,
            LineError::DateFormat { .. } => FaultKind::DateFormat,
        }
    }
}

// ── SourceError ───────────────────────────────────────────────────────────────

/// Faults that affect a whole input source rather than one line.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Nothing exists at the given path.
    #[error("file {} does not exist", .path.display())]
    Missing { path: PathBuf },

    /// The source could not be opened, or reading it failed part-way.
    #[error("problem reading file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The read handle could not be released.
    #[error("cannot close reader used to access {}: {source}", .path.display())]
    Release {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Classify an error returned while opening `path`.
    pub fn from_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            SourceError::Missing { path }
        } else {
            SourceError::Read { path, source }
        }
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            SourceError::Missing { .. } => FaultKind::MissingSource,
            SourceError::Read { .. } => FaultKind::IoFailure,
            SourceError::Release { .. } => FaultKind::ReleaseFailure,
        }
    }
}
