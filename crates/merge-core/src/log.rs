//! Logging capability used by the ingestion engine and the run summary.
//!
//! Code that reports diagnostics takes a `&dyn LogSink` instead of calling
//! `tracing` directly, so tests can capture messages with [`MemorySink`].

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

// ── Channel / Severity ────────────────────────────────────────────────────────

/// The two independent log channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Run-level summary messages.
    Transactions,
    /// Per-source and per-line diagnostics.
    FileAccess,
}

impl Channel {
    /// `tracing` target the channel is emitted under.
    pub fn target(&self) -> &'static str {
        match self {
            Channel::Transactions => TRANSACTIONS_TARGET,
            Channel::FileAccess => FILE_ACCESS_TARGET,
        }
    }
}

pub const TRANSACTIONS_TARGET: &str = "TransactionLogger";
pub const FILE_ACCESS_TARGET: &str = "FileAccessLogger";

/// Message severity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

// ── LogSink ───────────────────────────────────────────────────────────────────

/// Minimal logging capability: one message on one channel at one severity.
pub trait LogSink {
    fn log(&self, channel: Channel, severity: Severity, message: &str);
}

/// Forwards every message to `tracing`, using the channel as the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

macro_rules! emit {
    ($target:expr, $severity:expr, $message:expr) => {
        match $severity {
            Severity::Debug => tracing::debug!(target: $target, "{}", $message),
            Severity::Info => tracing::info!(target: $target, "{}", $message),
            Severity::Warn => tracing::warn!(target: $target, "{}", $message),
            Severity::Error => tracing::error!(target: $target, "{}", $message),
        }
    };
}

impl LogSink for TracingSink {
    fn log(&self, channel: Channel, severity: Severity, message: &str) {
        // Targets have to be constant for the callsite metadata.
        match channel {
            Channel::Transactions => emit!(TRANSACTIONS_TARGET, severity, message),
            Channel::FileAccess => emit!(FILE_ACCESS_TARGET, severity, message),
        }
    }
}

// ── MemorySink ────────────────────────────────────────────────────────────────

/// A captured log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub channel: Channel,
    pub severity: Severity,
    pub message: String,
}

/// Collects messages in memory instead of writing them anywhere.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, in order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Messages logged on `channel` at exactly `severity`.
    pub fn messages(&self, channel: Channel, severity: Severity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.channel == channel && e.severity == severity)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Number of messages at `severity` across both channels.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.severity == severity)
            .count()
    }
}

impl LogSink for MemorySink {
    fn log(&self, channel: Channel, severity: Severity, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            channel,
            severity,
            message: message.to_string(),
        });
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_targets() {
        assert_eq!(Channel::Transactions.target(), "TransactionLogger");
        assert_eq!(Channel::FileAccess.target(), "FileAccessLogger");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warn.to_string(), "warn");
        assert_eq!(Severity::Error.to_string(), "error");
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.log(Channel::FileAccess, Severity::Info, "first");
        sink.log(Channel::Transactions, Severity::Info, "second");
        sink.log(Channel::FileAccess, Severity::Error, "third");

        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].channel, Channel::Transactions);
        assert_eq!(entries[2].severity, Severity::Error);
    }

    #[test]
    fn test_memory_sink_filters_by_channel_and_severity() {
        let sink = MemorySink::new();
        sink.log(Channel::FileAccess, Severity::Error, "bad line");
        sink.log(Channel::Transactions, Severity::Error, "other channel");
        sink.log(Channel::FileAccess, Severity::Warn, "missing");

        assert_eq!(
            sink.messages(Channel::FileAccess, Severity::Error),
            vec!["bad line".to_string()]
        );
        assert_eq!(sink.count(Severity::Error), 2);
        assert_eq!(sink.count(Severity::Debug), 0);
    }

    #[test]
    fn test_tracing_sink_without_subscriber_is_noop() {
        // No global subscriber installed: events are dropped silently.
        TracingSink.log(Channel::FileAccess, Severity::Debug, "ignored");
        TracingSink.log(Channel::Transactions, Severity::Error, "ignored");
    }
}
