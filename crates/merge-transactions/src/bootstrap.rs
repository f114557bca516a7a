use anyhow::Context;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use merge_core::log::Channel;
use merge_core::settings::Settings;

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name (`DEBUG`, `WARNING`, ...) to a `tracing` level name.
/// Unknown names are passed through lowercased.
pub fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Build the [`EnvFilter`] directive string: the global level first, then
/// one override per channel that has its own level.
pub fn filter_directives(settings: &Settings) -> String {
    let mut directives = vec![normalise_level(&settings.log_level)];
    let channels = [
        (Channel::Transactions, &settings.transaction_log_level),
        (Channel::FileAccess, &settings.file_log_level),
    ];
    for (channel, level) in channels {
        if let Some(level) = level {
            directives.push(format!("{}={}", channel.target(), normalise_level(level)));
        }
    }
    directives.join(",")
}

/// Initialise the global `tracing` subscriber.
///
/// Output always goes to stderr; with `--log-file` it is also appended to
/// that file without ANSI colours. Falls back to `"info"` if the directives
/// cannot be parsed.
pub fn setup_logging(settings: &Settings) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directives(settings)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
