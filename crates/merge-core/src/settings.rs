use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::formatting::{CurrencyFormat, DateFormat};

const LOG_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Merge transaction files and report count, total and maximum value
#[derive(Parser, Debug, Clone)]
#[command(
    name = "merge-transactions",
    about = "Merge transaction files and report count, total and maximum value",
    version
)]
pub struct Settings {
    /// Transaction files to import, processed in order
    #[arg(default_values = [
        "transactions1.csv",
        "transactions2.csv",
        "transactions3.csv",
        "transactions4.csv",
    ])]
    pub sources: Vec<PathBuf>,

    /// Currency symbol used in the summary
    #[arg(long, default_value = "$")]
    pub currency: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = LOG_LEVELS)]
    pub log_level: String,

    /// Level for the transaction summary channel (overrides --log-level)
    #[arg(long, value_parser = LOG_LEVELS)]
    pub transaction_log_level: Option<String>,

    /// Level for the file access channel (overrides --log-level)
    #[arg(long, value_parser = LOG_LEVELS)]
    pub file_log_level: Option<String>,

    /// Also write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging on every channel
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::resolve_debug(Settings::parse_from(args))
    }

    /// `--debug` wins over every level flag.
    fn resolve_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
            settings.transaction_log_level = None;
            settings.file_log_level = None;
        }
        settings
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency.clone(), 2)
    }

    pub fn date_format(&self) -> DateFormat {
        DateFormat::default()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::load_from_args(["merge-transactions"]);

        assert_eq!(
            settings.sources,
            vec![
                PathBuf::from("transactions1.csv"),
                PathBuf::from("transactions2.csv"),
                PathBuf::from("transactions3.csv"),
                PathBuf::from("transactions4.csv"),
            ]
        );
        assert_eq!(settings.currency, "$");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.transaction_log_level.is_none());
        assert!(settings.file_log_level.is_none());
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_explicit_sources_replace_defaults() {
        let settings = Settings::load_from_args(["merge-transactions", "a.csv", "b.csv"]);
        assert_eq!(
            settings.sources,
            vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]
        );
    }

    #[test]
    fn test_settings_channel_levels() {
        let settings = Settings::load_from_args([
            "merge-transactions",
            "--file-log-level",
            "DEBUG",
            "--transaction-log-level",
            "WARNING",
        ]);
        assert_eq!(settings.file_log_level.as_deref(), Some("DEBUG"));
        assert_eq!(settings.transaction_log_level.as_deref(), Some("WARNING"));
    }

    #[test]
    fn test_settings_rejects_unknown_level() {
        let result = Settings::try_parse_from(["merge-transactions", "--log-level", "LOUD"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_debug_overrides_levels() {
        let settings = Settings::load_from_args([
            "merge-transactions",
            "--debug",
            "--file-log-level",
            "ERROR",
        ]);
        assert_eq!(settings.log_level, "DEBUG");
        assert!(settings.file_log_level.is_none());
    }

    #[test]
    fn test_settings_log_file() {
        let settings =
            Settings::load_from_args(["merge-transactions", "--log-file", "/tmp/merge.log"]);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/merge.log")));
    }

    #[test]
    fn test_settings_formatters() {
        let settings = Settings::load_from_args(["merge-transactions", "--currency", "€"]);
        assert_eq!(settings.currency_format().format(4.5), "€4.50");
        assert_eq!(settings.date_format(), DateFormat::default());
    }
}
