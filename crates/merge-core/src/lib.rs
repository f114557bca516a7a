//! Shared types for the transaction merger.
//!
//! Holds the [`models::Purchase`] record, the fault taxonomy, the logging
//! capability the ingestion engine reports through, formatters and CLI
//! settings.

pub mod error;
pub mod formatting;
pub mod log;
pub mod models;
pub mod settings;
