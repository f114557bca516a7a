//! Ingestion layer for the transaction merger.
//!
//! Reads transaction files into [`merge_core::models::Purchase`] records,
//! computes summary figures and runs the per-source merge pipeline.

pub mod aggregator;
pub mod merge;
pub mod reader;
