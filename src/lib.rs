//! Offline analytics pipeline for a home solar + battery installation.
//!
//! Transforms raw 5-minute interval usage records (import/export channels
//! with wholesale prices) into daily and monthly financial summaries, a
//! per-day battery-performance score, and price-distribution aggregates,
//! written to storage as JSON result sets for the dashboard to consume.

/// Merging, aggregation, battery scoring, and price statistics.
pub mod analysis;
pub mod config;
pub mod io;
pub mod report;
