//! Storage boundaries: JSON result sets and CSV export.

pub mod export;
pub mod store;
