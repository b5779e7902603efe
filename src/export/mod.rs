//! Per-record classification export.
//!
//! Writes one CSV row per processed record so individual outcomes can be
//! inspected after the aggregate report.

mod csv;

pub use self::csv::ClassificationExporter;
