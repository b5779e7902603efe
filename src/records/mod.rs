//! Measurement records and the CSV stream they are read from.

mod reader;
mod types;

// Re-export public API
pub use reader::RecordReader;
pub use types::{Record, RecordLine};
