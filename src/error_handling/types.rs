//! Error type definitions.
//!
//! Classification outcomes (missing ground truth, missing reported country,
//! country mismatch) are not errors and never appear here. Everything in this
//! module aborts the run.

use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Failure of a single resolver lookup other than "not found".
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The address is not valid IPv4/IPv6 text.
    #[error("invalid IP address syntax: {0:?}")]
    InvalidAddress(String),

    /// The database returned an error while searching or decoding.
    #[error("GeoIP database lookup failed: {0}")]
    Database(#[from] maxminddb::MaxMindDbError),
}

/// Fatal errors raised while validating a record stream.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The GeoIP database could not be opened or parsed.
    #[error("GeoIP database {path} unavailable: {reason}")]
    ResolverUnavailable { path: PathBuf, reason: String },

    /// A record (or header) is structurally unusable.
    #[error("malformed input in {file} at line {line}: {reason}")]
    MalformedInput {
        file: PathBuf,
        line: u64,
        reason: String,
    },

    /// The resolver failed for a reason other than a missing entry.
    #[error("lookup of {ip} failed ({file} line {line})")]
    Resolver {
        ip: String,
        file: PathBuf,
        line: u64,
        #[source]
        cause: ResolveError,
    },

    /// An input or output file could not be opened.
    #[error("cannot open {path}")]
    Io {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// Reading or writing CSV failed below the record level.
    #[error("CSV error in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        cause: csv::Error,
    },
}
