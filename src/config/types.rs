//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{COLUMN_CLIENT_IP, DEFAULT_GEOIP_PATH};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Format of the final aggregate report written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One `label count` line per classification plus totals
    Plain,
    /// A single JSON object
    Json,
}

/// Exit status policy applied after the report is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once the report is emitted
    Never,
    /// Exit 2 if any record received an error classification
    AnyError,
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Validate a single export against the default database
/// geo_validate results.csv
///
/// # Several exports, explicit database, JSON report
/// geo_validate jan.csv feb.csv --geoip /data/GeoLite2-City.mmdb --report-format json
///
/// # Older exports that name the client address differently
/// geo_validate old.csv --ip-column web100_log_entry_connection_spec_remote_ip
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "geo_validate",
    about = "Validates recorded client geolocation against a MaxMind GeoLite2 database."
)]
pub struct Opt {
    /// Measurement CSV file(s) to validate, processed in order
    #[arg(value_parser, required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// GeoIP database path (MaxMind GeoLite2-City .mmdb file)
    #[arg(long, value_parser, default_value = DEFAULT_GEOIP_PATH)]
    pub geoip: PathBuf,

    /// Name of the column holding the client IP address
    #[arg(long, default_value = COLUMN_CLIENT_IP)]
    pub ip_column: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Report format: plain|json
    #[arg(long, value_enum, default_value_t = ReportFormat::Plain)]
    pub report_format: ReportFormat,

    /// Write one CSV row per processed record with its classification
    #[arg(long, value_parser)]
    pub output: Option<PathBuf>,

    /// Exit status policy: never|any-error
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through `clap`.
///
/// # Examples
///
/// ```no_run
/// use geo_validate::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     inputs: vec![PathBuf::from("results.csv")],
///     geoip: PathBuf::from("GeoLite2-City.mmdb"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Files to read records from, in processing order
    pub inputs: Vec<PathBuf>,

    /// GeoIP database path
    pub geoip: PathBuf,

    /// Client IP column name
    pub ip_column: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Report format
    pub report_format: ReportFormat,

    /// Optional per-record classification export
    pub output: Option<PathBuf>,

    /// Exit status policy
    pub fail_on: FailOn,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            geoip: PathBuf::from(DEFAULT_GEOIP_PATH),
            ip_column: COLUMN_CLIENT_IP.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            report_format: ReportFormat::Plain,
            output: None,
            fail_on: FailOn::Never,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            inputs: opt.inputs,
            geoip: opt.geoip,
            ip_column: opt.ip_column,
            log_level: opt.log_level,
            log_format: opt.log_format,
            report_format: opt.report_format,
            output: opt.output,
            fail_on: opt.fail_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.inputs.is_empty());
        assert_eq!(config.geoip, PathBuf::from("support/GeoLite2-City.mmdb"));
        assert_eq!(config.ip_column, "connection_spec_client_ip");
        assert_eq!(config.report_format, ReportFormat::Plain);
        assert_eq!(config.fail_on, FailOn::Never);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_opt_requires_at_least_one_input() {
        let result = Opt::try_parse_from(["geo_validate"]);
        assert!(result.is_err(), "Parsing without inputs should fail");
    }

    #[test]
    fn test_opt_into_config_preserves_input_order() {
        let opt = Opt::try_parse_from(["geo_validate", "b.csv", "a.csv", "--fail-on", "any-error"])
            .expect("Should parse");
        let config = Config::from(opt);
        assert_eq!(
            config.inputs,
            vec![PathBuf::from("b.csv"), PathBuf::from("a.csv")]
        );
        assert_eq!(config.fail_on, FailOn::AnyError);
    }

    #[test]
    fn test_opt_ip_column_override() {
        let opt = Opt::try_parse_from([
            "geo_validate",
            "old.csv",
            "--ip-column",
            "web100_log_entry_connection_spec_remote_ip",
        ])
        .expect("Should parse");
        assert_eq!(opt.ip_column, "web100_log_entry_connection_spec_remote_ip");
    }
}
