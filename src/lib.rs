//! geo_validate library: client geolocation validation against GeoIP ground truth
//!
//! This library reads measurement-platform CSV exports, resolves each record's
//! client address in a MaxMind GeoLite2-City database, classifies the record's
//! self-reported country against that ground truth, and aggregates the
//! distinct addresses affected by each kind of discrepancy.
//!
//! # Example
//!
//! ```no_run
//! use geo_validate::{run_validation, Config};
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     inputs: vec![PathBuf::from("results.csv")],
//!     geoip: PathBuf::from("GeoLite2-City.mmdb"),
//!     ..Default::default()
//! };
//!
//! let report = run_validation(&config)?;
//! println!("{}", report.render_plain());
//! # Ok(())
//! # }
//! ```
//!
//! Any [`geoip::Resolver`] can stand in for the MaxMind database via
//! [`run_with_resolver`].

pub mod config;
pub mod error_handling;
pub mod export;
pub mod geoip;
pub mod initialization;
pub mod records;
pub mod report;
pub mod validation;

// Re-export public API
pub use config::{Config, FailOn, LogFormat, LogLevel, ReportFormat};
pub use error_handling::ValidationError;
pub use report::ValidationReport;
pub use run::{evaluate_exit_code, run_validation, run_with_resolver};

// Internal run module (contains the record loop)
mod run {
    use anyhow::{bail, Result};
    use log::{debug, info};

    use crate::config::{Config, FailOn, PROGRESS_LOG_INTERVAL};
    use crate::error_handling::ValidationError;
    use crate::export::ClassificationExporter;
    use crate::geoip::{GeoIpResolver, Resolver};
    use crate::records::RecordReader;
    use crate::report::ValidationReport;
    use crate::validation::ValidationEngine;

    /// Runs a validation with the database named in `config.geoip`.
    ///
    /// The database is opened before any input is read, so an unusable
    /// database fails the run with `ValidationError::ResolverUnavailable`
    /// without touching the inputs.
    ///
    /// # Errors
    ///
    /// Any [`ValidationError`] (malformed input, resolver failure, unreadable
    /// file) or export failure aborts the run; no partial report is returned.
    pub fn run_validation(config: &Config) -> Result<ValidationReport> {
        let resolver = GeoIpResolver::open(&config.geoip)?;
        run_with_resolver(config, resolver)
    }

    /// Runs a validation against an already constructed resolver.
    ///
    /// `config.geoip` is ignored. Inputs are processed strictly in order, one
    /// record at a time.
    pub fn run_with_resolver<R: Resolver>(
        config: &Config,
        resolver: R,
    ) -> Result<ValidationReport> {
        if config.inputs.is_empty() {
            bail!("No input files given");
        }

        let mut exporter = config
            .output
            .as_deref()
            .map(ClassificationExporter::create)
            .transpose()?;

        let mut engine = ValidationEngine::new(resolver);

        for path in &config.inputs {
            info!("Validating records from {}", path.display());
            let reader = RecordReader::open(path, &config.ip_column)?;

            for entry in reader {
                let entry = entry?;
                let outcome = engine.process(&entry.record).map_err(|cause| {
                    ValidationError::Resolver {
                        ip: entry.record.client_ip.clone(),
                        file: path.clone(),
                        line: entry.line,
                        cause,
                    }
                })?;

                if let Some(exporter) = exporter.as_mut() {
                    exporter.write(path, &entry, &outcome)?;
                }

                let processed = engine.state().records_processed();
                if processed % PROGRESS_LOG_INTERVAL == 0 {
                    debug!(
                        "{} records processed, {} distinct addresses",
                        processed,
                        engine.state().seen_count()
                    );
                }
            }
        }

        if let Some(exporter) = exporter {
            let rows = exporter.finish()?;
            if let Some(output) = &config.output {
                info!("Wrote {} classified records to {}", rows, output.display());
            }
        }

        let database = engine.resolver().metadata().cloned();
        let report = ValidationReport::from_state(engine.state(), database);
        info!(
            "Validated {} records ({} distinct addresses, {} error classification(s))",
            report.records_processed,
            report.addresses_seen,
            report.error_counts.len()
        );
        Ok(report)
    }

    /// Maps a finished report to the process exit status under `fail_on`.
    pub fn evaluate_exit_code(fail_on: FailOn, report: &ValidationReport) -> i32 {
        match fail_on {
            FailOn::Never => 0,
            FailOn::AnyError => {
                if report.has_errors() {
                    2
                } else {
                    0
                }
            }
        }
    }
}
