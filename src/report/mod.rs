//! Final aggregate report.
//!
//! Built once from the [`AggregateState`] after the whole record stream has
//! been consumed, then rendered as plain text or JSON.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::config::ReportFormat;
use crate::geoip::GeoIpMetadata;
use crate::validation::{AggregateState, Classification};

/// Distinct-address count of one error classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationCount {
    pub classification: Classification,
    pub label: &'static str,
    pub addresses: usize,
}

/// Aggregate error statistics of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Records consumed across all inputs
    pub records_processed: usize,
    /// Distinct client addresses seen
    pub addresses_seen: usize,
    /// Non-empty error buckets, in rule precedence order
    pub error_counts: Vec<ClassificationCount>,
    /// `addresses_seen` minus the sum of `error_counts`
    pub error_free: i64,
    /// Addresses that landed in more than one bucket
    pub mixed_outcome_addresses: usize,
    /// Ground-truth snapshot the run was validated against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<GeoIpMetadata>,
}

impl ValidationReport {
    pub fn from_state(state: &AggregateState, database: Option<GeoIpMetadata>) -> Self {
        let error_counts = Classification::iter()
            .filter(Classification::is_error)
            .filter_map(|classification| {
                let addresses = state.bucket_len(classification);
                (addresses > 0).then_some(ClassificationCount {
                    classification,
                    label: classification.as_str(),
                    addresses,
                })
            })
            .collect();

        Self {
            records_processed: state.records_processed(),
            addresses_seen: state.seen_count(),
            error_counts,
            error_free: state.error_free_by_subtraction(),
            mixed_outcome_addresses: state.mixed_outcome_count(),
            database,
        }
    }

    /// True if any record received an error classification.
    pub fn has_errors(&self) -> bool {
        !self.error_counts.is_empty()
    }

    /// Number of addresses in the given error bucket (0 if empty).
    pub fn count(&self, classification: Classification) -> usize {
        self.error_counts
            .iter()
            .find(|c| c.classification == classification)
            .map_or(0, |c| c.addresses)
    }

    pub fn render_plain(&self) -> String {
        let mut out = format!("Addresses Seen: {}\n", self.addresses_seen);
        for count in &self.error_counts {
            out.push_str(&format!("{}: {}\n", count.label, count.addresses));
        }
        out.push_str(&format!("Fine: {}\n", self.error_free));
        if self.mixed_outcome_addresses > 0 {
            out.push_str(&format!(
                "Addresses With Mixed Outcomes: {}\n",
                self.mixed_outcome_addresses
            ));
        }
        out
    }

    pub fn render_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    /// Writes the report in `format` to `writer`.
    pub fn write_to<W: Write>(&self, format: ReportFormat, mut writer: W) -> Result<()> {
        let rendered = match format {
            ReportFormat::Plain => self.render_plain(),
            ReportFormat::Json => self.render_json()? + "\n",
        };
        writer
            .write_all(rendered.as_bytes())
            .context("Failed to write report")?;
        writer.flush().context("Failed to flush report")?;
        Ok(())
    }
}
