//! Classification outcomes.

use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;

/// The single outcome assigned to a record.
///
/// Variants are listed in rule precedence order: when several conditions hold,
/// the earliest error variant wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The database has no entry for the client address.
    MissingGroundTruth,
    /// The record's reported country code is empty.
    MissingReportedCountry,
    /// Resolved and reported country codes differ.
    CountryMismatch,
    /// Resolved and reported country codes agree.
    NoError,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Classification {
    /// Human-readable label used in the report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::MissingGroundTruth => "Missing Entry from Maxmind",
            Classification::MissingReportedCountry => "Missing Country Code from BigQuery",
            Classification::CountryMismatch => "Incorrect Country Code",
            Classification::NoError => "No Error",
        }
    }

    /// Stable machine key, matching the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            Classification::MissingGroundTruth => "missing_ground_truth",
            Classification::MissingReportedCountry => "missing_reported_country",
            Classification::CountryMismatch => "country_mismatch",
            Classification::NoError => "no_error",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Classification::NoError)
    }
}
