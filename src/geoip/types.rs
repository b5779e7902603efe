//! GeoIP data structures.
//!
//! This module defines the ground-truth lookup result and the metadata of the
//! loaded database snapshot.

use serde::Serialize;

/// Metadata about the GeoIP database
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoIpMetadata {
    /// Source path
    pub source: String,
    /// Database build version (`build_<epoch>`)
    pub version: String,
    /// When the snapshot was loaded (RFC 3339)
    pub loaded_at: String,
}

/// Ground-truth geolocation for one address.
///
/// Only `country_code` takes part in classification; the remaining fields are
/// carried for logging and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time_zone: Option<String>,
    pub postal_code: Option<String>,
}

impl Resolution {
    /// A resolution carrying only an ISO country code.
    pub fn with_country(code: impl Into<String>) -> Self {
        Self {
            country_code: Some(code.into()),
            ..Default::default()
        }
    }

    /// The resolved ISO country code, or `""` when the database entry has none.
    pub fn country_code(&self) -> &str {
        self.country_code.as_deref().unwrap_or("")
    }
}
