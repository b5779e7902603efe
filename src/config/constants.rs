//! Configuration constants.
//!
//! Column names of the measurement export, default paths, and logging cadence.

/// Default location of the GeoLite2-City snapshot, relative to the working directory.
pub const DEFAULT_GEOIP_PATH: &str = "support/GeoLite2-City.mmdb";

/// Log a progress line every this many records (debug level).
pub const PROGRESS_LOG_INTERVAL: usize = 10_000;

// Measurement export column names
/// Client IP address column
pub const COLUMN_CLIENT_IP: &str = "connection_spec_client_ip";
pub const COLUMN_LATITUDE: &str = "connection_spec_client_geolocation_latitude";
pub const COLUMN_LONGITUDE: &str = "connection_spec_client_geolocation_longitude";
pub const COLUMN_CONTINENT_CODE: &str = "connection_spec_client_geolocation_continent_code";
pub const COLUMN_CITY: &str = "connection_spec_client_geolocation_city";
pub const COLUMN_COUNTRY_CODE: &str = "connection_spec_client_geolocation_country_code";
pub const COLUMN_METRO_CODE: &str = "connection_spec_client_geolocation_metro_code";
pub const COLUMN_REGION: &str = "connection_spec_client_geolocation_region";

/// Reported-geolocation columns every input file must declare.
///
/// The client IP column is configurable and checked separately.
pub const REPORTED_GEOLOCATION_COLUMNS: &[&str] = &[
    COLUMN_LATITUDE,
    COLUMN_LONGITUDE,
    COLUMN_CONTINENT_CODE,
    COLUMN_CITY,
    COLUMN_COUNTRY_CODE,
    COLUMN_METRO_CODE,
    COLUMN_REGION,
];

/// Header row of the per-record classification export.
pub const EXPORT_HEADER: &[&str] = &[
    "source_file",
    "line",
    "client_ip",
    "reported_country_code",
    "resolved_country_code",
    "classification",
    "resolved_country_name",
    "resolved_region",
    "resolved_city",
    "resolved_latitude",
    "resolved_longitude",
    "resolved_time_zone",
    "resolved_postal_code",
];
