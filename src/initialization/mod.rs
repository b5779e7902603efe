//! Application initialization.
//!
//! Logger setup for the binary. The GeoIP database is opened by
//! [`crate::geoip::GeoIpResolver::open`] as part of the run.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
