//! IP address lookup.
//!
//! [`Resolver`] is the seam the validation engine depends on. A lookup miss is
//! `Ok(None)`; only malformed input or database failures are errors.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::Path;

use maxminddb::Reader;

use super::loader::load_from_file;
use super::types::{GeoIpMetadata, Resolution};
use crate::error_handling::{ResolveError, ValidationError};

/// Source of ground-truth geolocation.
///
/// Implementations must be deterministic for a given database snapshot.
pub trait Resolver {
    /// Resolves `ip`. `Ok(None)` means the database has no entry for it.
    fn resolve(&self, ip: &str) -> Result<Option<Resolution>, ResolveError>;

    /// Metadata of the underlying snapshot, if it has any.
    fn metadata(&self) -> Option<&GeoIpMetadata> {
        None
    }
}

fn parse_ip(ip: &str) -> Result<IpAddr, ResolveError> {
    ip.parse()
        .map_err(|_| ResolveError::InvalidAddress(ip.to_string()))
}

/// Resolver backed by a MaxMind GeoLite2-City database held in memory.
pub struct GeoIpResolver {
    reader: Reader<Vec<u8>>,
    metadata: GeoIpMetadata,
}

impl GeoIpResolver {
    /// Opens and parses the database at `path`.
    ///
    /// # Errors
    ///
    /// `ValidationError::ResolverUnavailable` if the file cannot be read or is
    /// not a MaxMind database.
    pub fn open(path: &Path) -> Result<Self, ValidationError> {
        let (reader, metadata) = load_from_file(path)?;
        log::info!(
            "GeoIP database loaded: {} ({})",
            metadata.source,
            metadata.version
        );
        Ok(Self { reader, metadata })
    }
}

impl Resolver for GeoIpResolver {
    fn resolve(&self, ip: &str) -> Result<Option<Resolution>, ResolveError> {
        let ip_addr = parse_ip(ip)?;

        // maxminddb 0.27: lookup() yields a LookupResult; has_data() is false for
        // addresses outside every network in the tree
        let city_lookup = self.reader.lookup(ip_addr)?;
        if !city_lookup.has_data() {
            return Ok(None);
        }

        let city_result: maxminddb::geoip2::City = match city_lookup.decode()? {
            Some(city) => city,
            None => return Ok(None),
        };

        let mut resolution = Resolution {
            country_code: city_result.country.iso_code.map(|s| s.to_string()),
            country_name: city_result.country.names.english.map(|s| s.to_string()),
            ..Default::default()
        };

        if let Some(subdivision) = city_result.subdivisions.first() {
            resolution.region = subdivision.names.english.map(|s| s.to_string());
        }

        resolution.city = city_result.city.names.english.map(|s| s.to_string());
        resolution.latitude = city_result.location.latitude;
        resolution.longitude = city_result.location.longitude;
        resolution.time_zone = city_result.location.time_zone.map(|s| s.to_string());
        resolution.postal_code = city_result.postal.code.map(|s| s.to_string());

        Ok(Some(resolution))
    }

    fn metadata(&self) -> Option<&GeoIpMetadata> {
        Some(&self.metadata)
    }
}

/// In-memory resolver keyed by parsed address.
///
/// Applies the same syntax check as [`GeoIpResolver`], so `"::1"` and
/// `"0:0:0:0:0:0:0:1"` resolve identically.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<IpAddr, Resolution>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the entry for `ip`.
    pub fn insert(&mut self, ip: IpAddr, resolution: Resolution) {
        self.entries.insert(ip, resolution);
    }

    /// Builder form of [`insert`](Self::insert) for a country-only entry.
    pub fn with_country(mut self, ip: IpAddr, country_code: &str) -> Self {
        self.insert(ip, Resolution::with_country(country_code));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, ip: &str) -> Result<Option<Resolution>, ResolveError> {
        let ip_addr = parse_ip(ip)?;
        Ok(self.entries.get(&ip_addr).cloned())
    }
}
