// Shared test helpers for building input files and resolvers.
//
// Included from other test files with `#[path = "helpers.rs"] mod helpers;`.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use geo_validate::geoip::StaticResolver;
use geo_validate::Config;

/// Header row in the column order of a real measurement export.
#[allow(dead_code)]
pub const HEADER: &str = "connection_spec_client_geolocation_latitude,connection_spec_client_geolocation_continent_code,connection_spec_client_geolocation_city,connection_spec_client_geolocation_country_code,connection_spec_client_geolocation_metro_code,connection_spec_client_ip,connection_spec_client_geolocation_longitude,connection_spec_client_geolocation_region";

/// One data row with only address and reported country filled in.
#[allow(dead_code)]
pub fn row(ip: &str, country: &str) -> String {
    format!(",,,{},,{},,", country, ip)
}

/// Writes `rows` under `HEADER` to `dir/name` and returns the path.
#[allow(dead_code)]
pub fn write_input(dir: &Path, name: &str, rows: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = String::from(HEADER);
    contents.push('\n');
    for r in rows {
        contents.push_str(r);
        contents.push('\n');
    }
    std::fs::write(&path, contents).expect("Failed to write input file");
    path
}

/// Resolver with the fixed ground truth used across the test suite.
#[allow(dead_code)]
pub fn test_resolver() -> StaticResolver {
    let entries = [
        ("203.0.113.4", "CA"),
        ("203.0.113.5", "DE"),
        ("203.0.113.6", "JP"),
        ("203.0.113.9", "US"),
        ("2001:db8::1", "NL"),
    ];
    entries
        .iter()
        .fold(StaticResolver::new(), |resolver, (ip, country)| {
            let addr: IpAddr = ip.parse().expect("test address should parse");
            resolver.with_country(addr, country)
        })
}

/// Config that reads `inputs` with every other option at its default.
#[allow(dead_code)]
pub fn config_for(inputs: Vec<PathBuf>) -> Config {
    Config {
        inputs,
        ..Default::default()
    }
}
