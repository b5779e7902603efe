//! GeoIP lookup using a MaxMind GeoLite2-City database.
//!
//! This module provides the ground-truth side of validation: loading a local
//! `.mmdb` snapshot and resolving client addresses to their country (plus
//! region, city, and coordinates where the database has them).

mod loader;
mod lookup;
mod metadata;
mod types;

// Re-export public API
pub use lookup::{GeoIpResolver, Resolver, StaticResolver};
pub use types::{GeoIpMetadata, Resolution};
