//! GeoIP database loading from local files.

use maxminddb::Reader;
use std::path::Path;

use crate::error_handling::ValidationError;
use crate::geoip::metadata::extract_metadata;
use crate::geoip::types::GeoIpMetadata;

/// Loads a GeoIP database from a local `.mmdb` file.
///
/// Any failure here means the run cannot start, so both read and parse errors
/// map to `ValidationError::ResolverUnavailable`.
pub(crate) fn load_from_file(
    path: &Path,
) -> Result<(Reader<Vec<u8>>, GeoIpMetadata), ValidationError> {
    log::info!("Loading GeoIP database from: {}", path.display());

    let db_bytes = std::fs::read(path).map_err(|e| ValidationError::ResolverUnavailable {
        path: path.to_path_buf(),
        reason: format!("Failed to read database: {}", e),
    })?;

    let reader = Reader::from_source(db_bytes).map_err(|e| ValidationError::ResolverUnavailable {
        path: path.to_path_buf(),
        reason: format!("Failed to parse database: {}", e),
    })?;

    let metadata = extract_metadata(&reader, &path.to_string_lossy());

    Ok((reader, metadata))
}
