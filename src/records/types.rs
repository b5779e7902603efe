//! Measurement record types.

/// One measurement event with the platform's self-reported client geolocation.
///
/// String fields are kept verbatim; an empty string means the platform
/// recorded nothing for that attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub client_ip: String,
    pub reported_latitude: Option<f64>,
    pub reported_longitude: Option<f64>,
    pub reported_continent_code: String,
    pub reported_city: String,
    pub reported_country_code: String,
    pub reported_metro_code: String,
    pub reported_region: String,
}

impl Record {
    /// Shorthand for a record carrying only an address and a reported country.
    pub fn new(client_ip: impl Into<String>, reported_country_code: impl Into<String>) -> Self {
        Self {
            client_ip: client_ip.into(),
            reported_country_code: reported_country_code.into(),
            ..Default::default()
        }
    }
}

/// A record together with the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordLine {
    pub line: u64,
    pub record: Record,
}
