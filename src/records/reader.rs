//! CSV record stream.
//!
//! Reads a measurement export with a header row and yields one [`RecordLine`]
//! per data row. Required columns are located once from the header; extra
//! columns are ignored.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::{StringRecord, StringRecordsIntoIter};

use super::types::{Record, RecordLine};
use crate::config::{
    COLUMN_CITY, COLUMN_CONTINENT_CODE, COLUMN_COUNTRY_CODE, COLUMN_LATITUDE, COLUMN_LONGITUDE,
    COLUMN_METRO_CODE, COLUMN_REGION, REPORTED_GEOLOCATION_COLUMNS,
};
use crate::error_handling::ValidationError;

/// Field positions of the required columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    client_ip: usize,
    latitude: usize,
    longitude: usize,
    continent_code: usize,
    city: usize,
    country_code: usize,
    metro_code: usize,
    region: usize,
}

impl ColumnIndex {
    /// Locates every required column, returning the names that are absent.
    fn from_headers(headers: &StringRecord, ip_column: &str) -> Result<Self, Vec<String>> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = std::iter::once(ip_column)
            .chain(REPORTED_GEOLOCATION_COLUMNS.iter().copied())
            .filter(|name| position(name).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        // Every lookup below succeeded in the check above
        let at = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            client_ip: at(ip_column),
            latitude: at(COLUMN_LATITUDE),
            longitude: at(COLUMN_LONGITUDE),
            continent_code: at(COLUMN_CONTINENT_CODE),
            city: at(COLUMN_CITY),
            country_code: at(COLUMN_COUNTRY_CODE),
            metro_code: at(COLUMN_METRO_CODE),
            region: at(COLUMN_REGION),
        })
    }
}

/// Iterator over the records of one input source.
pub struct RecordReader<R> {
    source: PathBuf,
    columns: ColumnIndex,
    rows: StringRecordsIntoIter<R>,
}

impl RecordReader<File> {
    /// Opens `path` and validates its header.
    pub fn open(path: &Path, ip_column: &str) -> Result<Self, ValidationError> {
        let file = File::open(path).map_err(|cause| ValidationError::Io {
            path: path.to_path_buf(),
            cause,
        })?;
        Self::from_reader(file, path, ip_column)
    }
}

impl<R: io::Read> RecordReader<R> {
    /// Wraps any byte source. `source` names it in error messages.
    ///
    /// # Errors
    ///
    /// `ValidationError::MalformedInput` (line 1) if a required column is
    /// missing from the header.
    pub fn from_reader(
        rdr: R,
        source: impl Into<PathBuf>,
        ip_column: &str,
    ) -> Result<Self, ValidationError> {
        let source = source.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(rdr);

        let headers = csv_reader
            .headers()
            .map_err(|cause| ValidationError::Csv {
                path: source.clone(),
                cause,
            })?
            .clone();

        let columns = ColumnIndex::from_headers(&headers, ip_column).map_err(|missing| {
            ValidationError::MalformedInput {
                file: source.clone(),
                line: 1,
                reason: format!("missing required column(s): {}", missing.join(", ")),
            }
        })?;

        log::debug!(
            "{}: {} column(s) in header, client IP in column {}",
            source.display(),
            headers.len(),
            columns.client_ip
        );

        Ok(Self {
            source,
            columns,
            rows: csv_reader.into_records(),
        })
    }

    /// The path (or label) this reader was created with.
    pub fn source(&self) -> &Path {
        &self.source
    }

    fn malformed(&self, line: u64, reason: String) -> ValidationError {
        ValidationError::MalformedInput {
            file: self.source.clone(),
            line,
            reason,
        }
    }

    fn parse_coordinate(
        &self,
        row: &StringRecord,
        index: usize,
        line: u64,
        name: &str,
    ) -> Result<Option<f64>, ValidationError> {
        let raw = row.get(index).unwrap_or_default().trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<f64>()
            .map(Some)
            .map_err(|_| self.malformed(line, format!("{} is not a number: {:?}", name, raw)))
    }

    fn build_record(&self, row: &StringRecord, line: u64) -> Result<Record, ValidationError> {
        let cols = self.columns;
        let field = |index: usize| row.get(index).unwrap_or_default().to_string();

        Ok(Record {
            client_ip: field(cols.client_ip),
            reported_latitude: self.parse_coordinate(row, cols.latitude, line, COLUMN_LATITUDE)?,
            reported_longitude: self.parse_coordinate(row, cols.longitude, line, COLUMN_LONGITUDE)?,
            reported_continent_code: field(cols.continent_code),
            reported_city: field(cols.city),
            reported_country_code: field(cols.country_code),
            reported_metro_code: field(cols.metro_code),
            reported_region: field(cols.region),
        })
    }
}

impl<R: io::Read> Iterator for RecordReader<R> {
    type Item = Result<RecordLine, ValidationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(cause) => {
                if let csv::ErrorKind::UnequalLengths {
                    pos,
                    expected_len,
                    len,
                } = cause.kind()
                {
                    let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
                    let reason = format!("expected {} fields, found {}", expected_len, len);
                    return Some(Err(self.malformed(line, reason)));
                }
                return Some(Err(ValidationError::Csv {
                    path: self.source.clone(),
                    cause,
                }));
            }
        };

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        Some(self.build_record(&row, line).map(|record| RecordLine { line, record }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "connection_spec_client_geolocation_latitude,connection_spec_client_geolocation_continent_code,connection_spec_client_geolocation_city,connection_spec_client_geolocation_country_code,connection_spec_client_geolocation_metro_code,connection_spec_client_ip,connection_spec_client_geolocation_longitude,connection_spec_client_geolocation_region";

    fn reader_for(body: &str) -> Result<RecordReader<&[u8]>, ValidationError> {
        RecordReader::from_reader(body.as_bytes(), "test.csv", "connection_spec_client_ip")
    }

    #[test]
    fn test_reads_all_fields() {
        let input = format!("{}\n45.5,NA,Montreal,CA,0,203.0.113.4,-73.6,QC\n", HEADER);
        let rows: Vec<_> = reader_for(&input)
            .expect("header should be valid")
            .collect::<Result<_, _>>()
            .expect("rows should parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);
        let record = &rows[0].record;
        assert_eq!(record.client_ip, "203.0.113.4");
        assert_eq!(record.reported_country_code, "CA");
        assert_eq!(record.reported_city, "Montreal");
        assert_eq!(record.reported_continent_code, "NA");
        assert_eq!(record.reported_metro_code, "0");
        assert_eq!(record.reported_region, "QC");
        assert_eq!(record.reported_latitude, Some(45.5));
        assert_eq!(record.reported_longitude, Some(-73.6));
    }

    #[test]
    fn test_empty_fields_are_kept_empty() {
        let input = format!("{}\n,,,,,198.51.100.7,,\n", HEADER);
        let row = reader_for(&input)
            .expect("header should be valid")
            .next()
            .expect("one row")
            .expect("row should parse");
        assert_eq!(row.record, Record::new("198.51.100.7", ""));
    }

    #[test]
    fn test_header_whitespace_is_trimmed_and_extra_columns_ignored() {
        let header = HEADER
            .split(',')
            .map(|h| format!(" {} ", h))
            .collect::<Vec<_>>()
            .join(",");
        let input = format!("{},test_id\n,,,JP,,203.0.113.6,,,abc\n", header);
        let row = reader_for(&input)
            .expect("header should be valid")
            .next()
            .expect("one row")
            .expect("row should parse");
        assert_eq!(row.record.reported_country_code, "JP");
        assert_eq!(row.record.client_ip, "203.0.113.6");
    }

    #[test]
    fn test_missing_column_is_malformed_input() {
        let header = HEADER.replace(",connection_spec_client_geolocation_region", "");
        let input = format!("{}\n", header);
        let result = reader_for(&input);
        match result {
            Err(ValidationError::MalformedInput { line, reason, .. }) => {
                assert_eq!(line, 1);
                assert!(
                    reason.contains("connection_spec_client_geolocation_region"),
                    "got: {}",
                    reason
                );
            }
            other => panic!("Expected MalformedInput, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_custom_ip_column() {
        let header = HEADER.replace(
            "connection_spec_client_ip",
            "web100_log_entry_connection_spec_remote_ip",
        );
        let input = format!("{}\n,,,US,,192.0.2.1,,\n", header);
        let mut reader = RecordReader::from_reader(
            input.as_bytes(),
            "old.csv",
            "web100_log_entry_connection_spec_remote_ip",
        )
        .expect("header should be valid");
        let row = reader.next().expect("one row").expect("row should parse");
        assert_eq!(row.record.client_ip, "192.0.2.1");
    }

    #[test]
    fn test_short_row_is_malformed_input() {
        let input = format!("{}\n,,,US,,192.0.2.1,,\n,,,US\n", HEADER);
        let results: Vec<_> = reader_for(&input).expect("header should be valid").collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(ValidationError::MalformedInput { line, reason, .. }) => {
                assert_eq!(*line, 3);
                assert!(reason.contains("expected 8 fields"), "got: {}", reason);
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_latitude_is_malformed_input() {
        let input = format!("{}\nnorth,,,US,,192.0.2.1,,\n", HEADER);
        let result = reader_for(&input)
            .expect("header should be valid")
            .next()
            .expect("one row");
        assert!(matches!(
            result,
            Err(ValidationError::MalformedInput { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(
            reader_for(""),
            Err(ValidationError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordReader::open(
            Path::new("nonexistent/results.csv"),
            "connection_spec_client_ip",
        );
        assert!(matches!(result, Err(ValidationError::Io { .. })));
    }
}
