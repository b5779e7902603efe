//! CSV export of per-record classifications.
//!
//! Rows go to a temporary file beside the destination, which is renamed into
//! place by [`ClassificationExporter::finish`]. A run that fails before then
//! leaves no export behind.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};

use crate::config::EXPORT_HEADER;
use crate::geoip::Resolution;
use crate::records::RecordLine;
use crate::validation::Outcome;

/// Streams classified records to a CSV sink.
pub struct ClassificationExporter {
    writer: Writer<Box<dyn Write>>,
    rows: usize,
    pending: Option<(TempPath, PathBuf)>,
}

impl ClassificationExporter {
    /// Starts an export to `path` and writes the header row.
    ///
    /// `path` itself is only created (or replaced) by [`finish`](Self::finish).
    pub fn create(path: &Path) -> Result<Self> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let (file, temp_path) = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?
            .into_parts();

        let mut exporter = Self::from_writer(Box::new(file))?;
        exporter.pending = Some((temp_path, path.to_path_buf()));
        Ok(exporter)
    }

    /// Wraps any writer and writes the header row.
    pub fn from_writer(sink: Box<dyn Write>) -> Result<Self> {
        let mut writer = Writer::from_writer(sink);
        writer
            .write_record(EXPORT_HEADER)
            .context("Failed to write export header")?;
        Ok(Self {
            writer,
            rows: 0,
            pending: None,
        })
    }

    /// Appends one row for `entry` read from `source`.
    pub fn write(&mut self, source: &Path, entry: &RecordLine, outcome: &Outcome) -> Result<()> {
        let source_name = source.to_string_lossy();
        let line = entry.line.to_string();

        // A lookup miss exports empty resolved columns
        let missing = Resolution::default();
        let resolved = outcome.resolution.as_ref().unwrap_or(&missing);
        let latitude = resolved.latitude.map(|v| v.to_string()).unwrap_or_default();
        let longitude = resolved.longitude.map(|v| v.to_string()).unwrap_or_default();

        self.writer
            .write_record([
                &*source_name,
                line.as_str(),
                entry.record.client_ip.as_str(),
                entry.record.reported_country_code.as_str(),
                resolved.country_code(),
                outcome.classification.key(),
                resolved.country_name.as_deref().unwrap_or_default(),
                resolved.region.as_deref().unwrap_or_default(),
                resolved.city.as_deref().unwrap_or_default(),
                latitude.as_str(),
                longitude.as_str(),
                resolved.time_zone.as_deref().unwrap_or_default(),
                resolved.postal_code.as_deref().unwrap_or_default(),
            ])
            .with_context(|| {
                format!("Failed to export {} line {}", source.display(), entry.line)
            })?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes buffered rows, moves the export into place, and returns how
    /// many rows were written.
    pub fn finish(self) -> Result<usize> {
        let Self {
            mut writer,
            rows,
            pending,
        } = self;
        writer.flush().context("Failed to flush export")?;
        drop(writer);

        if let Some((temp_path, path)) = pending {
            temp_path
                .persist(&path)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        Ok(rows)
    }
}
