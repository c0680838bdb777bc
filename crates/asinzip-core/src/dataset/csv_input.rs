//! Delimited-text input (CSV/TSV) via the `csv` crate.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Cell, Dataset};
use crate::error::PipelineError;

/// Tab for `.tsv`/`.tab` files, comma otherwise.
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}

impl Dataset {
    /// Read a delimited file; the first record is the header.
    pub fn from_csv_path(path: &Path, delimiter: u8) -> Result<Self, PipelineError> {
        let file = File::open(path).map_err(csv::Error::from)?;
        let ds = Self::from_csv_reader(file, delimiter)?;
        tracing::debug!(
            path = %path.display(),
            rows = ds.len(),
            columns = ds.columns().len(),
            "dataset loaded"
        );
        Ok(ds)
    }

    /// Read delimited text from any reader. Ragged rows are accepted.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, PipelineError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(PipelineError::MissingHeader);
        }

        let mut ds = Dataset::new(headers);
        for record in rdr.records() {
            let record = record?;
            ds.push_row(record.iter().map(Cell::from_field).collect());
        }
        Ok(ds)
    }
}
