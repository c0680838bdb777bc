//! In-memory ZIP writer for one batch that never overwrites an entry.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PipelineError;

pub(crate) struct ArchiveBuilder {
    label: String,
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
}

impl ArchiveBuilder {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
        }
    }

    /// Adds an entry and returns the name actually used. A taken name gets a
    /// `-n` marker before its extension.
    pub(crate) fn add(&mut self, name: &str, bytes: &[u8]) -> Result<String, PipelineError> {
        let name = self.unique_name(name);
        let opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer
            .start_file(name.as_str(), opts)
            .map_err(|source| self.archive_error(source))?;
        self.writer
            .write_all(bytes)
            .map_err(|e| self.archive_error(e.into()))?;
        self.names.insert(name.clone());
        Ok(name)
    }

    pub(crate) fn finish(self) -> Result<Vec<u8>, PipelineError> {
        let label = self.label;
        self.writer
            .finish()
            .map(Cursor::into_inner)
            .map_err(|source| PipelineError::Archive { name: label, source })
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.names.contains(name) {
            return name.to_string();
        }
        let (stem, ext) = match name.rfind('.') {
            Some(dot) => name.split_at(dot),
            None => (name, ""),
        };
        let mut n = 2u32;
        loop {
            let candidate = format!("{}-{}{}", stem, n, ext);
            if !self.names.contains(&candidate) {
                tracing::warn!(archive = %self.label, entry = %candidate, "duplicate entry name renamed");
                return candidate;
            }
            n += 1;
        }
    }

    fn archive_error(&self, source: zip::result::ZipError) -> PipelineError {
        PipelineError::Archive {
            name: self.label.clone(),
            source,
        }
    }
}
