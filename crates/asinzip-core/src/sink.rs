//! Destinations for finished batch archives.
//!
//! The pipeline hands each archive to an [`ArchiveSink`] as soon as the batch is
//! built and keeps only the returned locator.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Receives finished archives. Returns a locator string (path, URL, key).
pub trait ArchiveSink {
    fn store(&mut self, name: &str, bytes: &[u8]) -> Result<String>;
}

/// Writes archives into a directory. Each file is written to a temp file in the
/// same directory and renamed into place, so a partial archive never appears
/// under its final name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates `dir` if needed.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output dir: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArchiveSink for DirectorySink {
    fn store(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        let final_path = self.dir.join(name);
        let mut tmp = tempfile::Builder::new()
            .prefix(".asinzip-")
            .suffix(".part")
            .tempfile_in(&self.dir)
            .with_context(|| format!("failed to create temp file in {}", self.dir.display()))?;
        tmp.write_all(bytes).context("archive write failed")?;
        tmp.as_file().sync_all().context("archive sync failed")?;
        tmp.persist(&final_path)
            .with_context(|| format!("failed to move archive to {}", final_path.display()))?;
        Ok(final_path.display().to_string())
    }
}

/// Keeps archives in memory, in the order they were stored.
#[derive(Debug, Default)]
pub struct MemorySink {
    archives: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn archives(&self) -> &[(String, Vec<u8>)] {
        &self.archives
    }
}

impl ArchiveSink for MemorySink {
    fn store(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        self.archives.push((name.to_string(), bytes.to_vec()));
        Ok(format!("memory:{}", name))
    }
}
