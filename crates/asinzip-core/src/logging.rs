//! Tracing setup for the CLI: append to a log file under the XDG state dir,
//! falling back to stderr when the file cannot be opened.
//!
//! The filter comes from `ASINZIP_LOG` (same syntax as `RUST_LOG`), else
//! [`DEFAULT_FILTER`].

use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ASINZIP_LOG";
pub const DEFAULT_FILTER: &str = "info,asinzip_core=debug,asinzip=debug";
const LOG_FILE_NAME: &str = "asinzip.log";

/// Where log lines ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// `$XDG_STATE_HOME/asinzip/asinzip.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("asinzip")?;
    Ok(dirs.get_state_home().join(LOG_FILE_NAME))
}

fn filter_from(value: Option<&str>) -> EnvFilter {
    value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter() -> EnvFilter {
    filter_from(std::env::var(LOG_ENV).ok().as_deref())
}

/// Shares one appended log file between events. A failed handle clone sends
/// that event to stderr instead of dropping it.
struct SharedLogFile(File);

enum LogWriter {
    File(File),
    Stderr(io::Stderr),
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::File(f) => f.write(buf),
            LogWriter::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::File(f) => f.flush(),
            LogWriter::Stderr(e) => e.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> LogWriter {
        match self.0.try_clone() {
            Ok(f) => LogWriter::File(f),
            Err(_) => LogWriter::Stderr(io::stderr()),
        }
    }
}

fn open_log_file() -> Result<(PathBuf, File)> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Install the global subscriber writing to the log file.
/// Errors when the file cannot be opened; nothing is installed in that case.
pub fn init_logging() -> Result<PathBuf> {
    let (path, file) = open_log_file()?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(SharedLogFile(file))
        .with_ansi(false)
        .init();
    tracing::info!(path = %path.display(), "logging to file");
    Ok(path)
}

/// Install the global subscriber writing to stderr.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// File logging if possible, else stderr. Call once per process.
pub fn init() -> LogTarget {
    match init_logging() {
        Ok(path) => LogTarget::File(path),
        Err(e) => {
            init_logging_stderr();
            tracing::warn!(error = %e, "log file unavailable, logging to stderr");
            LogTarget::Stderr
        }
    }
}
