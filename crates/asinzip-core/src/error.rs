//! Run-level errors: input, configuration, archive and sink failures.
//!
//! Per-image fetch failures are not here; they live in [`crate::fetch::FetchError`]
//! and end up as report events instead of aborting the run.

use thiserror::Error;

/// Errors that stop a run. Anything item-level is recorded in the report instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The dataset could not be read or parsed.
    #[error("failed to read dataset: {0}")]
    Read(#[from] csv::Error),

    /// The dataset has no header row.
    #[error("dataset has no header row")]
    MissingHeader,

    /// The configured identifier column is not one of the dataset's columns.
    #[error("identifier column {0:?} not found in dataset")]
    MissingIdColumn(String),

    /// A selected image column is not one of the dataset's columns.
    #[error("image column {0:?} not found in dataset")]
    UnknownImageColumn(String),

    /// No image columns were selected.
    #[error("select at least one image column")]
    NoImageColumns,

    #[error("batch size {0} out of range ({min}..={max})", min = crate::batch::MIN_BATCH_SIZE, max = crate::batch::MAX_BATCH_SIZE)]
    InvalidBatchSize(usize),

    #[error("timeout {0}s out of range ({min}..={max})", min = crate::fetch::MIN_TIMEOUT_SECS, max = crate::fetch::MAX_TIMEOUT_SECS)]
    InvalidTimeout(u64),

    #[error("concurrent fetches must be at least 1")]
    InvalidConcurrency,

    /// Writing an entry into a batch archive failed.
    #[error("archive {name}: {source}")]
    Archive {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Report(#[source] csv::Error),

    /// The archive sink refused a finished batch.
    #[error("storing {name}: {cause:#}")]
    Sink { name: String, cause: anyhow::Error },
}

impl PipelineError {
    /// True for errors raised before any processing starts (bad input or settings).
    pub fn is_input_or_config(&self) -> bool {
        !matches!(
            self,
            PipelineError::Archive { .. } | PipelineError::Sink { .. } | PipelineError::Report(_)
        )
    }
}
