//! Batch orchestrator: partition the deduplicated dataset, build every batch in
//! order, hand each archive to the sink and aggregate the report.
//!
//! Runs on the calling thread and blocks on network I/O; call it from
//! `spawn_blocking` when driving it from async code.

mod label;
mod progress;

pub use label::{batch_label, BatchPlan};
pub use progress::BatchProgress;

use std::time::Duration;

use crate::batch::{self, BatchCounters, ColumnLayout, MAX_BATCH_SIZE, MIN_BATCH_SIZE};
use crate::checksum::sha256_hex;
use crate::config::{AsinzipConfig, RetryConfig};
use crate::control::RunControl;
use crate::dataset::{dedup_by_identifier, Dataset};
use crate::error::PipelineError;
use crate::fetch::{CurlFetcher, FetchOptions, ImageFetcher, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::report::DownloadReport;
use crate::retry::{RetryPolicy, RetryingFetcher};
use crate::sink::ArchiveSink;

/// Operator choices for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub id_column: String,
    /// Order determines `PTnn` numbering.
    pub image_columns: Vec<String>,
    pub batch_size: usize,
    pub timeout_secs: u64,
    pub max_concurrent_fetches: usize,
}

impl RunSettings {
    /// Settings with the config's batch size, timeout and concurrency.
    pub fn from_config(cfg: &AsinzipConfig, id_column: &str, image_columns: Vec<String>) -> Self {
        Self {
            id_column: id_column.to_string(),
            image_columns,
            batch_size: cfg.batch_size,
            timeout_secs: cfg.timeout_secs,
            max_concurrent_fetches: cfg.max_concurrent_fetches,
        }
    }

    /// Check the settings against a dataset header before any work starts.
    pub fn validate(&self, header: &[String]) -> Result<ColumnLayout, PipelineError> {
        if self.image_columns.is_empty() {
            return Err(PipelineError::NoImageColumns);
        }
        if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(PipelineError::InvalidBatchSize(self.batch_size));
        }
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(PipelineError::InvalidTimeout(self.timeout_secs));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(PipelineError::InvalidConcurrency);
        }
        ColumnLayout::resolve(header, &self.id_column, &self.image_columns)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Production fetcher: curl with the run's timeout, wrapped in retries when configured.
pub fn build_fetcher(
    settings: &RunSettings,
    user_agent: &str,
    retry: Option<&RetryConfig>,
) -> Box<dyn ImageFetcher> {
    let curl = CurlFetcher::new(FetchOptions {
        timeout: settings.timeout(),
        user_agent: user_agent.to_string(),
    });
    match retry {
        Some(cfg) => Box::new(RetryingFetcher::new(curl, RetryPolicy::from_config(cfg))),
        None => Box::new(curl),
    }
}

/// What one finished batch produced.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub label: String,
    pub counters: BatchCounters,
    /// Where the sink put the archive.
    pub locator: String,
    pub sha256: String,
}

/// Handle returned to the caller: batch summaries plus the aggregate report.
///
/// The report covers every stored batch, also when the run stopped early on
/// an archive or sink failure (`failed`).
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub batches: Vec<BatchSummary>,
    pub report: DownloadReport,
    /// Batches planned for the run (may exceed `batches.len()` when stopped early).
    pub planned_batches: usize,
    pub cancelled: bool,
    /// Archive or sink error that stopped the run after it started.
    pub failed: Option<PipelineError>,
}

impl RunOutcome {
    pub fn files_written(&self) -> usize {
        self.batches.iter().map(|b| b.counters.files_written).sum()
    }

    pub fn errors(&self) -> usize {
        self.batches.iter().map(|b| b.counters.errors).sum()
    }

    pub fn rows(&self) -> usize {
        self.batches.iter().map(|b| b.counters.rows).sum()
    }
}

/// Process an already deduplicated dataset batch by batch.
///
/// Settings are validated first; input and configuration errors return `Err`
/// before any fetch. Once batches are underway the result is always `Ok`: an
/// archive or sink failure stops the run and lands in `outcome.failed`, with
/// the report of the batches stored so far. Item-level fetch failures only
/// show up in the report. When `control` requests an abort, the run stops
/// before the next batch and the outcome has `cancelled = true`.
pub fn run_batches(
    dataset: &Dataset,
    settings: &RunSettings,
    fetcher: &dyn ImageFetcher,
    sink: &mut dyn ArchiveSink,
    progress_tx: Option<&tokio::sync::mpsc::UnboundedSender<BatchProgress>>,
    control: Option<&RunControl>,
) -> Result<RunOutcome, PipelineError> {
    let layout = settings.validate(dataset.columns())?;
    let plan = BatchPlan::new(dataset.len(), settings.batch_size);
    let total = plan.count();
    tracing::info!(
        identifiers = dataset.len(),
        batch_size = plan.size,
        batches = total,
        "starting run"
    );

    let mut outcome = RunOutcome {
        planned_batches: total,
        ..RunOutcome::default()
    };

    for index in 0..total {
        if control.is_some_and(RunControl::is_aborted) {
            tracing::warn!(completed = index, total, "run cancelled");
            outcome.cancelled = true;
            break;
        }

        let label = batch_label(index, total);
        let range = plan.range(index);
        let rows = dataset.slice(range.start, range.end);
        let stored = batch::build_batch(&label, rows, &layout, fetcher, settings.max_concurrent_fetches)
            .and_then(|out| {
                let locator = sink
                    .store(&label, &out.archive)
                    .map_err(|cause| PipelineError::Sink {
                        name: label.clone(),
                        cause,
                    })?;
                Ok((out, locator))
            });
        let (out, locator) = match stored {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(batch = %label, completed = index, total, error = %e, "run stopped");
                outcome.failed = Some(e);
                break;
            }
        };

        let sha256 = sha256_hex(&out.archive);
        tracing::info!(
            batch = %label,
            rows = out.counters.rows,
            files = out.counters.files_written,
            errors = out.counters.errors,
            locator = %locator,
            "batch stored"
        );

        outcome.report.extend(out.events);
        outcome.batches.push(BatchSummary {
            label: label.clone(),
            counters: out.counters,
            locator: locator.clone(),
            sha256,
        });

        if let Some(tx) = progress_tx {
            let progress = BatchProgress {
                completed: index + 1,
                total,
                label,
                counters: out.counters,
                locator,
            };
            if tx.send(progress).is_err() {
                tracing::debug!("progress receiver gone");
            }
        }
    }

    Ok(outcome)
}

/// Deduplicate `dataset` by the identifier column, then [`run_batches`].
pub fn run_pipeline(
    dataset: &Dataset,
    settings: &RunSettings,
    fetcher: &dyn ImageFetcher,
    sink: &mut dyn ArchiveSink,
    progress_tx: Option<&tokio::sync::mpsc::UnboundedSender<BatchProgress>>,
    control: Option<&RunControl>,
) -> Result<RunOutcome, PipelineError> {
    settings.validate(dataset.columns())?;
    let deduped = dedup_by_identifier(dataset, &settings.id_column)?;
    run_batches(&deduped, settings, fetcher, sink, progress_tx, control)
}
