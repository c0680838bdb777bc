//! `asinzip run` – download, rename and archive images in batches.

use anyhow::{Context, Result};
use asinzip_core::config::AsinzipConfig;
use asinzip_core::control::RunControl;
use asinzip_core::dataset::{guess_image_columns, Dataset};
use asinzip_core::orchestrator::{self, BatchProgress, RunSettings};
use asinzip_core::report::REPORT_FILE_NAME;
use asinzip_core::sink::DirectorySink;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::resolve_delimiter;

/// Parsed `run` arguments; `None` means "use the config value".
#[derive(Debug)]
pub struct RunArgs {
    pub input: PathBuf,
    pub id_column: String,
    pub columns: Vec<String>,
    pub batch_size: Option<usize>,
    pub timeout: Option<u64>,
    pub jobs: Option<usize>,
    pub out_dir: PathBuf,
    pub report: Option<PathBuf>,
    pub delimiter: Option<char>,
}

/// Merge CLI overrides into config defaults.
pub(crate) fn settings_for(cfg: &AsinzipConfig, args: &RunArgs, columns: Vec<String>) -> RunSettings {
    let mut settings = RunSettings::from_config(cfg, &args.id_column, columns);
    if let Some(n) = args.batch_size {
        settings.batch_size = n;
    }
    if let Some(secs) = args.timeout {
        settings.timeout_secs = secs;
    }
    if let Some(n) = args.jobs {
        settings.max_concurrent_fetches = n;
    }
    settings
}

pub async fn run_images(cfg: &AsinzipConfig, args: RunArgs) -> Result<()> {
    let delimiter = resolve_delimiter(&args.input, args.delimiter)?;
    let dataset = Dataset::from_csv_path(&args.input, delimiter)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let columns = if args.columns.is_empty() {
        let guessed = guess_image_columns(dataset.columns());
        if !guessed.is_empty() {
            println!("Using image columns: {}", guessed.join(", "));
        }
        guessed
    } else {
        args.columns.clone()
    };
    let settings = settings_for(cfg, &args, columns);
    settings.validate(dataset.columns())?;

    let mut sink = DirectorySink::new(&args.out_dir)?;
    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| args.out_dir.join(REPORT_FILE_NAME));

    let control = RunControl::new();
    let signal_control = control.clone();
    let signal_handle = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Cancelling after the current batch...");
            signal_control.request_abort();
        }
    });

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::unbounded_channel::<BatchProgress>();
    let progress_handle = tokio::spawn(async move {
        while let Some(p) = progress_rx.recv().await {
            println!(
                "Batch {}/{} ({:.0}%): {} ASINs, {} files, {} errors -> {}",
                p.completed,
                p.total,
                p.fraction() * 100.0,
                p.counters.rows,
                p.counters.files_written,
                p.counters.errors,
                p.locator
            );
        }
    });

    let user_agent = cfg.user_agent.clone();
    let retry = cfg.retry.clone();
    let mut outcome = tokio::task::spawn_blocking(move || {
        let fetcher = orchestrator::build_fetcher(&settings, &user_agent, retry.as_ref());
        orchestrator::run_pipeline(
            &dataset,
            &settings,
            fetcher.as_ref(),
            &mut sink,
            Some(&progress_tx),
            Some(&control),
        )
    })
    .await
    .context("pipeline task failed")??;

    signal_handle.abort();
    let _ = progress_handle.await;

    let file = File::create(&report_path)
        .with_context(|| format!("creating report {}", report_path.display()))?;
    outcome.report.write_csv(BufWriter::new(file))?;

    if let Some(err) = outcome.failed.take() {
        println!(
            "Stopped after {} of {} batch(es). Report: {}",
            outcome.batches.len(),
            outcome.planned_batches,
            report_path.display()
        );
        return Err(err).context("run stopped before all batches were stored");
    }

    if outcome.cancelled {
        println!(
            "Cancelled: {} of {} batch(es) written.",
            outcome.batches.len(),
            outcome.planned_batches
        );
    } else if outcome.planned_batches == 0 {
        println!("No identifiers found.");
    }
    println!(
        "{} ASINs, {} files, {} errors. Report: {}",
        outcome.rows(),
        outcome.files_written(),
        outcome.errors(),
        report_path.display()
    );
    tracing::info!(
        batches = outcome.batches.len(),
        files = outcome.files_written(),
        errors = outcome.errors(),
        cancelled = outcome.cancelled,
        "run finished"
    );
    Ok(())
}
