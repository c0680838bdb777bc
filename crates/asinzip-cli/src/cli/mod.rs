//! CLI for the asinzip image batcher.

mod commands;

use anyhow::Result;
use asinzip_core::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_columns, run_completions, run_images, RunArgs};

/// Top-level CLI for asinzip.
#[derive(Debug, Parser)]
#[command(name = "asinzip")]
#[command(about = "Download product images per ASIN, rename them and pack them into ZIP batches", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download, rename and archive images listed in a CSV/TSV file.
    Run {
        /// CSV or TSV file with an identifier column and image URL columns.
        input: PathBuf,
        /// Identifier column used as the filename stem.
        #[arg(long, default_value = "ASIN", value_name = "NAME")]
        id_column: String,
        /// Image URL column. Repeat in the order PTnn numbers should follow.
        /// Defaults to columns whose header mentions image, swatch, img or main.
        #[arg(long = "column", value_name = "NAME")]
        columns: Vec<String>,
        /// Identifiers per ZIP archive (1-200). Overrides config.
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,
        /// Per-image timeout in seconds (4-30). Overrides config.
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
        /// Image fetches in flight per row. 1 keeps fetching strictly sequential.
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Directory receiving the ZIP batches.
        #[arg(long, default_value = ".", value_name = "DIR")]
        out_dir: PathBuf,
        /// Report CSV path (default: <out-dir>/asin_image_download_report.csv).
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
        /// Field delimiter; inferred from the file extension when omitted.
        #[arg(long, value_name = "CHAR")]
        delimiter: Option<char>,
    },

    /// List the columns of an input file and mark the guessed image columns.
    Columns {
        /// CSV or TSV file.
        input: PathBuf,
        /// Field delimiter; inferred from the file extension when omitted.
        #[arg(long, value_name = "CHAR")]
        delimiter: Option<char>,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                input,
                id_column,
                columns,
                batch_size,
                timeout,
                jobs,
                out_dir,
                report,
                delimiter,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let args = RunArgs {
                    input,
                    id_column,
                    columns,
                    batch_size,
                    timeout,
                    jobs,
                    out_dir,
                    report,
                    delimiter,
                };
                run_images(&cfg, args).await?;
            }
            CliCommand::Columns { input, delimiter } => run_columns(&input, delimiter)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
