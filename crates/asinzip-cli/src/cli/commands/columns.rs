//! `asinzip columns <input>` – list headers and guessed image columns.

use anyhow::{Context, Result};
use asinzip_core::dataset::{guess_image_columns, Dataset};
use std::path::Path;

use super::resolve_delimiter;

pub fn run_columns(input: &Path, delimiter: Option<char>) -> Result<()> {
    let delimiter = resolve_delimiter(input, delimiter)?;
    let ds = Dataset::from_csv_path(input, delimiter)
        .with_context(|| format!("reading {}", input.display()))?;
    let guessed = guess_image_columns(ds.columns());

    println!("{:<5} {:<7} {}", "IDX", "IMAGE?", "COLUMN");
    for (i, col) in ds.columns().iter().enumerate() {
        let mark = if guessed.contains(col) { "yes" } else { "" };
        println!("{:<5} {:<7} {}", i, mark, col);
    }
    println!("{} rows", ds.len());
    Ok(())
}
