//! CLI command handlers, one per file.

mod columns;
mod completions;
mod run;

pub use columns::run_columns;
pub use completions::run_completions;
pub use run::{run_images, RunArgs};

use anyhow::{bail, Result};
use std::path::Path;

/// Explicit delimiter if given (must be a single ASCII char), else inferred from the extension.
pub(crate) fn resolve_delimiter(input: &Path, delimiter: Option<char>) -> Result<u8> {
    match delimiter {
        Some(c) if c.is_ascii() => Ok(c as u8),
        Some(c) => bail!("delimiter must be an ASCII character, got {:?}", c),
        None => Ok(asinzip_core::dataset::delimiter_for_path(input)),
    }
}
