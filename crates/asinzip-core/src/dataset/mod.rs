//! In-memory tabular dataset handed to the pipeline.
//!
//! Rows are positional (one cell slot per header column). A row shorter than
//! the header has *absent* trailing cells, which is different from a present
//! cell holding the null sentinel.

mod csv_input;
mod dedup;

pub use csv_input::delimiter_for_path;
pub use dedup::dedup_by_identifier;
pub(crate) use dedup::identifier_of;

use std::fmt;

/// One cell value: the raw field text, or the null sentinel for an empty field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Null,
}

impl Cell {
    /// Parse a raw text field: empty means null, anything else is kept as text.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Null
        } else {
            Cell::Text(field.to_string())
        }
    }
}

impl fmt::Display for Cell {
    /// Null renders as `nan`, matching how spreadsheet exports stringify missing values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Null => f.write_str("nan"),
        }
    }
}

/// Ordered rows keyed by an ordered header.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Cells beyond the header width are dropped.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.truncate(self.columns.len());
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at `row`, `column`; `None` when the row or the cell slot is absent.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }

    /// Contiguous slice of rows `[start, end)`, clamped to the dataset length.
    pub fn slice(&self, start: usize, end: usize) -> &[Vec<Cell>] {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        &self.rows[start..end]
    }
}

/// Guess which columns hold image URLs: headers mentioning image, swatch, img or main.
pub fn guess_image_columns(columns: &[String]) -> Vec<String> {
    const HINTS: [&str; 4] = ["image", "swatch", "img", "main"];
    columns
        .iter()
        .filter(|c| {
            let lower = c.to_lowercase();
            HINTS.iter().any(|h| lower.contains(h))
        })
        .cloned()
        .collect()
}
