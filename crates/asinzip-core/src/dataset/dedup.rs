//! Deduplicate rows by identifier, keeping the first occurrence.

use std::collections::HashSet;

use super::{Cell, Dataset};
use crate::error::PipelineError;

/// Returns a new dataset with one row per trimmed identifier, in original order.
///
/// Rows whose identifier cell is absent, null or blank are dropped: they cannot
/// name a file.
pub fn dedup_by_identifier(ds: &Dataset, id_column: &str) -> Result<Dataset, PipelineError> {
    let idx = ds
        .column_index(id_column)
        .ok_or_else(|| PipelineError::MissingIdColumn(id_column.to_string()))?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Dataset::new(ds.columns().to_vec());
    let mut blank = 0usize;
    let mut duplicates = 0usize;

    for row in ds.rows() {
        let Some(id) = identifier_of(row, idx) else {
            blank += 1;
            continue;
        };
        if seen.insert(id) {
            out.push_row(row.clone());
        } else {
            duplicates += 1;
        }
    }

    if blank > 0 {
        tracing::warn!(count = blank, column = id_column, "dropped rows with blank identifier");
    }
    tracing::debug!(
        kept = out.len(),
        duplicates,
        "deduplicated dataset by identifier"
    );
    Ok(out)
}

/// Trimmed identifier of a row, or `None` when missing or blank.
pub(crate) fn identifier_of(row: &[Cell], idx: usize) -> Option<String> {
    match row.get(idx)? {
        Cell::Null => None,
        cell => {
            let s = cell.to_string();
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds(ids: &[&str]) -> Dataset {
        let mut ds = Dataset::new(vec!["ASIN".into(), "Main Image".into()]);
        for (i, id) in ids.iter().enumerate() {
            ds.push_row(vec![Cell::from_field(id), Cell::Text(format!("row{}", i))]);
        }
        ds
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let out = dedup_by_identifier(&ds(&["B2", "A1", "B2", "C3", "A1"]), "ASIN").unwrap();
        let ids: Vec<String> = out.rows().iter().map(|r| r[0].to_string()).collect();
        assert_eq!(ids, vec!["B2", "A1", "C3"]);
        assert_eq!(out.rows()[0][1], Cell::Text("row0".into()));
        assert_eq!(out.rows()[1][1], Cell::Text("row1".into()));
    }

    #[test]
    fn whitespace_variants_are_the_same_identifier() {
        let out = dedup_by_identifier(&ds(&["A1", " A1 ", "A1\t"]), "ASIN").unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn blank_identifiers_are_dropped() {
        let out = dedup_by_identifier(&ds(&["", "  ", "A1"]), "ASIN").unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn missing_identifier_column_is_an_input_error() {
        let err = dedup_by_identifier(&ds(&["A1"]), "SKU").unwrap_err();
        assert!(matches!(err, PipelineError::MissingIdColumn(c) if c == "SKU"));
    }
}
