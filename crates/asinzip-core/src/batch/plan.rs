//! Per-row fetch planning: validation, suffixes and stems are fixed before any fetch.

use crate::dataset::{identifier_of, Cell};
use crate::naming::{RowStems, SuffixAssigner};
use crate::url_model::is_valid_url;

use super::ColumnLayout;

/// One image to fetch, with its archive stem already decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlannedFetch {
    pub identifier: String,
    pub column: String,
    pub url: String,
    /// `<identifier>.<suffix>[-n]`; the extension is added after the fetch.
    pub stem: String,
}

/// Plans the fetches for one row in configured column order.
///
/// Absent and invalid cells are skipped without consuming a `PTnn` number.
/// Returns an empty plan when the row has no usable identifier.
pub(crate) fn plan_row(row: &[Cell], layout: &ColumnLayout) -> Vec<PlannedFetch> {
    let Some(identifier) = identifier_of(row, layout.id_index) else {
        tracing::warn!("skipping row without identifier");
        return Vec::new();
    };

    let mut suffixes = SuffixAssigner::new();
    let mut stems = RowStems::new();
    let mut plan = Vec::new();

    for (column, idx) in &layout.images {
        let Some(cell) = row.get(*idx) else {
            continue;
        };
        let text = cell.to_string();
        if !is_valid_url(Some(text.as_str())) {
            continue;
        }

        let suffix = suffixes.assign(column);
        let (stem, collided) = stems.claim(&identifier, suffix);
        if collided {
            tracing::warn!(
                identifier = %identifier,
                column = %column,
                stem = %stem,
                "suffix already used in this row; added marker"
            );
        }
        plan.push(PlannedFetch {
            identifier: identifier.clone(),
            column: column.clone(),
            url: text.trim().to_string(),
            stem,
        });
    }
    plan
}
