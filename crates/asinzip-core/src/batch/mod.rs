//! Batch builder: one contiguous slice of rows → one ZIP archive + events.
//!
//! For every row the fetch plan (suffixes, collision markers) is fixed first,
//! then the row's images are fetched (optionally in parallel), then written to
//! the archive in plan order. Fetch failures are counted and recorded, never
//! propagated.

mod archive;
mod plan;
mod pool;

use crate::dataset::Cell;
use crate::error::PipelineError;
use crate::fetch::ImageFetcher;
use crate::report::DownloadEvent;
use crate::url_model::infer_extension;

use archive::ArchiveBuilder;

pub const DEFAULT_BATCH_SIZE: usize = 40;
pub const MIN_BATCH_SIZE: usize = 1;
pub const MAX_BATCH_SIZE: usize = 200;

/// Resolved column positions for the identifier and the ordered image columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub id_index: usize,
    /// (column name, index) in operator-selected order.
    pub images: Vec<(String, usize)>,
}

impl ColumnLayout {
    /// Resolve names against a header. Fails on a missing identifier column,
    /// an empty image selection, or an unknown image column.
    pub fn resolve(
        header: &[String],
        id_column: &str,
        image_columns: &[String],
    ) -> Result<Self, PipelineError> {
        let position = |name: &str| header.iter().position(|c| c == name);

        let id_index = position(id_column)
            .ok_or_else(|| PipelineError::MissingIdColumn(id_column.to_string()))?;
        if image_columns.is_empty() {
            return Err(PipelineError::NoImageColumns);
        }
        let images = image_columns
            .iter()
            .map(|name| {
                position(name)
                    .map(|idx| (name.clone(), idx))
                    .ok_or_else(|| PipelineError::UnknownImageColumn(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { id_index, images })
    }
}

/// Per-batch accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounters {
    /// Rows in the slice (identifiers), including rows that produced no fetch.
    pub rows: usize,
    pub files_written: usize,
    pub errors: usize,
}

/// A fully materialized batch.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub archive: Vec<u8>,
    pub counters: BatchCounters,
    pub events: Vec<DownloadEvent>,
}

/// Builds the archive for one slice of rows.
///
/// `label` names the archive in errors and logs. At most `max_concurrent`
/// fetches of the same row run at once.
pub fn build_batch(
    label: &str,
    rows: &[Vec<Cell>],
    layout: &ColumnLayout,
    fetcher: &dyn ImageFetcher,
    max_concurrent: usize,
) -> Result<BatchOutput, PipelineError> {
    let mut archive = ArchiveBuilder::new(label);
    let mut counters = BatchCounters {
        rows: rows.len(),
        ..BatchCounters::default()
    };
    let mut events = Vec::new();

    for row in rows {
        let planned = plan::plan_row(row, layout);
        let results = pool::fetch_all(&planned, fetcher, max_concurrent);

        for (p, res) in planned.into_iter().zip(results) {
            match res {
                Ok(img) => {
                    let ext = infer_extension(&p.url, img.content_type.as_deref());
                    let name = archive.add(&format!("{}{}", p.stem, ext), &img.bytes)?;
                    counters.files_written += 1;
                    events.push(DownloadEvent {
                        identifier: p.identifier,
                        column: p.column,
                        url: p.url,
                        saved_as: Some(name),
                        status: Some(img.status),
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::debug!(identifier = %p.identifier, column = %p.column, url = %p.url, error = %e, "image failed");
                    counters.errors += 1;
                    events.push(DownloadEvent {
                        identifier: p.identifier,
                        column: p.column,
                        url: p.url,
                        saved_as: None,
                        status: e.status(),
                        error: Some(e.to_string()),
                    });
                }
            }
        }
    }

    Ok(BatchOutput {
        archive: archive.finish()?,
        counters,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, FetchedImage};
    use std::collections::HashMap;
    use std::io::Cursor;

    /// Canned responses keyed by URL; unknown URLs time out.
    struct Canned(HashMap<&'static str, Result<FetchedImage, FetchError>>);

    impl ImageFetcher for Canned {
        fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
            self.0.get(url).cloned().unwrap_or(Err(FetchError::Timeout))
        }
    }

    fn ok(ct: Option<&str>) -> Result<FetchedImage, FetchError> {
        Ok(FetchedImage {
            bytes: b"img".to_vec(),
            content_type: ct.map(str::to_string),
            status: 200,
        })
    }

    fn header() -> Vec<String> {
        ["ASIN", "Main Image", "Swatch", "Image2"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from_field(c)).collect()
    }

    fn entry_names(archive: &[u8]) -> Vec<String> {
        let zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn resolve_reports_missing_and_unknown_columns() {
        let h = header();
        assert!(matches!(
            ColumnLayout::resolve(&h, "SKU", &["Swatch".into()]),
            Err(PipelineError::MissingIdColumn(_))
        ));
        assert!(matches!(
            ColumnLayout::resolve(&h, "ASIN", &[]),
            Err(PipelineError::NoImageColumns)
        ));
        assert!(matches!(
            ColumnLayout::resolve(&h, "ASIN", &["Image9".into()]),
            Err(PipelineError::UnknownImageColumn(c)) if c == "Image9"
        ));
        let layout = ColumnLayout::resolve(&h, "ASIN", &["Image2".into(), "Main Image".into()]).unwrap();
        assert_eq!(layout.images, vec![("Image2".to_string(), 3), ("Main Image".to_string(), 1)]);
    }

    #[test]
    fn mixed_outcomes_are_counted_and_recorded() {
        let layout = ColumnLayout::resolve(
            &header(),
            "ASIN",
            &["Main Image".into(), "Swatch".into(), "Image2".into()],
        )
        .unwrap();
        let fetcher = Canned(HashMap::from([
            ("https://img/a1-main", ok(Some("image/png"))),
            (
                "https://img/a1-2",
                Err(FetchError::Http {
                    status: 404,
                    content_type: None,
                }),
            ),
            ("https://img/b2-sw.webp", ok(None)),
        ]));
        let rows = vec![
            row(&["A1", "https://img/a1-main", "nan", "https://img/a1-2"]),
            row(&["B2", "", "https://img/b2-sw.webp"]),
        ];

        let out = build_batch("t.zip", &rows, &layout, &fetcher, 1).unwrap();
        assert_eq!(
            out.counters,
            BatchCounters {
                rows: 2,
                files_written: 2,
                errors: 1
            }
        );
        assert_eq!(entry_names(&out.archive), vec!["A1.Main.png", "B2.Swatch.webp"]);

        assert_eq!(out.events.len(), 3);
        let failed = &out.events[1];
        assert_eq!((failed.identifier.as_str(), failed.column.as_str()), ("A1", "Image2"));
        assert_eq!(failed.error.as_deref(), Some("HTTP 404"));
        assert_eq!(failed.status, Some(404));
        assert!(failed.saved_as.is_none());
    }

    #[test]
    fn part_number_is_consumed_even_when_fetch_fails() {
        let layout = ColumnLayout::resolve(
            &["ASIN".into(), "Image1".into(), "Image2".into()],
            "ASIN",
            &["Image1".into(), "Image2".into()],
        )
        .unwrap();
        let fetcher = Canned(HashMap::from([("https://img/2.jpg", ok(None))]));
        let rows = vec![row(&["A1", "https://img/1.jpg", "https://img/2.jpg"])];
        let out = build_batch("t.zip", &rows, &layout, &fetcher, 1).unwrap();
        assert_eq!(entry_names(&out.archive), vec!["A1.PT02.jpg"]);
        assert_eq!(out.events[0].error.as_deref(), Some("timeout"));
        assert_eq!(out.events[0].status, None);
    }

    #[test]
    fn parallel_build_matches_sequential_build() {
        let header: Vec<String> = ["ASIN", "I1", "I2", "I3"].iter().map(|s| s.to_string()).collect();
        let cols: Vec<String> = header[1..].to_vec();
        let layout = ColumnLayout::resolve(&header, "ASIN", &cols).unwrap();
        let fetcher = Canned(HashMap::from([
            ("https://img/a", ok(Some("image/gif"))),
            ("https://img/b", ok(None)),
            ("https://img/c.png", ok(None)),
        ]));
        let rows = vec![
            row(&["X1", "https://img/a", "https://img/b", "https://img/c.png"]),
            row(&["X2", "https://img/missing", "https://img/a", "NULL"]),
        ];

        let seq = build_batch("s.zip", &rows, &layout, &fetcher, 1).unwrap();
        let par = build_batch("p.zip", &rows, &layout, &fetcher, 4).unwrap();
        assert_eq!(seq.events, par.events);
        assert_eq!(seq.counters, par.counters);
        assert_eq!(entry_names(&seq.archive), entry_names(&par.archive));
    }

    #[test]
    fn empty_slice_yields_empty_archive() {
        let layout = ColumnLayout::resolve(&header(), "ASIN", &["Swatch".into()]).unwrap();
        let out = build_batch("e.zip", &[], &layout, &Canned(HashMap::new()), 1).unwrap();
        assert_eq!(out.counters, BatchCounters::default());
        assert!(entry_names(&out.archive).is_empty());
    }
}
