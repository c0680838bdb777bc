//! Per-attempt download events and the aggregate run report.

use serde::Serialize;
use std::io::Write;

use crate::error::PipelineError;

/// Default file name for the exported report.
pub const REPORT_FILE_NAME: &str = "asin_image_download_report.csv";

/// One attempted (identifier, column) download. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadEvent {
    #[serde(rename = "ASIN")]
    pub identifier: String,
    #[serde(rename = "Column")]
    pub column: String,
    #[serde(rename = "URL")]
    pub url: String,
    /// Archive entry name; `None` on failure.
    #[serde(rename = "Saved As")]
    pub saved_as: Option<String>,
    /// `None` when no response was received.
    #[serde(rename = "Status")]
    pub status: Option<u32>,
    /// Normalized failure reason; `None` on success.
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

/// Append-only collection of events, in processing order (batch, row, column).
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    events: Vec<DownloadEvent>,
}

impl DownloadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = DownloadEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[DownloadEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with failures first (by error, then identifier) and successes last.
    /// Stable, so ties keep processing order.
    pub fn triage_order(&self) -> Vec<&DownloadEvent> {
        let mut sorted: Vec<&DownloadEvent> = self.events.iter().collect();
        sorted.sort_by(|a, b| match (&a.error, &b.error) {
            (Some(ea), Some(eb)) => ea.cmp(eb).then_with(|| a.identifier.cmp(&b.identifier)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.identifier.cmp(&b.identifier),
        });
        sorted
    }

    /// Write the report as CSV in triage order. The header is written even when empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), PipelineError> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(["ASIN", "Column", "URL", "Saved As", "Status", "Error"])
            .map_err(PipelineError::Report)?;
        for event in self.triage_order() {
            wtr.serialize(event).map_err(PipelineError::Report)?;
        }
        wtr.flush()
            .map_err(|e| PipelineError::Report(csv::Error::from(e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(id: &str, col: &str, error: Option<&str>) -> DownloadEvent {
        DownloadEvent {
            identifier: id.into(),
            column: col.into(),
            url: format!("https://x/{}/{}", id, col),
            saved_as: error.is_none().then(|| format!("{}.Main.jpg", id)),
            status: if error == Some("timeout") { None } else { Some(200) },
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn triage_puts_failures_first() {
        let mut r = DownloadReport::new();
        r.extend([
            ev("B2", "Main Image", None),
            ev("C3", "Image2", Some("timeout")),
            ev("A1", "Main Image", None),
            ev("A1", "Image2", Some("HTTP 404")),
        ]);
        let order: Vec<(&str, &str)> = r
            .triage_order()
            .iter()
            .map(|e| (e.identifier.as_str(), e.column.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("A1", "Image2"), ("C3", "Image2"), ("A1", "Main Image"), ("B2", "Main Image")]
        );
        // Processing order is untouched.
        assert_eq!(r.events()[0].identifier, "B2");
        assert_eq!(r.events().iter().filter(|e| e.error.is_some()).count(), 2);
    }

    #[test]
    fn csv_export_has_header_and_blank_optionals() {
        let mut r = DownloadReport::new();
        r.extend([ev("A1", "Image2", Some("timeout"))]);
        let mut out = Vec::new();
        r.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ASIN,Column,URL,Saved As,Status,Error"));
        assert_eq!(lines.next(), Some("A1,Image2,https://x/A1/Image2,,,timeout"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_report_still_has_header() {
        let mut out = Vec::new();
        DownloadReport::new().write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ASIN,Column,URL,Saved As,Status,Error\n");
    }
}
