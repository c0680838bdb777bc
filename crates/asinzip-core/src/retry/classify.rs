//! Classify fetch failures into retry policy error kinds.

use super::policy::ErrorKind;
use crate::fetch::FetchError;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a fetch error into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Timeout => ErrorKind::Timeout,
        FetchError::Transport(_) => ErrorKind::Connection,
        FetchError::Http { status, .. } => classify_http_status(*status),
    }
}
