//! Item-level fetch failure, normalized for the report.

use std::fmt;

/// Why a single image download failed.
///
/// `Display` is the normalized reason recorded in the report: `timeout`,
/// `HTTP <status>`, or the transport error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No response within the per-request timeout.
    Timeout,
    /// A response arrived but the status was not 2xx or the body was empty.
    Http {
        status: u32,
        content_type: Option<String>,
    },
    /// DNS, connect, TLS, reset and other transport failures.
    Transport(String),
}

impl FetchError {
    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::Timeout | FetchError::Transport(_) => None,
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        match self {
            FetchError::Http { content_type, .. } => content_type.as_deref(),
            FetchError::Timeout | FetchError::Transport(_) => None,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout => f.write_str("timeout"),
            FetchError::Http { status, .. } => write!(f, "HTTP {}", status),
            FetchError::Transport(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_reasons() {
        assert_eq!(FetchError::Timeout.to_string(), "timeout");
        let http = FetchError::Http {
            status: 404,
            content_type: Some("text/html".into()),
        };
        assert_eq!(http.to_string(), "HTTP 404");
        assert_eq!(http.status(), Some(404));
        assert_eq!(http.content_type(), Some("text/html"));
        let t = FetchError::Transport("Couldn't resolve host name".into());
        assert_eq!(t.to_string(), "Couldn't resolve host name");
        assert_eq!(t.status(), None);
    }
}
