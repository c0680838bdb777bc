//! Single-shot image GET with a bounded timeout.
//!
//! [`ImageFetcher`] is the seam between the batch builder and the network:
//! production uses [`CurlFetcher`], tests plug in canned responses, and
//! [`crate::retry::RetryingFetcher`] wraps either one.

mod error;
mod http;

pub use error::FetchError;
pub use http::CurlFetcher;

use std::time::Duration;

/// Lower bound for the per-request timeout accepted by run settings.
pub const MIN_TIMEOUT_SECS: u64 = 4;
/// Upper bound for the per-request timeout accepted by run settings.
pub const MAX_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

pub const DEFAULT_USER_AGENT: &str = "ASIN-Image-Downloader/1.0";
pub(crate) const ACCEPT_HEADER: &str = "Accept: image/*,*/*;q=0.8";

/// A successful download: 2xx status and a non-empty body.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub status: u32,
}

/// Performs one GET for an image URL.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

/// Options for building the production fetcher.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
