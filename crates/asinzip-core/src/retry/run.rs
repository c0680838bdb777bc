//! Retry loop around a fetcher.

use super::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::fetch::{FetchError, FetchedImage, ImageFetcher};

/// Wraps a fetcher and retries retryable failures according to `policy`.
pub struct RetryingFetcher<F> {
    inner: F,
    policy: RetryPolicy,
}

impl<F: ImageFetcher> RetryingFetcher<F> {
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<F: ImageFetcher> ImageFetcher for RetryingFetcher<F> {
    fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let mut attempt = 1u32;
        loop {
            match self.inner.fetch(url) {
                Ok(img) => return Ok(img),
                Err(e) => match self.policy.decide(attempt, classify::classify(&e)) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        tracing::debug!(url, attempt, error = %e, delay_ms = d.as_millis() as u64, "retrying fetch");
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                },
            }
        }
    }
}
