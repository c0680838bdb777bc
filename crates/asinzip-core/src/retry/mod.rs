//! Optional retry with exponential backoff around an [`ImageFetcher`].
//!
//! Fetching is single-shot by default. When a `[retry]` table is configured the
//! run wraps its fetcher in [`RetryingFetcher`]; only the final attempt is
//! reported.
//!
//! [`ImageFetcher`]: crate::fetch::ImageFetcher

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::RetryingFetcher;
