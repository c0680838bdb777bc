//! libcurl-backed fetcher.

use curl::easy::{Easy, List};

use super::{FetchError, FetchOptions, FetchedImage, ImageFetcher, ACCEPT_HEADER};

/// Fetches images with one blocking libcurl Easy handle per request.
///
/// Follows redirects. The timeout bounds the whole request (connect + transfer).
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl ImageFetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.timeout(self.opts.timeout)?;
        easy.useragent(&self.opts.user_agent)?;

        let mut list = List::new();
        list.append(ACCEPT_HEADER)?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let content_type = easy.content_type()?.map(str::to_string);

        if !(200..300).contains(&status) || body.is_empty() {
            tracing::debug!(url, status, bytes = body.len(), "fetch rejected");
            return Err(FetchError::Http {
                status,
                content_type,
            });
        }

        tracing::debug!(url, status, bytes = body.len(), "fetched");
        Ok(FetchedImage {
            bytes: body,
            content_type,
            status,
        })
    }
}
