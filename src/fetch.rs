//! Fetch backend trait and the production HTTP implementation.
//!
//! [`FetchBackend`] is the single seam between the loader and the network:
//! one operation, fetch a URL's body as text. The production implementation
//! is [`HttpBackend`], a blocking reqwest client, so the rest of the
//! codebase is transport-agnostic and tests can substitute the recording
//! mock from [`tests`].
//!
//! The client holds no response cache, and every request carries a
//! `Cache-Control: no-cache` header so intermediaries revalidate instead of
//! serving stale copies. Journal files change out from under long-lived
//! processes; a stale manifest is worse than a slow one.

use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
}

/// Trait for text-resource fetch backends.
///
/// Implementations must treat non-2xx responses as errors; the loader
/// never inspects status codes itself.
pub trait FetchBackend: Sync {
    /// Fetch a URL and return its body as text.
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP backend used by the CLI.
pub struct HttpBackend {
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Build a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }
}

impl FetchBackend for HttpBackend {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text()?)
    }
}
