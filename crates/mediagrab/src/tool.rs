//! Downloader builder and request handler

use crate::client::{fetch_media_with, FetchOptions};
use crate::error::FetchError;
use crate::fetchers::{BrowserFetcher, Fetcher};
use crate::types::{DownloadRequest, DownloadResponse, ExtractionResult};
use schemars::schema_for;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Builder for configuring a [`Downloader`]
#[derive(Clone, Default)]
pub struct DownloaderBuilder {
    options: FetchOptions,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl DownloaderBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = ua.into();
        self
    }

    /// Set custom Accept-Language
    pub fn accept_language(mut self, lang: impl Into<String>) -> Self {
        self.options.accept_language = lang.into();
        self
    }

    /// Set total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set maximum number of body bytes read
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.options.max_body_size = bytes;
        self
    }

    /// Replace the page fetcher
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the downloader
    pub fn build(self) -> Downloader {
        Downloader {
            options: self.options,
            fetcher: self
                .fetcher
                .unwrap_or_else(|| Arc::new(BrowserFetcher::new())),
        }
    }
}

/// Configured downloader
///
/// Cheap to clone; holds no mutable state, so one instance can serve
/// concurrent requests.
#[derive(Clone)]
pub struct Downloader {
    options: FetchOptions,
    fetcher: Arc<dyn Fetcher>,
}

impl Default for Downloader {
    fn default() -> Self {
        DownloaderBuilder::new().build()
    }
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("options", &self.options)
            .field("fetcher", &self.fetcher.name())
            .finish()
    }
}

impl Downloader {
    /// Create a new downloader builder
    pub fn builder() -> DownloaderBuilder {
        DownloaderBuilder::new()
    }

    /// Options this downloader fetches with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(DownloadRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Get output schema as JSON
    pub fn output_schema(&self) -> serde_json::Value {
        let schema = schema_for!(DownloadResponse);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Resolve the request to its media
    pub async fn execute(&self, req: DownloadRequest) -> Result<ExtractionResult, FetchError> {
        fetch_media_with(self.fetcher.as_ref(), &req, &self.options).await
    }

    /// Resolve the request and convert the outcome to a status and body
    ///
    /// Every error stops here; callers only see the status code and the
    /// user-readable message.
    pub async fn respond(&self, req: DownloadRequest) -> (u16, DownloadResponse) {
        match self.execute(req).await {
            Ok(result) => {
                info!(
                    media_type = %result.media_type,
                    url = %result.media_url,
                    "Media resolved"
                );
                (200, DownloadResponse::from(result))
            }
            Err(err) => {
                let status = err.status_code();
                if err.is_client_error() {
                    debug!(error = %err, "Invalid download request");
                } else if status >= 500 {
                    error!(error = %err, "Download failed");
                } else {
                    info!(error = %err, status, "Download rejected");
                }
                (status, DownloadResponse::from(&err))
            }
        }
    }
}
