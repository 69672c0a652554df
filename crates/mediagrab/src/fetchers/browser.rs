//! Browser-emulating HTTP fetcher
//!
//! Sends a single GET with the headers a desktop browser would send, which
//! keeps origins that block obvious bots from refusing the request.

use crate::client::FetchOptions;
use crate::error::FetchError;
use crate::fetchers::Fetcher;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use tracing::{debug, error, warn};

/// Accept header sent with every page request
pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

const DNT: HeaderName = HeaderName::from_static("dnt");

/// Fetcher that impersonates a desktop browser
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFetcher;

impl BrowserFetcher {
    /// Create a new browser fetcher
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn fetch_page(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
        let client = reqwest::Client::builder()
            .default_headers(browser_headers(options))
            .connect_timeout(options.timeout)
            .timeout(options.timeout)
            .build()
            .map_err(FetchError::ClientBuildError)?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?
            .error_for_status()
            .map_err(FetchError::from_reqwest)?;

        debug!(status = response.status().as_u16(), url = %url, "Fetched page");

        let (body, truncated) = read_body_limited(response, options.max_body_size).await?;
        if truncated {
            warn!(
                limit = options.max_body_size,
                url = %url,
                "Page body exceeded size limit, extracting from truncated content"
            );
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Build the browser-like request headers
fn browser_headers(options: &FetchOptions) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&options.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(crate::DEFAULT_USER_AGENT)),
    );
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&options.accept_language)
            .unwrap_or_else(|_| HeaderValue::from_static(crate::DEFAULT_ACCEPT_LANGUAGE)),
    );
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Read the response body up to `limit` bytes
///
/// Returns the collected bytes and whether the body was cut short.
async fn read_body_limited(
    response: reqwest::Response,
    limit: usize,
) -> Result<(Bytes, bool), FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(|e| {
            error!("Error reading body chunk: {}", e);
            FetchError::from_reqwest(e)
        })?;

        let remaining = limit.saturating_sub(body.len());
        if bytes.len() > remaining {
            body.extend_from_slice(&bytes[..remaining]);
            return Ok((Bytes::from(body), true));
        }
        body.extend_from_slice(&bytes);
    }

    Ok((Bytes::from(body), false))
}
