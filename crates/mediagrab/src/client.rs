//! Entry points for resolving a post URL to its media
//!
//! The actual page retrieval is implemented by fetchers in the
//! [`fetchers`](crate::fetchers) module; extraction lives in
//! [`extract`](crate::extract).

use crate::error::FetchError;
use crate::extract::extract_media;
use crate::fetchers::{BrowserFetcher, Fetcher};
use crate::types::{DownloadRequest, ExtractionResult};
use crate::{DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};

/// Default total request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on the page body that is read and parsed
pub const DEFAULT_MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

/// Fetch options that can be configured via the downloader builder
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// User-Agent sent upstream
    pub user_agent: String,
    /// Accept-Language sent upstream
    pub accept_language: String,
    /// Total request timeout
    pub timeout: Duration,
    /// Maximum number of body bytes read
    pub max_body_size: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Resolve a post URL to its media using default options
///
/// For custom options, use [`fetch_media_with_options`] or a
/// [`Downloader`](crate::Downloader).
pub async fn fetch_media(req: DownloadRequest) -> Result<ExtractionResult, FetchError> {
    fetch_media_with_options(req, FetchOptions::default()).await
}

/// Resolve a post URL to its media with custom options
pub async fn fetch_media_with_options(
    req: DownloadRequest,
    options: FetchOptions,
) -> Result<ExtractionResult, FetchError> {
    fetch_media_with(&BrowserFetcher::new(), &req, &options).await
}

/// Validate, fetch and extract using the given fetcher
pub(crate) async fn fetch_media_with(
    fetcher: &dyn Fetcher,
    req: &DownloadRequest,
    options: &FetchOptions,
) -> Result<ExtractionResult, FetchError> {
    let url = validate_url(&req.url)?;

    if !is_instagram_post_url(url) {
        warn!(url = %url, "URL does not look like an Instagram post, trying anyway");
    }

    debug!(fetcher = fetcher.name(), url = %url, "Using fetcher");
    let html = fetcher.fetch_page(url, options).await?;

    let result = extract_media(&html);
    if !result.is_found() {
        return Err(FetchError::MediaNotFound);
    }
    Ok(result)
}

/// Check the URL is present and uses an HTTP scheme
///
/// Returns the trimmed URL.
pub fn validate_url(url: &str) -> Result<&str, FetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FetchError::MissingUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(FetchError::InvalidUrlScheme);
    }
    url::Url::parse(url).map_err(|_| FetchError::InvalidUrlScheme)?;
    Ok(url)
}

/// Whether the URL looks like an Instagram post, reel or IGTV link
///
/// Advisory only; other URLs are still fetched.
pub fn is_instagram_post_url(url: &str) -> bool {
    url.contains("instagram.com")
        && (url.contains("/p/") || url.contains("/reel/") || url.contains("/tv/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_empty_url() {
        let result = fetch_media(DownloadRequest::new("")).await;
        assert!(matches!(result, Err(FetchError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_fetch_blank_url() {
        let result = fetch_media(DownloadRequest::new("   ")).await;
        assert!(matches!(result, Err(FetchError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_scheme() {
        let result = fetch_media(DownloadRequest::new("ftp://example.com")).await;
        assert!(matches!(result, Err(FetchError::InvalidUrlScheme)));
    }

    #[test]
    fn test_validate_url_trims() {
        assert_eq!(
            validate_url("  https://www.instagram.com/p/abc/ ").unwrap(),
            "https://www.instagram.com/p/abc/"
        );
        assert!(matches!(
            validate_url("https://"),
            Err(FetchError::InvalidUrlScheme)
        ));
    }

    #[test]
    fn test_fetch_options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(options.accept_language, DEFAULT_ACCEPT_LANGUAGE);
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.max_body_size, 5 * 1024 * 1024);
    }

    #[test]
    fn test_is_instagram_post_url() {
        assert!(is_instagram_post_url("https://www.instagram.com/p/C1a2b3/"));
        assert!(is_instagram_post_url("https://instagram.com/reel/xyz/"));
        assert!(is_instagram_post_url("https://www.instagram.com/tv/xyz"));
        assert!(!is_instagram_post_url("https://www.instagram.com/someone/"));
        assert!(!is_instagram_post_url("https://example.com/p/abc/"));
    }
}
