//! Page fetchers
//!
//! A fetcher turns a post URL into page HTML. [`BrowserFetcher`] is the
//! production implementation; tests and embedders can plug in their own
//! via [`DownloaderBuilder::fetcher`](crate::DownloaderBuilder::fetcher).

mod browser;

pub use browser::BrowserFetcher;

use crate::client::FetchOptions;
use crate::error::FetchError;
use async_trait::async_trait;

/// Trait for retrieving the HTML of a post page
///
/// Implementations perform exactly one attempt per call and report
/// upstream 404/403 as [`FetchError::UpstreamNotFound`] and
/// [`FetchError::UpstreamForbidden`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Unique identifier for this fetcher (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Fetch the page body as text
    ///
    /// The URL has already been validated by the caller.
    async fn fetch_page(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError>;
}
