//! mediagrab - Open Graph media extraction for public post pages
//!
//! This crate resolves a public social-media post URL to the direct URL of
//! its video or image by fetching the page once with browser-like headers
//! and reading its Open Graph meta tags.
//!
//! ## Pieces
//!
//! - [`extract_media`] - pure HTML to [`ExtractionResult`] extraction
//! - [`Fetcher`] - pluggable page retrieval, [`BrowserFetcher`] by default
//! - [`Downloader`] - configured handler that maps every outcome to an
//!   HTTP status and a [`DownloadResponse`]
//!
//! ```no_run
//! # async fn run() {
//! use mediagrab::{DownloadRequest, Downloader};
//!
//! let downloader = Downloader::default();
//! let (status, body) = downloader
//!     .respond(DownloadRequest::new("https://www.instagram.com/p/abc123/"))
//!     .await;
//! println!("{status}: {body:?}");
//! # }
//! ```

pub mod client;
mod error;
mod extract;
pub mod fetchers;
mod tool;
mod types;

pub use client::{
    fetch_media, fetch_media_with_options, is_instagram_post_url, validate_url, FetchOptions,
};
pub use error::{FetchError, GENERIC_FAILURE_MESSAGE};
pub use extract::extract_media;
pub use fetchers::{BrowserFetcher, Fetcher};
pub use tool::{Downloader, DownloaderBuilder};
pub use types::{DownloadRequest, DownloadResponse, ExtractionResult, MediaType, DEFAULT_TITLE};

/// Default User-Agent string (desktop Chrome)
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Default Accept-Language header
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ja,en-US;q=0.7,en;q=0.3";

/// Extended usage documentation, printed by `mediagrab --llmtxt`
pub const USAGE_LLMTXT: &str = r#"# mediagrab

Resolves a public Instagram post, reel or IGTV URL to the direct URL of its
video or image, using the page's Open Graph meta tags.

## Input
- `url` (required): post URL (must be http:// or https://)

## Output Fields
- `success`: true when media was found
- `url`: direct media URL
- `thumbnail`: preview image URL (omitted when the page has none)
- `title`: post title ("Instagram Media" when the page has none)
- `type`: "video" or "image"
- `error`: user-readable message on failure

## Status Codes
- 200: media found
- 400: URL missing or not http(s)
- 403: the site denied access to the post
- 404: post not found, or no video/image in its metadata
- 500: any other failure

## Examples

### HTTP
```sh
curl -X POST localhost:3000/api/download -H 'content-type: application/json' \
  -d '{"url": "https://www.instagram.com/p/abc123/"}'
```

### CLI
```sh
mediagrab extract https://www.instagram.com/reel/abc123/ -o json
```
"#;
