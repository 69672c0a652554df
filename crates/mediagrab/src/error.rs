//! Error types for mediagrab

use thiserror::Error;

/// Message shown to clients for any failure without a more specific one
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while fetching the media.";

/// Errors that can occur while fetching a post page and extracting its media
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL is missing or blank
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Upstream answered 404
    #[error("Upstream returned 404 Not Found")]
    UpstreamNotFound,

    /// Upstream answered 403
    #[error("Upstream returned 403 Forbidden")]
    UpstreamForbidden,

    /// Upstream answered with another non-success status
    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    /// Page was fetched but carries no usable media meta tags
    #[error("No video or image URL found in page metadata")]
    MediaNotFound,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    ///
    /// Errors produced by `error_for_status` keep their status so that
    /// 404 and 403 can be reported distinctly.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16());
        }
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectError(err)
        } else {
            FetchError::RequestError(err.to_string())
        }
    }

    /// Map a non-success upstream status to an error
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => FetchError::UpstreamNotFound,
            403 => FetchError::UpstreamForbidden,
            other => FetchError::UpstreamStatus(other),
        }
    }

    /// HTTP status to answer the caller with
    pub fn status_code(&self) -> u16 {
        match self {
            FetchError::MissingUrl | FetchError::InvalidUrlScheme => 400,
            FetchError::UpstreamForbidden => 403,
            FetchError::UpstreamNotFound | FetchError::MediaNotFound => 404,
            FetchError::UpstreamStatus(_)
            | FetchError::ClientBuildError(_)
            | FetchError::Timeout
            | FetchError::ConnectError(_)
            | FetchError::RequestError(_) => 500,
        }
    }

    /// User-readable message for the caller
    ///
    /// Unlike `Display`, internal failures collapse into one generic message.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::MissingUrl => "URL was not provided",
            FetchError::InvalidUrlScheme => "Invalid URL: must start with http:// or https://",
            FetchError::UpstreamNotFound => "Post not found.",
            FetchError::UpstreamForbidden => "Access denied.",
            FetchError::MediaNotFound => "No video or image URL was found.",
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// True for errors caused by the caller's input rather than the upstream
    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }
}
