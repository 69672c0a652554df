//! Core types for mediagrab

use crate::error::FetchError;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Title used when the page carries no `og:title`
pub const DEFAULT_TITLE: &str = "Instagram Media";

/// Kind of media a post resolved to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Post has a video (`og:video`)
    Video,
    /// Post has an image (`og:image` with a known extension)
    Image,
    /// Nothing usable was found
    #[default]
    Unknown,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Video => write!(f, "video"),
            MediaType::Image => write!(f, "image"),
            MediaType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Media metadata extracted from a post page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionResult {
    /// Direct media URL; empty when nothing was found
    pub media_url: String,

    /// First non-empty `og:image`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// First non-empty `og:title`, or [`DEFAULT_TITLE`]
    pub title: String,

    /// Classification of `media_url`
    pub media_type: MediaType,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            media_url: String::new(),
            thumbnail_url: None,
            title: DEFAULT_TITLE.to_string(),
            media_type: MediaType::Unknown,
        }
    }
}

impl ExtractionResult {
    /// True when a media URL was extracted
    pub fn is_found(&self) -> bool {
        !self.media_url.is_empty()
    }
}

/// Inbound request: the post URL to resolve
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DownloadRequest {
    /// Post URL (required, must be http:// or https://)
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<String>")]
    pub url: String,
}

/// `null` reads as an empty string so it reaches URL validation
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl DownloadRequest {
    /// Create a new request with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Outbound response body
///
/// Success carries `url`, `thumbnail`, `title` and `type`;
/// failure carries only `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DownloadResponse {
    /// Whether media was found
    pub success: bool,

    /// Direct media URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Post title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// "video" or "image"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,

    /// User-readable error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadResponse {
    /// Build a failure response with the given message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

impl From<ExtractionResult> for DownloadResponse {
    fn from(result: ExtractionResult) -> Self {
        Self {
            success: true,
            url: Some(result.media_url),
            thumbnail: result.thumbnail_url,
            title: Some(result.title),
            media_type: Some(result.media_type),
            error: None,
        }
    }
}

impl From<&FetchError> for DownloadResponse {
    fn from(err: &FetchError) -> Self {
        Self::failure(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_display() {
        assert_eq!(MediaType::Video.to_string(), "video");
        assert_eq!(MediaType::Image.to_string(), "image");
        assert_eq!(MediaType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_extraction_result_default() {
        let result = ExtractionResult::default();
        assert!(!result.is_found());
        assert_eq!(result.title, "Instagram Media");
        assert_eq!(result.media_type, MediaType::Unknown);
        assert!(result.thumbnail_url.is_none());
    }

    #[test]
    fn test_request_missing_url_deserializes_empty() {
        let req: DownloadRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_empty());
    }

    #[test]
    fn test_request_null_url_deserializes_empty() {
        let req: DownloadRequest = serde_json::from_str(r#"{"url": null}"#).unwrap();
        assert!(req.url.is_empty());
    }

    #[test]
    fn test_request_non_string_url_rejected() {
        assert!(serde_json::from_str::<DownloadRequest>(r#"{"url": 5}"#).is_err());
    }

    #[test]
    fn test_success_response_serialization() {
        let resp = DownloadResponse::from(ExtractionResult {
            media_url: "https://cdn.example.com/v.mp4?video=1".to_string(),
            thumbnail_url: Some("https://cdn.example.com/t.jpg".to_string()),
            title: "A reel".to_string(),
            media_type: MediaType::Video,
        });
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["url"], "https://cdn.example.com/v.mp4?video=1");
        assert_eq!(json["thumbnail"], "https://cdn.example.com/t.jpg");
        assert_eq!(json["title"], "A reel");
        assert_eq!(json["type"], "video");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_response_serialization() {
        let resp = DownloadResponse::from(&FetchError::UpstreamForbidden);
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"Access denied."}"#);
    }
}
