//! Open Graph media extraction
//!
//! Classifies a post page as video or image by looking at its `og:*` meta
//! tags in a fixed order. Each field takes the first matching tag.

use crate::types::{ExtractionResult, MediaType};
use scraper::{Html, Selector};
use tracing::debug;

const OG_VIDEO: &str = "og:video";
const OG_IMAGE: &str = "og:image";
const OG_TITLE: &str = "og:title";

/// Substring an `og:video` URL must contain to be accepted
const VIDEO_MARKER: &str = "video";

/// Extensions that make an `og:image` URL acceptable as the media itself
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Extract media metadata from a post page
///
/// Never fails; an empty `media_url` in the result means nothing usable
/// was found (see [`ExtractionResult::is_found`]).
pub fn extract_media(html: &str) -> ExtractionResult {
    let document = Html::parse_document(html);
    let mut result = ExtractionResult::default();

    if let Some(video) = meta_contents(&document, OG_VIDEO)
        .into_iter()
        .find(|content| content.contains(VIDEO_MARKER))
    {
        result.media_url = video;
        result.media_type = MediaType::Video;
    }

    result.thumbnail_url = meta_contents(&document, OG_IMAGE).into_iter().next();

    if let Some(title) = meta_contents(&document, OG_TITLE).into_iter().next() {
        result.title = title;
    }

    // Second pass over og:image, independent of the thumbnail lookup
    if result.media_url.is_empty() {
        if let Some(image) = meta_contents(&document, OG_IMAGE)
            .into_iter()
            .find(|content| has_image_extension(content))
        {
            result.media_url = image;
            result.media_type = MediaType::Image;
        }
    }

    debug!(
        media_type = %result.media_type,
        found = result.is_found(),
        has_thumbnail = result.thumbnail_url.is_some(),
        "Extracted Open Graph metadata"
    );

    result
}

/// Non-empty `content` values of `<meta property="...">` tags, in document order
fn meta_contents(document: &Html, property: &str) -> Vec<String> {
    let selector_str = format!("meta[property=\"{}\"]", property);
    let Ok(selector) = Selector::parse(&selector_str) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(|content| content.to_string())
        .collect()
}

fn has_image_extension(url: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| url.contains(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(head: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head>{}</head><body><p>post</p></body></html>",
            head
        )
    }

    #[test]
    fn test_video_post() {
        let html = page(
            r#"<meta property="og:video" content="https://cdn.example.com/o1/video/abc.mp4">
               <meta property="og:image" content="https://cdn.example.com/thumb.jpg">
               <meta property="og:title" content="Reel by someone">"#,
        );
        let result = extract_media(&html);

        assert_eq!(result.media_type, MediaType::Video);
        assert_eq!(result.media_url, "https://cdn.example.com/o1/video/abc.mp4");
        assert_eq!(
            result.thumbnail_url,
            Some("https://cdn.example.com/thumb.jpg".to_string())
        );
        assert_eq!(result.title, "Reel by someone");
    }

    #[test]
    fn test_image_post_png() {
        let html = page(r#"<meta property="og:image" content="https://cdn.example.com/photo.png">"#);
        let result = extract_media(&html);

        assert_eq!(result.media_type, MediaType::Image);
        assert_eq!(result.media_url, "https://cdn.example.com/photo.png");
        assert_eq!(
            result.thumbnail_url,
            Some("https://cdn.example.com/photo.png".to_string())
        );
    }

    #[test]
    fn test_no_meta_tags() {
        let result = extract_media(&page("<title>Nothing here</title>"));

        assert!(!result.is_found());
        assert!(result.media_url.is_empty());
        assert_eq!(result.media_type, MediaType::Unknown);
        assert!(result.thumbnail_url.is_none());
    }

    #[test]
    fn test_default_title() {
        let html = page(r#"<meta property="og:image" content="https://cdn.example.com/a.jpg">"#);
        assert_eq!(extract_media(&html).title, "Instagram Media");
    }

    #[test]
    fn test_empty_title_falls_through() {
        let html = page(
            r#"<meta property="og:title" content="">
               <meta property="og:title" content="Second title">"#,
        );
        assert_eq!(extract_media(&html).title, "Second title");
    }

    #[test]
    fn test_video_without_marker_falls_back_to_image() {
        let html = page(
            r#"<meta property="og:video" content="https://cdn.example.com/clip.mp4">
               <meta property="og:image" content="https://cdn.example.com/still.jpeg">"#,
        );
        let result = extract_media(&html);

        assert_eq!(result.media_type, MediaType::Image);
        assert_eq!(result.media_url, "https://cdn.example.com/still.jpeg");
    }

    #[test]
    fn test_first_matching_video_wins() {
        let html = page(
            r#"<meta property="og:video" content="https://cdn.example.com/clip.mp4">
               <meta property="og:video" content="https://cdn.example.com/video/one.mp4">
               <meta property="og:video" content="https://cdn.example.com/video/two.mp4">"#,
        );
        let result = extract_media(&html);

        assert_eq!(result.media_type, MediaType::Video);
        assert_eq!(result.media_url, "https://cdn.example.com/video/one.mp4");
    }

    #[test]
    fn test_thumbnail_and_media_scanned_separately() {
        // First og:image has no known extension: it is the thumbnail but not the media
        let html = page(
            r#"<meta property="og:image" content="https://cdn.example.com/preview?id=1">
               <meta property="og:image" content="https://cdn.example.com/full.jpg">"#,
        );
        let result = extract_media(&html);

        assert_eq!(
            result.thumbnail_url,
            Some("https://cdn.example.com/preview?id=1".to_string())
        );
        assert_eq!(result.media_url, "https://cdn.example.com/full.jpg");
        assert_eq!(result.media_type, MediaType::Image);
    }

    #[test]
    fn test_image_without_known_extension_is_not_found() {
        let html = page(r#"<meta property="og:image" content="https://cdn.example.com/photo.webp">"#);
        let result = extract_media(&html);

        assert!(!result.is_found());
        assert_eq!(
            result.thumbnail_url,
            Some("https://cdn.example.com/photo.webp".to_string())
        );
    }

    #[test]
    fn test_property_match_is_exact() {
        let html = page(
            r#"<meta property="og:video:secure_url" content="https://cdn.example.com/video/a.mp4">
               <meta name="og:video" content="https://cdn.example.com/video/b.mp4">
               <meta property="og:image:url" content="https://cdn.example.com/c.jpg">"#,
        );
        assert!(!extract_media(&html).is_found());
    }

    #[test]
    fn test_meta_without_content_ignored() {
        let html = page(
            r#"<meta property="og:image">
               <meta property="og:image" content="https://cdn.example.com/b.png">"#,
        );
        let result = extract_media(&html);
        assert_eq!(
            result.thumbnail_url,
            Some("https://cdn.example.com/b.png".to_string())
        );
    }

    #[test]
    fn test_malformed_html() {
        let html = r#"<html><head><meta property="og:image" content="https://x.test/a.jpg"><div><p>unclosed"#;
        let result = extract_media(html);
        assert_eq!(result.media_url, "https://x.test/a.jpg");
    }

    #[test]
    fn test_has_image_extension() {
        assert!(has_image_extension("https://x.test/a.jpg?stp=1"));
        assert!(has_image_extension("https://x.test/a.jpeg"));
        assert!(has_image_extension("https://x.test/a.png"));
        assert!(!has_image_extension("https://x.test/a.gif"));
    }
}
