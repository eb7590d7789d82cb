//! oEmbed response types for deserialization.
//!
//! These structures mirror the JSON documents returned by oEmbed providers.
use serde::Deserialize;

/// Top-level oEmbed response.
///
/// Every field is optional: providers differ in what they fill in, and some
/// (noembed) answer `200 OK` with only an `error` member.
#[derive(Debug, Deserialize)]
pub(super) struct OEmbedResponse {
    /// Video title
    pub title: Option<String>,
    /// Uploader name
    pub author_name: Option<String>,
    /// Uploader URL
    pub author_url: Option<String>,
    /// Provider name (e.g. "YouTube")
    pub provider_name: Option<String>,
    /// Thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Thumbnail width in pixels
    pub thumbnail_width: Option<u32>,
    /// Thumbnail height in pixels
    pub thumbnail_height: Option<u32>,
    /// Embeddable player HTML
    pub html: Option<String>,
    /// Error description reported in-band
    pub error: Option<String>,
}
