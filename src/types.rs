//! Core types for yt-info

use serde::{Deserialize, Serialize};

/// Validated video identifier
///
/// Exactly [`VideoId::LEN`] characters from the URL-safe base64 alphabet
/// (`A-Z`, `a-z`, `0-9`, `-`, `_`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Length of every video identifier
    pub const LEN: usize = 11;

    /// Parse an identifier, returning None if it is structurally invalid
    pub fn parse(identifier: &str) -> Option<Self> {
        Self::is_valid(identifier).then(|| Self(identifier.to_string()))
    }

    /// Check the identifier shape without allocating
    pub fn is_valid(identifier: &str) -> bool {
        identifier.len() == Self::LEN
            && identifier
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(format!("invalid video identifier '{}'", value))
        }
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// Video metadata delivered on success
///
/// Produced by a [`MetadataFetcher`](crate::fetcher::MetadataFetcher). The client
/// passes it through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Identifier the video was requested with
    pub identifier: VideoId,
    /// Video title
    pub title: String,
    /// Channel or uploader name
    #[serde(default)]
    pub author: Option<String>,
    /// Channel or uploader URL
    #[serde(default)]
    pub author_url: Option<String>,
    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Thumbnail width in pixels
    #[serde(default)]
    pub thumbnail_width: Option<u32>,
    /// Thumbnail height in pixels
    #[serde(default)]
    pub thumbnail_height: Option<u32>,
    /// Name of the service that served the metadata
    #[serde(default)]
    pub provider: Option<String>,
    /// Embeddable player HTML
    #[serde(default)]
    pub embed_html: Option<String>,
}

impl Video {
    /// Create a video with only the mandatory fields set
    pub fn new(identifier: VideoId, title: impl Into<String>) -> Self {
        Self {
            identifier,
            title: title.into(),
            author: None,
            author_url: None,
            thumbnail_url: None,
            thumbnail_width: None,
            thumbnail_height: None,
            provider: None,
            embed_html: None,
        }
    }
}
