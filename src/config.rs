//! Configuration types for yt-info

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options passed explicitly into every collaborator call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Let the collaborator use its alternate retrieval path when the primary
    /// one refuses a video (default: false)
    #[serde(default)]
    pub use_cheat: bool,
}

/// HTTP collaborator settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// oEmbed endpoint queried for video metadata
    /// (default: "https://www.youtube.com/oembed")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Alternate oEmbed endpoint used when `use_cheat` is set and the primary
    /// endpoint refuses the video (default: "https://noembed.com/embed")
    #[serde(default = "default_fallback_endpoint")]
    pub fallback_endpoint: Option<String>,

    /// Request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            fallback_endpoint: default_fallback_endpoint(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Main configuration for [`Client`](crate::Client)
///
/// Fetch options are flattened so the serialized form stays a single level:
///
/// ```json
/// { "language": "fr", "use_cheat": true, "http": { "timeout": 10 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Language used for failure messages (None = host preferred language)
    #[serde(default)]
    pub language: Option<String>,

    /// Options forwarded to the collaborator
    #[serde(flatten)]
    pub fetch: FetchOptions,

    /// HTTP collaborator settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl ClientConfig {
    /// Check the configuration for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if let Some(language) = &self.language {
            if crate::locale::normalize(language).is_none() {
                return Err(Error::Config {
                    message: format!("'{}' is not a language identifier", language),
                    key: Some("language".to_string()),
                });
            }
        }

        self.http.validate()
    }
}

impl HttpConfig {
    /// Check endpoints and timeout
    pub fn validate(&self) -> Result<()> {
        parse_endpoint(&self.endpoint, "http.endpoint")?;
        if let Some(fallback) = &self.fallback_endpoint {
            parse_endpoint(fallback, "http.fallback_endpoint")?;
        }

        if self.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
                key: Some("http.timeout".to_string()),
            });
        }

        Ok(())
    }
}

/// Parse an endpoint URL, accepting only http and https
pub(crate) fn parse_endpoint(value: &str, key: &str) -> Result<url::Url> {
    let url = url::Url::parse(value).map_err(|e| Error::Config {
        message: format!("invalid URL '{}': {}", value, e),
        key: Some(key.to_string()),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::Config {
            message: format!("unsupported URL scheme '{}'", scheme),
            key: Some(key.to_string()),
        }),
    }
}

fn default_endpoint() -> String {
    "https://www.youtube.com/oembed".to_string()
}

fn default_fallback_endpoint() -> Option<String> {
    Some("https://noembed.com/embed".to_string())
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("yt-info/", env!("CARGO_PKG_VERSION")).to_string()
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
