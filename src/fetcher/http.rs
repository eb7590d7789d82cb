//! oEmbed metadata collaborator.
use super::oembed_types::OEmbedResponse;
use super::traits::MetadataFetcher;
use crate::config::{FetchOptions, HttpConfig, parse_endpoint};
use crate::error::FetchError;
use crate::types::{Video, VideoId};
use async_trait::async_trait;
use reqwest::StatusCode;

/// Metadata collaborator backed by an oEmbed endpoint.
///
/// Requests `GET <endpoint>?url=<watch url>&format=json` and maps the answer:
///
/// | Response | Result |
/// |---|---|
/// | 2xx with a title | `Ok(Video)` |
/// | 2xx with an in-band `error` | [`FetchError::Unavailable`] |
/// | 401, 403 | [`FetchError::Restricted`] |
/// | 404 | [`FetchError::Unavailable`] |
/// | any other status | [`FetchError::UnexpectedStatus`] |
/// | undecodable body | [`FetchError::Malformed`] |
/// | no response | [`FetchError::Transport`] |
///
/// With [`FetchOptions::use_cheat`] set, a restricted answer from the primary
/// endpoint is retried once against the fallback endpoint.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: url::Url,
    fallback_endpoint: Option<url::Url>,
}

impl HttpFetcher {
    /// Creates a fetcher from HTTP settings.
    pub fn new(config: &HttpConfig) -> crate::Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let endpoint = parse_endpoint(&config.endpoint, "http.endpoint")?;
        let fallback_endpoint = config
            .fallback_endpoint
            .as_deref()
            .map(|url| parse_endpoint(url, "http.fallback_endpoint"))
            .transpose()?;

        Ok(Self {
            client,
            endpoint,
            fallback_endpoint,
        })
    }

    /// Queries a single endpoint.
    async fn query(&self, endpoint: &url::Url, id: &VideoId) -> Result<Video, FetchError> {
        let watch_url = id.watch_url();

        let response = self
            .client
            .get(endpoint.clone())
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = Self::reason(status, response.text().await.ok());
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    FetchError::Restricted { reason }
                }
                StatusCode::NOT_FOUND => FetchError::Unavailable { reason },
                _ => FetchError::UnexpectedStatus {
                    status: status.as_u16(),
                },
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let payload: OEmbedResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        Self::convert(id, payload)
    }

    /// Converts an oEmbed document into our Video structure.
    fn convert(id: &VideoId, payload: OEmbedResponse) -> Result<Video, FetchError> {
        if let Some(error) = payload.error {
            return Err(FetchError::Unavailable { reason: error });
        }

        let title = payload
            .title
            .ok_or_else(|| FetchError::Malformed("response has no title".to_string()))?;

        Ok(Video {
            identifier: id.clone(),
            title,
            author: payload.author_name,
            author_url: payload.author_url,
            thumbnail_url: payload.thumbnail_url,
            thumbnail_width: payload.thumbnail_width,
            thumbnail_height: payload.thumbnail_height,
            provider: payload.provider_name,
            embed_html: payload.html,
        })
    }

    /// Picks the body text when it is short and plain, else the canonical reason.
    fn reason(status: StatusCode, body: Option<String>) -> String {
        body.map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty() && text.len() <= 200 && !text.starts_with('<'))
            .unwrap_or_else(|| {
                format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
            })
    }
}

#[async_trait]
impl MetadataFetcher for HttpFetcher {
    async fn fetch_metadata(
        &self,
        id: &VideoId,
        options: &FetchOptions,
    ) -> Result<Video, FetchError> {
        match self.query(&self.endpoint, id).await {
            Err(FetchError::Restricted { reason }) if options.use_cheat => {
                let Some(fallback) = &self.fallback_endpoint else {
                    return Err(FetchError::Restricted { reason });
                };
                tracing::debug!(
                    video_id = %id,
                    reason = %reason,
                    fallback = %fallback,
                    "primary endpoint refused video, trying fallback endpoint"
                );
                self.query(fallback, id).await
            }
            result => result,
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
