//! Common test utilities for yt-info integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;
use yt_info::{
    Client, Dispatcher, FetchError, FetchOptions, HttpConfig, MetadataFetcher, Video, VideoId,
};

/// A well-formed identifier
pub const VALID_ID: &str = "dQw4w9WgXcQ";

/// Upper bound for anything a test waits on
pub const WAIT: Duration = Duration::from_secs(5);

/// Collaborator that answers with a fixed outcome, optionally after a gate opens
pub struct StubFetcher {
    outcome: Box<dyn Fn(&VideoId) -> Result<Video, FetchError> + Send + Sync>,
    gate: Option<Semaphore>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn succeeding() -> Self {
        Self::answering(|id| Ok(Video::new(id.clone(), "Never Gonna Give You Up")))
    }

    pub fn failing(error: fn() -> FetchError) -> Self {
        Self::answering(move |_| Err(error()))
    }

    fn answering<F>(outcome: F) -> Self
    where
        F: Fn(&VideoId) -> Result<Video, FetchError> + Send + Sync + 'static,
    {
        Self {
            outcome: Box::new(outcome),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Hold every call until [`StubFetcher::release`]
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn release(&self, calls: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(calls);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataFetcher for StubFetcher {
    async fn fetch_metadata(
        &self,
        id: &VideoId,
        _options: &FetchOptions,
    ) -> Result<Video, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?
                .forget();
        }
        (self.outcome)(id)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Client on the current runtime with explicit collaborators
pub fn client(fetcher: Arc<dyn MetadataFetcher>, dispatcher: Arc<dyn Dispatcher>) -> Client {
    client_with_language(fetcher, dispatcher, "en")
}

pub fn client_with_language(
    fetcher: Arc<dyn MetadataFetcher>,
    dispatcher: Arc<dyn Dispatcher>,
    language: &str,
) -> Client {
    Client::builder()
        .language(language)
        .fetcher(fetcher)
        .dispatcher(dispatcher)
        .runtime(tokio::runtime::Handle::current())
        .build()
        .expect("client should build")
}

/// HTTP settings pointing at a mock server
pub fn http_config(endpoint: String, fallback_endpoint: Option<String>) -> HttpConfig {
    HttpConfig {
        endpoint,
        fallback_endpoint,
        timeout: Duration::from_secs(2),
        ..Default::default()
    }
}

/// A complete oEmbed document
pub fn oembed_document() -> serde_json::Value {
    serde_json::json!({
        "title": "Never Gonna Give You Up",
        "author_name": "Rick Astley",
        "author_url": "https://www.youtube.com/@RickAstleyYT",
        "type": "video",
        "version": "1.0",
        "provider_name": "YouTube",
        "provider_url": "https://www.youtube.com/",
        "thumbnail_url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
        "thumbnail_width": 480,
        "thumbnail_height": 360,
        "html": "<iframe width=\"200\" height=\"113\"></iframe>"
    })
}
