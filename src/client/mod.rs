//! The video metadata client, split into focused submodules.
//!
//! - `builder`: Explicit construction with injected collaborators
//! - `shared`: The lazily created process-wide default client
//! - `retrieve`: Request validation, dispatch and the awaitable wrapper

mod builder;
mod retrieve;
mod shared;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use builder::ClientBuilder;

use crate::config::{ClientConfig, FetchOptions};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::fetcher::MetadataFetcher;
use std::sync::Arc;

/// Entry point for video metadata retrieval (cloneable - all fields are shared)
///
/// A client holds no per-call state: every [`retrieve`](Client::retrieve) produces
/// an independent operation. Its language is fixed at construction and only
/// affects the text of failure messages.
#[derive(Clone)]
pub struct Client {
    /// Normalized language identifier used for failure messages
    pub(crate) language: Arc<str>,
    /// Options forwarded to every collaborator call
    pub(crate) options: FetchOptions,
    /// Collaborator performing the network call and decoding
    pub(crate) fetcher: Arc<dyn MetadataFetcher>,
    /// Designated main context on which callbacks run
    pub(crate) dispatcher: Arc<dyn Dispatcher>,
    /// Runtime on which collaborator work is spawned
    pub(crate) runtime: tokio::runtime::Handle,
}

impl Client {
    /// Start building a client with explicit collaborators
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The shared process-wide client
    ///
    /// Created on first use with the host's preferred language, the HTTP
    /// collaborator, a dedicated main context thread and a shared background
    /// runtime. Later calls return a clone of the same instance.
    ///
    /// # Errors
    ///
    /// Fails only if the first initialization fails (runtime, thread or HTTP
    /// client creation); a later call retries.
    pub fn default_client() -> Result<Client> {
        shared::default_client()
    }

    /// A new client bound to `language`
    ///
    /// `None`, or an identifier that is not a language code, falls back to the
    /// host's preferred language. Like the shared client, it runs collaborator
    /// work on the shared background runtime, never on the caller's.
    pub fn with_locale(language: Option<&str>) -> Result<Client> {
        let mut builder = Self::builder().runtime(shared::background_runtime()?.handle().clone());
        if let Some(language) = language {
            builder = builder.language(language);
        }
        builder.build()
    }

    /// A new client built from configuration
    ///
    /// Collaborator work runs on the shared background runtime.
    pub fn from_config(config: &ClientConfig) -> Result<Client> {
        config.validate()?;

        let mut builder = Self::builder()
            .runtime(shared::background_runtime()?.handle().clone())
            .fetch_options(config.fetch)
            .http_config(config.http.clone());
        if let Some(language) = &config.language {
            builder = builder.language(language);
        }
        builder.build()
    }

    /// Language identifier used for failure messages
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Options forwarded to the collaborator
    pub fn fetch_options(&self) -> FetchOptions {
        self.options
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("language", &self.language)
            .field("options", &self.options)
            .field("fetcher", &self.fetcher.name())
            .field("dispatcher", &self.dispatcher.name())
            .finish()
    }
}
