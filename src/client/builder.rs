//! Explicit client construction.

use super::{Client, shared};
use crate::config::{FetchOptions, HttpConfig};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::fetcher::{HttpFetcher, MetadataFetcher};
use crate::locale;
use std::sync::Arc;

/// Builder for [`Client`]
///
/// Every part left unset gets the same default the shared client uses:
///
/// | Part | Default |
/// |---|---|
/// | language | host preferred language |
/// | fetcher | [`HttpFetcher`] built from the HTTP settings |
/// | dispatcher | the process-wide main context thread |
/// | runtime | the current tokio runtime, else the shared background runtime |
///
/// An operation whose runtime shuts down before it settles is delivered as an
/// [`ErrorKind::UnexpectedResponse`](crate::ErrorKind::UnexpectedResponse)
/// failure caused by [`Error::Runtime`](crate::Error::Runtime). Pass
/// [`runtime`](Self::runtime) explicitly when the current runtime may not
/// outlive the client.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use yt_info::dispatch::MainContext;
/// use yt_info::Client;
///
/// # fn main() -> yt_info::Result<()> {
/// let (main_context, main_loop) = MainContext::new();
/// let client = Client::builder()
///     .language("de")
///     .dispatcher(Arc::new(main_context))
///     .build()?;
///
/// let _operation = client.retrieve("dQw4w9WgXcQ", |result| match result {
///     Ok(video) => println!("{}", video.title),
///     Err(failure) => eprintln!("{} ({})", failure, failure.kind()),
/// });
///
/// // Callbacks run here, on the thread that drives the loop
/// main_loop.run();
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    language: Option<String>,
    options: FetchOptions,
    http: HttpConfig,
    fetcher: Option<Arc<dyn MetadataFetcher>>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    runtime: Option<tokio::runtime::Handle>,
}

impl ClientBuilder {
    /// Language identifier for failure messages
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Options forwarded to every collaborator call
    pub fn fetch_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Shortcut for setting [`FetchOptions::use_cheat`]
    pub fn use_cheat(mut self, use_cheat: bool) -> Self {
        self.options.use_cheat = use_cheat;
        self
    }

    /// HTTP settings for the default collaborator (ignored with [`fetcher`](Self::fetcher))
    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Collaborator performing the retrieval
    pub fn fetcher(mut self, fetcher: Arc<dyn MetadataFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Designated main context for callbacks
    pub fn dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Runtime on which collaborator work is spawned
    pub fn runtime(mut self, runtime: tokio::runtime::Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client> {
        let language = locale::resolve(self.language.as_deref());

        let fetcher: Arc<dyn MetadataFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(&self.http)?),
        };

        let dispatcher: Arc<dyn Dispatcher> = match self.dispatcher {
            Some(dispatcher) => dispatcher,
            None => Arc::new(shared::main_context()?.clone()),
        };

        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => match tokio::runtime::Handle::try_current() {
                Ok(current) => current,
                Err(_) => shared::background_runtime()?.handle().clone(),
            },
        };

        tracing::debug!(
            language = %language,
            fetcher = fetcher.name(),
            dispatcher = dispatcher.name(),
            use_cheat = self.options.use_cheat,
            "client created"
        );

        Ok(Client {
            language: Arc::from(language),
            options: self.options,
            fetcher,
            dispatcher,
            runtime,
        })
    }
}
