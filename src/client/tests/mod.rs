use super::*;
use crate::dispatch::{Dispatcher, InlineDispatcher, MainContext};
use crate::error::{ErrorKind, FetchError, Failure};
use crate::operation::OperationState;
use crate::test_helpers::{ScriptedFetcher, VALID_ID, test_video};
use crate::types::Video;
use std::sync::Arc;
use std::time::Duration;
use std::result::Result;

mod construction;

/// Client wired to a scripted collaborator on the current test runtime
fn test_client(fetcher: Arc<ScriptedFetcher>, dispatcher: Arc<dyn Dispatcher>) -> Client {
    test_client_with_language(fetcher, dispatcher, "en")
}

fn test_client_with_language(
    fetcher: Arc<ScriptedFetcher>,
    dispatcher: Arc<dyn Dispatcher>,
    language: &str,
) -> Client {
    Client::builder()
        .language(language)
        .fetcher(fetcher)
        .dispatcher(dispatcher)
        .runtime(tokio::runtime::Handle::current())
        .build()
        .unwrap()
}

/// Callback forwarding its outcome into a channel
fn forward(
    tx: tokio::sync::mpsc::UnboundedSender<Result<Video, Failure>>,
) -> impl FnOnce(Result<Video, Failure>) + Send + 'static {
    move |result| {
        tx.send(result).unwrap();
    }
}
