//! Starting retrievals.

use super::Client;
use crate::error::{Error, ErrorKind, Failure};
use crate::operation::{self, Operation, OperationHandle};
use crate::types::{Video, VideoId};

impl Client {
    /// Start retrieving metadata for `identifier`
    ///
    /// Returns immediately. `on_complete` runs exactly once on the client's main
    /// context with the video or a localized [`Failure`], unless the returned
    /// handle is cancelled first, in which case it never runs.
    ///
    /// A missing or malformed identifier never reaches the collaborator: it is
    /// reported as [`ErrorKind::InvalidIdentifier`] through the same delivery
    /// path, so the handle can still cancel it.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn main() -> yt_info::Result<()> {
    /// let client = yt_info::Client::default_client()?;
    /// let operation = client.retrieve("dQw4w9WgXcQ", |result| {
    ///     if let Ok(video) = result {
    ///         println!("{}", video.title);
    ///     }
    /// });
    ///
    /// // Changed our mind
    /// operation.cancel();
    /// # Ok(())
    /// # }
    /// ```
    pub fn retrieve<'a, F>(&self, identifier: impl Into<Option<&'a str>>, on_complete: F) -> OperationHandle
    where
        F: FnOnce(Result<Video, Failure>) + Send + 'static,
    {
        let identifier = identifier.into();

        let Some(video_id) = identifier.and_then(VideoId::parse) else {
            tracing::debug!(identifier = ?identifier, "rejecting invalid video identifier");
            let handle = OperationHandle::new(None);
            operation::deliver(
                handle.clone(),
                self.dispatcher.as_ref(),
                Err(Failure::new(ErrorKind::InvalidIdentifier, &self.language)),
                on_complete,
            );
            return handle;
        };

        Operation {
            handle: OperationHandle::new(Some(video_id.clone())),
            video_id,
            options: self.options,
            language: self.language.clone(),
            fetcher: self.fetcher.clone(),
            dispatcher: self.dispatcher.clone(),
        }
        .start(&self.runtime, on_complete)
    }

    /// Retrieve metadata and await the outcome
    ///
    /// Same semantics as [`retrieve`](Self::retrieve). Dropping the returned
    /// future before it resolves cancels the operation. The main context must
    /// be running for the future to resolve.
    ///
    /// If the main context stops before the result reaches it, the future
    /// resolves to [`ErrorKind::UnexpectedResponse`] with an
    /// [`Error::MainContext`] source, so a lost main context can be told apart
    /// from a bad remote response via [`std::error::Error::source`].
    pub async fn video<'a>(&self, identifier: impl Into<Option<&'a str>>) -> Result<Video, Failure> {
        let (tx, rx) = tokio::sync::oneshot::channel();

        let handle = self.retrieve(identifier, move |result| {
            // The receiver is gone only if the awaiting future was dropped
            let _ = tx.send(result);
        });
        // Cancelling after delivery is a no-op, so the guard can always fire
        let _guard = CancelOnDrop(handle);

        rx.await.unwrap_or_else(|_| {
            Err(Failure::new(ErrorKind::UnexpectedResponse, &self.language).with_source(
                Error::MainContext("main context stopped before the result was delivered".into()),
            ))
        })
    }
}

/// Cancels the wrapped operation when dropped
struct CancelOnDrop(OperationHandle);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
