//! Cancellable retrieval operations
//!
//! An operation is one call to [`Client::retrieve`](crate::Client::retrieve). Its
//! lifecycle is a three-state machine:
//!
//! - Active -> Completed (the callback is about to run)
//! - Active -> Cancelled (the callback will never run)
//!
//! Both end states are final. The transition out of `Active` is a single
//! compare-and-swap, performed by [`OperationHandle::cancel`] on one side and by
//! the delivery job on the main context on the other. Whichever wins decides the
//! outcome, so a callback can never start after `cancel()` returned `true`, and
//! `cancel()` can never succeed once the callback has started.

use crate::config::FetchOptions;
use crate::dispatch::Dispatcher;
use crate::error::{Error, ErrorKind, Failure};
use crate::fetcher::MetadataFetcher;
use crate::types::{Video, VideoId};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio_util::sync::CancellationToken;

const ACTIVE: u8 = 0;
const COMPLETED: u8 = 1;
const CANCELLED: u8 = 2;

/// Observable state of an operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationState {
    /// The result has not been delivered and the operation was not cancelled
    Active,
    /// The callback has been (or is being) invoked
    Completed,
    /// The operation was cancelled; the callback will never be invoked
    Cancelled,
}

impl OperationState {
    fn from_u8(value: u8) -> Self {
        match value {
            COMPLETED => OperationState::Completed,
            CANCELLED => OperationState::Cancelled,
            _ => OperationState::Active,
        }
    }
}

/// State shared between a handle and the background work
#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    /// Aborts the collaborator call when cancelled
    cancel_token: CancellationToken,
    /// Kept for log context only
    video_id: Option<VideoId>,
}

/// Caller-side handle used to cancel a retrieval
///
/// Cloning yields another handle to the same operation. Dropping every handle
/// does not cancel the operation.
#[derive(Clone, Debug)]
pub struct OperationHandle {
    shared: Arc<Shared>,
}

impl OperationHandle {
    pub(crate) fn new(video_id: Option<VideoId>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: AtomicU8::new(ACTIVE),
                cancel_token: CancellationToken::new(),
                video_id,
            }),
        }
    }

    /// Cancel the operation
    ///
    /// Idempotent and callable from any thread. If the callback has not started
    /// yet, it is guaranteed never to run and the in-flight collaborator call is
    /// aborted. Once the callback has started this is a no-op.
    ///
    /// Returns `true` only for the call that actually cancelled the operation.
    pub fn cancel(&self) -> bool {
        match self.shared.state.compare_exchange(
            ACTIVE,
            CANCELLED,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                self.shared.cancel_token.cancel();
                tracing::debug!(video_id = ?self.shared.video_id, "operation cancelled");
                true
            }
            Err(_) => false,
        }
    }

    /// Current state of the operation
    pub fn state(&self) -> OperationState {
        OperationState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    /// Whether the operation was cancelled before delivery
    pub fn is_cancelled(&self) -> bool {
        self.state() == OperationState::Cancelled
    }

    /// Whether the operation reached a final state
    pub fn is_finished(&self) -> bool {
        self.state() != OperationState::Active
    }

    /// Claim the right to deliver; fails if the operation was cancelled
    fn try_complete(&self) -> bool {
        self.shared
            .state
            .compare_exchange(ACTIVE, COMPLETED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn cancel_token(&self) -> &CancellationToken {
        &self.shared.cancel_token
    }
}

/// How the background work ended
enum Settlement {
    /// The collaborator produced a result or a failure
    Finished(Result<Video, Failure>),
    /// The operation was cancelled first; nothing is delivered
    Cancelled,
}

/// One accepted request, ready to run on the background runtime
pub(crate) struct Operation {
    pub(crate) handle: OperationHandle,
    pub(crate) video_id: VideoId,
    pub(crate) options: FetchOptions,
    pub(crate) language: Arc<str>,
    pub(crate) fetcher: Arc<dyn MetadataFetcher>,
    pub(crate) dispatcher: Arc<dyn Dispatcher>,
}

impl Operation {
    /// Spawn the collaborator call and return the caller's handle immediately
    pub(crate) fn start<F>(self, runtime: &tokio::runtime::Handle, on_complete: F) -> OperationHandle
    where
        F: FnOnce(Result<Video, Failure>) + Send + 'static,
    {
        let handle = self.handle.clone();
        let guard = DeliveryGuard {
            handle: self.handle.clone(),
            dispatcher: self.dispatcher.clone(),
            language: self.language.clone(),
            on_complete: Some(on_complete),
        };

        // A runtime that is shut down drops the task, polled or not; the guard
        // still delivers a failure in that case
        runtime.spawn(async move {
            match self.run().await {
                Settlement::Finished(outcome) => guard.settle(outcome),
                Settlement::Cancelled => {
                    tracing::debug!(
                        video_id = %self.video_id,
                        "collaborator call aborted by cancellation"
                    );
                }
            }
        });

        handle
    }

    async fn run(&self) -> Settlement {
        tracing::debug!(
            video_id = %self.video_id,
            fetcher = self.fetcher.name(),
            use_cheat = self.options.use_cheat,
            "fetching video metadata"
        );

        let fetch = AssertUnwindSafe(self.fetcher.fetch_metadata(&self.video_id, &self.options))
            .catch_unwind();

        tokio::select! {
            biased;
            _ = self.handle.cancel_token().cancelled() => Settlement::Cancelled,
            result = fetch => Settlement::Finished(self.translate(result)),
        }
    }

    fn translate(
        &self,
        result: std::thread::Result<Result<Video, crate::error::FetchError>>,
    ) -> Result<Video, Failure> {
        match result {
            Ok(Ok(video)) => {
                tracing::info!(video_id = %self.video_id, title = %video.title, "video metadata retrieved");
                Ok(video)
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    video_id = %self.video_id,
                    fetcher = self.fetcher.name(),
                    error = %e,
                    "video metadata retrieval failed"
                );
                Err(Failure::from_fetch_error(e, &self.language))
            }
            Err(_) => {
                tracing::error!(
                    video_id = %self.video_id,
                    fetcher = self.fetcher.name(),
                    "collaborator panicked"
                );
                Err(Failure::new(ErrorKind::UnexpectedResponse, &self.language)
                    .with_source("metadata collaborator panicked"))
            }
        }
    }
}

/// Owns the callback of a spawned operation until it settles
///
/// Dropped without settling while still active (the runtime shut down before or
/// during the collaborator call), it delivers an `UnexpectedResponse` failure
/// whose source is [`Error::Runtime`].
struct DeliveryGuard<F>
where
    F: FnOnce(Result<Video, Failure>) + Send + 'static,
{
    handle: OperationHandle,
    dispatcher: Arc<dyn Dispatcher>,
    language: Arc<str>,
    on_complete: Option<F>,
}

impl<F> DeliveryGuard<F>
where
    F: FnOnce(Result<Video, Failure>) + Send + 'static,
{
    fn settle(mut self, outcome: Result<Video, Failure>) {
        if let Some(on_complete) = self.on_complete.take() {
            deliver(self.handle.clone(), self.dispatcher.as_ref(), outcome, on_complete);
        }
    }
}

impl<F> Drop for DeliveryGuard<F>
where
    F: FnOnce(Result<Video, Failure>) + Send + 'static,
{
    fn drop(&mut self) {
        let Some(on_complete) = self.on_complete.take() else {
            return;
        };
        if self.handle.is_finished() {
            return;
        }

        tracing::warn!(
            video_id = ?self.handle.shared.video_id,
            "operation dropped by its runtime before settling"
        );
        let failure = Failure::new(ErrorKind::UnexpectedResponse, &self.language).with_source(
            Error::Runtime("background runtime shut down before the operation settled".into()),
        );
        deliver(self.handle.clone(), self.dispatcher.as_ref(), Err(failure), on_complete);
    }
}

/// Hand an outcome to the main context, gated on the operation still being active
///
/// The compare-and-swap runs inside the dispatched job, right before the
/// callback, so a cancel that lands while the job is queued still suppresses it.
pub(crate) fn deliver<F>(
    handle: OperationHandle,
    dispatcher: &dyn Dispatcher,
    outcome: Result<Video, Failure>,
    on_complete: F,
) where
    F: FnOnce(Result<Video, Failure>) + Send + 'static,
{
    dispatcher.dispatch(Box::new(move || {
        if handle.try_complete() {
            on_complete(outcome);
        } else {
            tracing::debug!(
                video_id = ?handle.shared.video_id,
                "operation cancelled before delivery, dropping outcome"
            );
        }
    }));
}
