//! Execution contexts for completion callbacks
//!
//! Collaborator work completes on whichever runtime worker happened to poll it.
//! Callbacks must not: every completion is handed to a [`Dispatcher`], which runs
//! it on the context the host treats as its main one.
//!
//! Two dispatchers are provided:
//!
//! - [`MainContext`]: a single serial queue drained by a [`MainLoop`], either on a
//!   thread the host owns or on a dedicated thread ([`MainContext::spawn`])
//! - [`InlineDispatcher`]: runs jobs immediately on the calling thread, for
//!   deterministic tests

use crate::error::{Error, Result};
use std::cell::Cell;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Unit of work scheduled on an execution context
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Entry point for scheduling callbacks on a designated execution context
pub trait Dispatcher: Send + Sync {
    /// Schedule `job` to run on this context
    ///
    /// Implementations must not drop jobs silently while the context is alive.
    fn dispatch(&self, job: Job);

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    // Identifier of the main context whose job is running on this thread
    static CURRENT_CONTEXT: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Serial callback queue acting as the designated main context
///
/// Cloning yields another sender into the same queue.
#[derive(Clone, Debug)]
pub struct MainContext {
    id: u64,
    tx: mpsc::UnboundedSender<Job>,
}

/// Receiving side of a [`MainContext`]
///
/// Whatever thread drives the loop becomes the main context.
#[derive(Debug)]
pub struct MainLoop {
    id: u64,
    rx: mpsc::UnboundedReceiver<Job>,
}

impl MainContext {
    /// Create a main context and the loop that drives it
    pub fn new() -> (Self, MainLoop) {
        let id = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { id, tx }, MainLoop { id, rx })
    }

    /// Create a main context driven by a dedicated, named thread
    ///
    /// The thread exits once every clone of the returned context is dropped.
    pub fn spawn(thread_name: &str) -> Result<Self> {
        let (context, main_loop) = Self::new();
        std::thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || main_loop.run())
            .map_err(|e| {
                Error::MainContext(format!(
                    "failed to start main context thread '{}': {}",
                    thread_name, e
                ))
            })?;

        tracing::debug!(thread = thread_name, context = context.id, "main context thread started");
        Ok(context)
    }

    /// Whether the caller is currently running inside this context
    pub fn is_current(&self) -> bool {
        CURRENT_CONTEXT.with(|current| current.get() == Some(self.id))
    }

    /// Whether the loop side has gone away
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Dispatcher for MainContext {
    fn dispatch(&self, job: Job) {
        if self.tx.send(job).is_err() {
            tracing::warn!(context = self.id, "main loop is gone, dropping callback");
        }
    }

    fn name(&self) -> &'static str {
        "main"
    }
}

impl MainLoop {
    /// Block the current thread, running jobs until every sender is dropped
    ///
    /// Must not be called from inside an asynchronous context; use
    /// [`MainLoop::run_async`] there.
    pub fn run(mut self) {
        while let Some(job) = self.rx.blocking_recv() {
            self.execute(job);
        }
        tracing::debug!(context = self.id, "main loop finished");
    }

    /// Run jobs as they arrive until every sender is dropped
    pub async fn run_async(mut self) {
        while let Some(job) = self.rx.recv().await {
            self.execute(job);
        }
        tracing::debug!(context = self.id, "main loop finished");
    }

    /// Run every job that is already queued, without waiting
    ///
    /// Returns the number of jobs executed.
    pub fn run_pending(&mut self) -> usize {
        let mut executed = 0;
        while let Ok(job) = self.rx.try_recv() {
            self.execute(job);
            executed += 1;
        }
        executed
    }

    fn execute(&self, job: Job) {
        let previous = CURRENT_CONTEXT.with(|current| current.replace(Some(self.id)));
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(job));
        CURRENT_CONTEXT.with(|current| current.set(previous));

        if outcome.is_err() {
            tracing::error!(context = self.id, "completion callback panicked");
        }
    }
}

/// Dispatcher running every job synchronously on the dispatching thread
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
    fn dispatch(&self, job: Job) {
        job();
    }

    fn name(&self) -> &'static str {
        "inline"
    }
}
