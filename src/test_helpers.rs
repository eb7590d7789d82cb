//! Shared test helpers: a scripted collaborator and fixtures.

use crate::config::FetchOptions;
use crate::error::FetchError;
use crate::fetcher::MetadataFetcher;
use crate::types::{Video, VideoId};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::ThreadId;
use tokio::sync::{Notify, Semaphore};

/// A well-formed identifier
pub(crate) const VALID_ID: &str = "dQw4w9WgXcQ";

pub(crate) fn video_id() -> VideoId {
    VideoId::parse(VALID_ID).unwrap()
}

pub(crate) fn test_video() -> Video {
    Video::new(video_id(), "Never Gonna Give You Up")
}

enum Script {
    Succeed,
    Fail(Box<dyn Fn() -> FetchError + Send + Sync>),
    Panic,
}

/// Collaborator whose behaviour is fixed at construction
///
/// When gated, every call blocks until [`ScriptedFetcher::release`] adds a permit.
pub(crate) struct ScriptedFetcher {
    script: Script,
    gate: Option<Semaphore>,
    calls: AtomicUsize,
    completions: AtomicUsize,
    started: Notify,
    dropped: Notify,
    completion_threads: Mutex<Vec<ThreadId>>,
}

impl ScriptedFetcher {
    fn with_script(script: Script, gated: bool) -> Self {
        Self {
            script,
            gate: gated.then(|| Semaphore::new(0)),
            calls: AtomicUsize::new(0),
            completions: AtomicUsize::new(0),
            started: Notify::new(),
            dropped: Notify::new(),
            completion_threads: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn succeeding() -> Self {
        Self::with_script(Script::Succeed, false)
    }

    pub(crate) fn failing<F>(error: F) -> Self
    where
        F: Fn() -> FetchError + Send + Sync + 'static,
    {
        Self::with_script(Script::Fail(Box::new(error)), false)
    }

    pub(crate) fn panicking() -> Self {
        Self::with_script(Script::Panic, false)
    }

    /// Succeeds, but only once released
    pub(crate) fn gated() -> Self {
        Self::with_script(Script::Succeed, true)
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }

    pub(crate) fn completion_threads(&self) -> Vec<ThreadId> {
        self.completion_threads.lock().unwrap().clone()
    }

    pub(crate) async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Resolves once a call future has been dropped, completed or not
    pub(crate) async fn wait_dropped(&self) {
        self.dropped.notified().await;
    }
}

struct DropSignal<'a>(&'a Notify);

impl Drop for DropSignal<'_> {
    fn drop(&mut self) {
        self.0.notify_one();
    }
}

#[async_trait]
impl MetadataFetcher for ScriptedFetcher {
    async fn fetch_metadata(
        &self,
        id: &VideoId,
        _options: &FetchOptions,
    ) -> Result<Video, FetchError> {
        let _signal = DropSignal(&self.dropped);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.completions.fetch_add(1, Ordering::SeqCst);
        self.completion_threads
            .lock()
            .unwrap()
            .push(std::thread::current().id());

        match &self.script {
            Script::Succeed => Ok(Video::new(id.clone(), "Never Gonna Give You Up")),
            Script::Fail(error) => Err(error()),
            Script::Panic => panic!("scripted collaborator panic"),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
