//! Process-wide resources behind explicit initialization guards.
//!
//! Each cell is filled at most once. Initialization is serialized by its own
//! guard so a failed attempt can be retried and nested initializations never
//! wait on each other.

use super::Client;
use crate::dispatch::MainContext;
use crate::error::Result;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Name of the thread driving the shared main context
pub(crate) const MAIN_THREAD_NAME: &str = "yt-info-main";

static DEFAULT_CLIENT: OnceLock<Client> = OnceLock::new();
static DEFAULT_CLIENT_INIT: Mutex<()> = Mutex::new(());

static MAIN_CONTEXT: OnceLock<MainContext> = OnceLock::new();
static MAIN_CONTEXT_INIT: Mutex<()> = Mutex::new(());

static BACKGROUND_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
static BACKGROUND_RUNTIME_INIT: Mutex<()> = Mutex::new(());

fn get_or_try_init<T>(
    cell: &'static OnceLock<T>,
    guard: &Mutex<()>,
    init: impl FnOnce() -> Result<T>,
) -> Result<&'static T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }

    let _guard = guard.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(value) = cell.get() {
        return Ok(value);
    }

    let value = init()?;
    Ok(cell.get_or_init(|| value))
}

/// The shared client, created on first use
pub(crate) fn default_client() -> Result<Client> {
    get_or_try_init(&DEFAULT_CLIENT, &DEFAULT_CLIENT_INIT, || {
        tracing::info!("initializing default client");
        // Never capture a caller's runtime: it may be shut down before the process ends
        Client::builder()
            .runtime(background_runtime()?.handle().clone())
            .build()
    })
    .cloned()
}

/// The shared main context, driven by a dedicated thread
pub(crate) fn main_context() -> Result<&'static MainContext> {
    get_or_try_init(&MAIN_CONTEXT, &MAIN_CONTEXT_INIT, || {
        MainContext::spawn(MAIN_THREAD_NAME)
    })
}

/// The shared background runtime used when no runtime is current
pub(crate) fn background_runtime() -> Result<&'static tokio::runtime::Runtime> {
    get_or_try_init(&BACKGROUND_RUNTIME, &BACKGROUND_RUNTIME_INIT, || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("yt-info-worker")
            .enable_all()
            .build()?;
        tracing::debug!("background runtime started");
        Ok(runtime)
    })
}
