//! # yt-info
//!
//! Asynchronous, cancellable video metadata retrieval with localized failures.
//!
//! ## Design Philosophy
//!
//! yt-info is designed to be:
//! - **Non-blocking** - `retrieve` returns a handle immediately, work runs on a runtime
//! - **Main-context delivery** - Callbacks always run on one designated context
//! - **Cancellable** - A cancelled operation never invokes its callback
//! - **Localized** - Failure messages follow the client language; failure kinds never do
//!
//! ## Quick Start
//!
//! ```no_run
//! use yt_info::{Client, ErrorKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::default_client()?;
//!
//!     let operation = client.retrieve("dQw4w9WgXcQ", |result| match result {
//!         Ok(video) => println!("{} by {:?}", video.title, video.author),
//!         Err(failure) if failure.kind() == ErrorKind::RemoteRejected => {
//!             eprintln!("restricted: {}", failure)
//!         }
//!         Err(failure) => eprintln!("{}", failure),
//!     });
//!
//!     // Cancelling before delivery guarantees the callback never runs
//!     if operation.cancel() {
//!         println!("cancelled");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Client construction and retrieval entry points
pub mod client;
/// Configuration types
pub mod config;
/// Execution contexts for completion callbacks
pub mod dispatch;
/// Error types
pub mod error;
/// Metadata collaborators
pub mod fetcher;
/// Language detection and message catalog
pub mod locale;
/// Cancellable operations
pub mod operation;
/// Core types
pub mod types;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, FetchOptions, HttpConfig};
pub use dispatch::{Dispatcher, InlineDispatcher, MainContext, MainLoop};
pub use error::{Error, ErrorKind, Failure, FetchError, Result};
pub use fetcher::{HttpFetcher, MetadataFetcher, NoOpFetcher};
pub use operation::{OperationHandle, OperationState};
pub use types::{Video, VideoId};
