//! Video metadata collaborators
//!
//! The client never talks to the network itself. It hands every valid request to
//! a [`MetadataFetcher`] and only manages cancellation and delivery around it.
//!
//! ## Architecture
//!
//! - [`HttpFetcher`]: queries an oEmbed endpoint over HTTP
//! - [`NoOpFetcher`]: stub for hosts that inject it explicitly to disable network access
//!
//! ## Usage
//!
//! ```no_run
//! use yt_info::config::{FetchOptions, HttpConfig};
//! use yt_info::fetcher::{HttpFetcher, MetadataFetcher};
//! use yt_info::VideoId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpFetcher::new(&HttpConfig::default())?;
//!     let id = VideoId::parse("dQw4w9WgXcQ").ok_or("invalid identifier")?;
//!
//!     let video = fetcher.fetch_metadata(&id, &FetchOptions::default()).await?;
//!     println!("{} by {:?}", video.title, video.author);
//!     Ok(())
//! }
//! ```

mod http;
mod noop;
mod oembed_types;
mod traits;

pub use http::HttpFetcher;
pub use noop::NoOpFetcher;
pub use traits::MetadataFetcher;
