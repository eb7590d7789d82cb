//! Trait for video metadata collaborators

use crate::config::FetchOptions;
use crate::error::FetchError;
use crate::types::{Video, VideoId};
use async_trait::async_trait;

/// Trait for components that retrieve video metadata from a remote service
///
/// Implementations own the wire protocol and response decoding. They report
/// failures as [`FetchError`]; the client translates those into
/// [`Failure`](crate::Failure) values before anything reaches a caller.
///
/// A call may be abandoned at any await point: when an operation is cancelled
/// the client drops the returned future, which must abort any in-flight request.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use yt_info::config::FetchOptions;
/// use yt_info::fetcher::MetadataFetcher;
/// use yt_info::{FetchError, Video, VideoId};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl MetadataFetcher for Fixed {
///     async fn fetch_metadata(
///         &self,
///         id: &VideoId,
///         _options: &FetchOptions,
///     ) -> Result<Video, FetchError> {
///         Ok(Video::new(id.clone(), "fixed title"))
///     }
///
///     fn name(&self) -> &'static str {
///         "fixed"
///     }
/// }
/// ```
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Retrieve metadata for one video
    ///
    /// # Arguments
    ///
    /// * `id` - The validated video identifier
    /// * `options` - Per-call options (e.g. `use_cheat`)
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing a transport failure, a refusal or an
    /// undecodable response.
    async fn fetch_metadata(
        &self,
        id: &VideoId,
        options: &FetchOptions,
    ) -> Result<Video, FetchError>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
