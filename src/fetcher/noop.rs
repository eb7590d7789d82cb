//! No-op collaborator for clients without network access

use super::traits::MetadataFetcher;
use crate::config::FetchOptions;
use crate::error::FetchError;
use crate::types::{Video, VideoId};
use async_trait::async_trait;

/// Collaborator that never retrieves anything
///
/// Never selected automatically: a host injects it through
/// [`ClientBuilder::fetcher`](crate::ClientBuilder::fetcher) to disable network
/// access. Every call fails with [`FetchError::Unsupported`], which callers observe as
/// [`ErrorKind::UnexpectedResponse`](crate::ErrorKind::UnexpectedResponse).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpFetcher;

#[async_trait]
impl MetadataFetcher for NoOpFetcher {
    async fn fetch_metadata(
        &self,
        _id: &VideoId,
        _options: &FetchOptions,
    ) -> Result<Video, FetchError> {
        Err(FetchError::Unsupported(
            "metadata retrieval requires a network collaborator. \
             Build the client with an HttpFetcher or a custom MetadataFetcher."
                .into(),
        ))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
