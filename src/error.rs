//! Error types for yt-info
//!
//! Two layers of errors live here:
//! - [`Error`]: construction-time failures (configuration, runtime setup, HTTP client),
//!   returned directly from constructors
//! - [`Failure`]: the outcome of a retrieval that did not produce a video, delivered
//!   through the completion callback and tagged with a stable [`ErrorKind`]
//!
//! [`FetchError`] is the collaborator-facing error. It is always translated into a
//! [`Failure`] before it reaches a caller.

use crate::locale;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for yt-info construction and configuration
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed underlying cause attached to a [`Failure`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for yt-info
///
/// These errors are only ever returned synchronously, while building a client or
/// validating configuration. Retrieval outcomes use [`Failure`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "http.endpoint")
        key: Option<String>,
    },

    /// I/O error (runtime or main context thread creation)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The main context is not usable
    #[error("main context error: {0}")]
    MainContext(String),

    /// The runtime running an operation went away before it settled
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Stable, locale-independent classification of a retrieval failure
///
/// The variants and their [`code`](ErrorKind::code) strings never change with the
/// client language, so callers can branch on them programmatically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The video identifier is absent, empty or structurally malformed
    InvalidIdentifier,
    /// The collaborator could not reach the remote service
    NetworkError,
    /// The remote service reports the video as unavailable
    NoStreamAvailable,
    /// The remote service refuses to serve the video (restricted, private, ...)
    RemoteRejected,
    /// The remote response could not be interpreted
    UnexpectedResponse,
}

impl ErrorKind {
    /// All failure kinds, in declaration order
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::InvalidIdentifier,
        ErrorKind::NetworkError,
        ErrorKind::NoStreamAvailable,
        ErrorKind::RemoteRejected,
        ErrorKind::UnexpectedResponse,
    ];

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidIdentifier => "invalid_identifier",
            ErrorKind::NetworkError => "network_error",
            ErrorKind::NoStreamAvailable => "no_stream_available",
            ErrorKind::RemoteRejected => "remote_rejected",
            ErrorKind::UnexpectedResponse => "unexpected_response",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors reported by a [`MetadataFetcher`](crate::fetcher::MetadataFetcher)
///
/// These describe what went wrong from the collaborator's point of view. The
/// client maps each of them onto an [`ErrorKind`] with [`FetchError::kind`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, timeout, reset)
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote service reports the video as missing or without any stream
    #[error("video unavailable: {reason}")]
    Unavailable {
        /// Reason given by the remote service
        reason: String,
    },

    /// The remote service refuses to serve the video
    #[error("video restricted: {reason}")]
    Restricted {
        /// Reason given by the remote service
        reason: String,
    },

    /// The remote service answered with a status the collaborator does not handle
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be decoded
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The collaborator cannot perform metadata retrieval at all
    #[error("not supported: {0}")]
    Unsupported(String),
}

impl FetchError {
    /// Classify this collaborator error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport(_) => ErrorKind::NetworkError,
            FetchError::Unavailable { .. } => ErrorKind::NoStreamAvailable,
            FetchError::Restricted { .. } => ErrorKind::RemoteRejected,
            FetchError::UnexpectedStatus { .. }
            | FetchError::Malformed(_)
            | FetchError::Unsupported(_) => ErrorKind::UnexpectedResponse,
        }
    }
}

/// A retrieval that did not produce a video
///
/// Carries a stable [`ErrorKind`], a message rendered in the client's language and,
/// when available, the underlying cause (reachable via
/// [`std::error::Error::source`]).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Failure {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl Failure {
    /// Create a failure whose message is rendered in `language`
    pub fn new(kind: ErrorKind, language: &str) -> Self {
        Self {
            kind,
            message: locale::message(kind, language).to_string(),
            source: None,
        }
    }

    /// Translate a collaborator error, keeping it as the underlying cause
    pub fn from_fetch_error(error: FetchError, language: &str) -> Self {
        Self::new(error.kind(), language).with_source(error)
    }

    /// Attach an underlying cause
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The stable failure kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Machine-readable code of the failure kind
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Localized, human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_fetch_error_classification() {
        let cases = vec![
            (FetchError::Transport("reset".into()), ErrorKind::NetworkError),
            (
                FetchError::Unavailable {
                    reason: "Not Found".into(),
                },
                ErrorKind::NoStreamAvailable,
            ),
            (
                FetchError::Restricted {
                    reason: "Unauthorized".into(),
                },
                ErrorKind::RemoteRejected,
            ),
            (
                FetchError::UnexpectedStatus { status: 500 },
                ErrorKind::UnexpectedResponse,
            ),
            (
                FetchError::Malformed("missing title".into()),
                ErrorKind::UnexpectedResponse,
            ),
            (
                FetchError::Unsupported("noop".into()),
                ErrorKind::UnexpectedResponse,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.kind(), expected, "wrong kind for {:?}", error);
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = ErrorKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn test_kind_serializes_as_code() {
        for kind in ErrorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_failure_keeps_fetch_error_as_source() {
        let failure =
            Failure::from_fetch_error(FetchError::Transport("connection reset".into()), "en");

        assert_eq!(failure.kind(), ErrorKind::NetworkError);
        assert_eq!(failure.code(), "network_error");
        let source = failure.source().expect("source should be kept");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn test_failure_display_is_localized_message() {
        let en = Failure::new(ErrorKind::InvalidIdentifier, "en");
        let fr = Failure::new(ErrorKind::InvalidIdentifier, "fr");

        assert_eq!(en.to_string(), en.message());
        assert_ne!(en.message(), fr.message());
        assert_eq!(en.kind(), fr.kind());
        assert!(en.source().is_none());
    }

    #[test]
    fn test_config_error_display() {
        let error = Error::Config {
            message: "timeout must be greater than zero".into(),
            key: Some("http.timeout".into()),
        };
        assert_eq!(
            error.to_string(),
            "configuration error: timeout must be greater than zero"
        );
    }
}
