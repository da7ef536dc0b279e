//! Error types for fetching.
//!
//! `FetchError` is what callers see. `TransportError` describes failures
//! below the HTTP layer (DNS, connect, TLS, timeout) and is wrapped by
//! `FetchError::Transport` together with the URL that failed.

mod classify;

pub use classify::classify_curl_error;

use std::fmt;
use thiserror::Error;

/// Network-level failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Operation timed out (connect or total).
    Timeout,
    /// Connection refused, reset, or closed without a reply.
    Connection,
    /// Host or proxy name could not be resolved.
    Dns,
    /// TLS handshake failure.
    Tls,
    /// No handler for the URL scheme (includes `file://` while file access is disabled).
    UnsupportedScheme,
    /// The URL could not be parsed.
    InvalidUrl,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connection => "connection error",
            TransportErrorKind::Dns => "name resolution failed",
            TransportErrorKind::Tls => "TLS error",
            TransportErrorKind::UnsupportedScheme => "unsupported scheme",
            TransportErrorKind::InvalidUrl => "invalid URL",
            TransportErrorKind::Other => "transport error",
        };
        f.write_str(s)
    }
}

/// Failure reported by a `Transport` before an HTTP response was obtained.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::new(classify_curl_error(&e), e.to_string())
    }
}

/// Error returned by a fetch, either for one resource or for a whole target.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The call itself is malformed (e.g. binary mode on a composite target).
    #[error("{0}")]
    Validation(String),

    /// Zero-byte reply while empty pages are not treated as a change.
    #[error("{url} returned an empty reply (HTTP {status_code})")]
    EmptyReply { url: String, status_code: u32 },

    /// Status other than 200 while status codes are not ignored.
    #[error("{url} returned HTTP {status_code}")]
    Non200ErrorCodeReceived {
        url: String,
        status_code: u32,
        page_html: String,
    },

    /// A later resource of a composite target disagrees with the master's Content-Type.
    #[error(
        "content-type mismatch: {conflicting_url} is {new_content_type:?} but {master_url} is {master_content_type:?}"
    )]
    ContentTypeMismatch {
        master_url: String,
        conflicting_url: String,
        master_content_type: String,
        new_content_type: String,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    /// Every URL of a composite target yielded no content and no error was recorded.
    #[error("all {} URLs returned no content", .urls.len())]
    AllSourcesFailed { urls: Vec<String> },
}

impl FetchError {
    /// URL the error refers to, when it concerns a single resource.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::EmptyReply { url, .. }
            | FetchError::Non200ErrorCodeReceived { url, .. }
            | FetchError::Transport { url, .. } => Some(url.as_str()),
            FetchError::ContentTypeMismatch {
                conflicting_url, ..
            } => Some(conflicting_url.as_str()),
            FetchError::Validation(_) | FetchError::AllSourcesFailed { .. } => None,
        }
    }

    /// Status code carried by the error, if an HTTP response was received.
    pub fn status_code(&self) -> Option<u32> {
        match self {
            FetchError::EmptyReply { status_code, .. }
            | FetchError::Non200ErrorCodeReceived { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
