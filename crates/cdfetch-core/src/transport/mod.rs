//! HTTP transport seam.
//!
//! The fetch policy (status, empty body, charset, checksums) lives above this
//! trait; implementations only move bytes. [`CurlTransport`] is the libcurl
//! implementation; tests substitute scripted transports.

mod easy;
mod headers;

pub use easy::CurlTransport;
pub use headers::ResponseHeaders;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::TransportError;
use crate::proxy::ProxyMap;

/// One outgoing request.
#[derive(Debug, Clone, Copy)]
pub struct TransportRequest<'a> {
    pub url: &'a str,
    pub method: &'a str,
    pub headers: &'a HashMap<String, String>,
    pub body: Option<&'a [u8]>,
    pub timeout: Duration,
    pub proxies: &'a ProxyMap,
    /// Whether `file://` URLs may be read.
    pub allow_file: bool,
}

/// Final response of a request, after redirects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u32,
    pub headers: ResponseHeaders,
    pub body: Vec<u8>,
}

/// Executes a single request. Implementations must be shareable across the
/// threads that fetch the URLs of a composite target.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &TransportRequest<'_>) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &TransportRequest<'_>) -> Result<RawResponse, TransportError> {
        (**self).execute(request)
    }
}

/// True for `file://` URLs (scheme compared case-insensitively).
pub fn is_file_url(url: &str) -> bool {
    url.get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("file://"))
}
