//! Fetch outputs.

use crate::error::FetchError;
use crate::transport::ResponseHeaders;

/// One URL fetched successfully and accepted by the status/empty policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    pub url: String,
    pub status_code: u32,
    pub headers: ResponseHeaders,
    /// Decoded text, or the hex checksum of `raw` for binary fetches.
    pub text: String,
    pub raw: Vec<u8>,
}

impl FetchedResource {
    /// Raw `Content-Type` value, "" when absent.
    pub fn content_type(&self) -> &str {
        self.headers.content_type()
    }
}

/// Result of fetching one URL.
pub type ResourceOutcome = Result<FetchedResource, FetchError>;

/// Final result of fetching a target. `content` and `raw_content` are always
/// produced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// Status of the master (first successful) resource.
    pub status_code: u32,
    /// Headers of the master resource.
    pub headers: ResponseHeaders,
    /// Text content, newline-joined across URLs; a checksum for binary fetches.
    pub content: String,
    pub raw_content: Vec<u8>,
}

impl From<FetchedResource> for FetchResult {
    fn from(r: FetchedResource) -> Self {
        Self {
            status_code: r.status_code,
            headers: r.headers,
            content: r.text,
            raw_content: r.raw,
        }
    }
}

impl FetchResult {
    pub fn content_type(&self) -> &str {
        self.headers.content_type()
    }
}
