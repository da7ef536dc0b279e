//! Fetch of a single URL and the policies applied to its response.
//!
//! Order of checks: charset resolution (text mode only), zero-byte body,
//! status code, then checksum substitution for binary mode.

use crate::checksum::ChecksumAlgorithm;
use crate::config::FetchConfig;
use crate::encoding::{decode_body, CharsetDetector};
use crate::error::FetchError;
use crate::proxy::ProxyMap;
use crate::request::{FetchRequest, RequestBody};
use crate::result::{FetchedResource, ResourceOutcome};
use crate::transport::{is_file_url, RawResponse, Transport, TransportRequest};

/// Fetches one URL through a [`Transport`] and classifies the response.
pub struct ResourceFetcher<T, D> {
    transport: T,
    detector: D,
    allow_file_uri: bool,
    checksum: ChecksumAlgorithm,
}

impl<T: Transport, D: CharsetDetector> ResourceFetcher<T, D> {
    pub fn new(transport: T, detector: D, config: &FetchConfig) -> Self {
        Self {
            transport,
            detector,
            allow_file_uri: config.allow_file_uri,
            checksum: config.binary_checksum,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Fetch `url` using the method, headers, body, timeout and policies of `request`.
    pub fn fetch(&self, url: &str, request: &FetchRequest, proxies: &ProxyMap) -> ResourceOutcome {
        if self.allow_file_uri && is_file_url(url) {
            tracing::debug!("file access enabled, reading {}", url);
        }

        let transport_request = TransportRequest {
            url,
            method: &request.method,
            headers: &request.headers,
            body: request.body.as_ref().map(RequestBody::as_bytes),
            timeout: request.effective_timeout(),
            proxies,
            allow_file: self.allow_file_uri,
        };
        let RawResponse {
            status_code,
            headers,
            body,
        } = self
            .transport
            .execute(&transport_request)
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        // Detection over binary payloads is slow and pointless.
        let text = if request.is_binary {
            None
        } else {
            Some(decode_body(&body, headers.content_type(), &self.detector))
        };

        if body.is_empty() {
            if !request.empty_pages_are_a_change {
                tracing::debug!("empty content returned for {}", url);
                return Err(FetchError::EmptyReply {
                    url: url.to_string(),
                    status_code,
                });
            }
            tracing::debug!(
                "{} gave a zero byte reply with status {}, accepted because empty pages are a change",
                url,
                status_code
            );
        }

        if status_code != 200 && !request.ignore_status_codes {
            let page_html = text.unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(FetchError::Non200ErrorCodeReceived {
                url: url.to_string(),
                status_code,
                page_html,
            });
        }

        let text = match text {
            Some(text) => text,
            None => self.checksum.hex_digest(&body),
        };

        Ok(FetchedResource {
            url: url.to_string(),
            status_code,
            headers,
            text,
            raw: body,
        })
    }
}
