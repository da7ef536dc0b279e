//! libcurl transport (easy interface).
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

use curl::easy::{Easy, List};
use std::time::Duration;

use super::headers::parse_head;
use super::{is_file_url, RawResponse, Transport, TransportRequest};
use crate::config::FetchConfig;
use crate::error::{TransportError, TransportErrorKind};

/// Blocking HTTP(S)/file transport. Certificate verification is off: the
/// fetcher tolerates self-signed and broken TLS.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    max_redirects: u32,
}

impl CurlTransport {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout(),
            max_redirects: config.max_redirects,
        }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

impl Transport for CurlTransport {
    fn execute(&self, request: &TransportRequest<'_>) -> Result<RawResponse, TransportError> {
        check_scheme(request.url, request.allow_file)?;

        let mut easy = Easy::new();
        easy.url(request.url)?;
        easy.follow_location(true)?;
        // Advertise and transparently decode every content coding libcurl supports.
        easy.accept_encoding("")?;
        easy.max_redirections(self.max_redirects)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(request.timeout)?;
        easy.ssl_verify_peer(false)?;
        easy.ssl_verify_host(false)?;
        // An empty proxy string disables libcurl's own environment lookup.
        easy.proxy(request.proxies.for_url(request.url).unwrap_or(""))?;
        set_method(&mut easy, request.method, request.body)?;

        let mut list = List::new();
        for (k, v) in request.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !request.headers.is_empty() {
            easy.http_headers(list)?;
        }

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                header_lines.push(String::from_utf8_lossy(data).trim_end().to_string());
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let head = parse_head(&header_lines);
        let mut status_code = easy.response_code()?;
        if status_code == 0 && is_file_url(request.url) {
            status_code = 200;
        }
        tracing::debug!(
            url = request.url,
            method = request.method,
            status_code,
            bytes = body.len(),
            "request completed"
        );

        Ok(RawResponse {
            status_code,
            headers: head.headers,
            body,
        })
    }
}

/// Only http(s), plus file when enabled, have a handler.
fn check_scheme(url: &str, allow_file: bool) -> Result<(), TransportError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| TransportError::new(TransportErrorKind::InvalidUrl, format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        "file" if allow_file => Ok(()),
        "file" => Err(TransportError::new(
            TransportErrorKind::UnsupportedScheme,
            "file:// access is disabled (set ALLOW_FILE_URI to enable)",
        )),
        other => Err(TransportError::new(
            TransportErrorKind::UnsupportedScheme,
            format!("no handler for {other}:// URLs"),
        )),
    }
}

fn set_method(easy: &mut Easy, method: &str, body: Option<&[u8]>) -> Result<(), curl::Error> {
    let method = method.trim().to_ascii_uppercase();
    match method.as_str() {
        "" | "GET" => easy.get(true)?,
        "HEAD" => {
            easy.nobody(true)?;
            return Ok(());
        }
        "POST" => easy.post(true)?,
        other => easy.custom_request(other)?,
    }
    match body {
        Some(data) => {
            easy.post_fields_copy(data)?;
            // Setting a body switches libcurl to POST; keep the requested verb.
            if method != "POST" {
                easy.custom_request(if method.is_empty() { "GET" } else { method.as_str() })?;
            }
        }
        None if method == "POST" => easy.post_field_size(0)?,
        None => {}
    }
    Ok(())
}
