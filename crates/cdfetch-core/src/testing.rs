//! Scripted collaborators for unit tests.

use encoding_rs::Encoding;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::encoding::CharsetDetector;
use crate::error::{TransportError, TransportErrorKind};
use crate::transport::{RawResponse, Transport, TransportRequest};

/// Detector returning a fixed answer and counting how often it was asked.
pub(crate) struct FixedDetector {
    answer: Option<&'static Encoding>,
    calls: AtomicUsize,
}

impl FixedDetector {
    pub(crate) fn new(answer: Option<&'static Encoding>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CharsetDetector for FixedDetector {
    fn detect(&self, _bytes: &[u8]) -> Option<&'static Encoding> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

/// What a `ScriptedTransport` was asked to do.
#[derive(Debug, Clone)]
pub(crate) struct SeenRequest {
    pub url: String,
    pub method: String,
    pub body: Option<Vec<u8>>,
    pub proxy: Option<String>,
    pub allow_file: bool,
    pub timeout: Duration,
}

/// Transport answering from a fixed URL -> response table. Unknown URLs fail
/// with a connection error.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: HashMap<String, Result<RawResponse, TransportError>>,
    delays: HashMap<String, Duration>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ok(
        mut self,
        url: &str,
        status_code: u32,
        content_type: Option<&str>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        let mut response = RawResponse {
            status_code,
            body: body.into(),
            ..RawResponse::default()
        };
        if let Some(ct) = content_type {
            response.headers.append("Content-Type", ct);
        }
        response.headers.append("X-Served-By", url);
        self.routes.insert(url.to_string(), Ok(response));
        self
    }

    pub(crate) fn fail(mut self, url: &str, kind: TransportErrorKind) -> Self {
        self.routes
            .insert(url.to_string(), Err(TransportError::new(kind, "scripted failure")));
        self
    }

    /// Hold the response for `url` back by `delay`.
    pub(crate) fn delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub(crate) fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &TransportRequest<'_>) -> Result<RawResponse, TransportError> {
        self.seen.lock().unwrap().push(SeenRequest {
            url: request.url.to_string(),
            method: request.method.to_string(),
            body: request.body.map(<[u8]>::to_vec),
            proxy: request.proxies.for_url(request.url).map(str::to_string),
            allow_file: request.allow_file,
            timeout: request.timeout,
        });
        if let Some(d) = self.delays.get(request.url) {
            std::thread::sleep(*d);
        }
        self.routes.get(request.url).cloned().unwrap_or_else(|| {
            Err(TransportError::new(
                TransportErrorKind::Connection,
                "connection refused",
            ))
        })
    }
}
