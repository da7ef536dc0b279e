//! Fetch parameters supplied by the caller.

use std::collections::HashMap;
use std::time::Duration;

/// Request body: text is sent as its UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Text(String),
    Bytes(Vec<u8>),
}

impl RequestBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RequestBody::Text(s) => s.as_bytes(),
            RequestBody::Bytes(b) => b,
        }
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::Text(s)
    }
}

impl From<&str> for RequestBody {
    fn from(s: &str) -> Self {
        RequestBody::Text(s.to_string())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(b: Vec<u8>) -> Self {
        RequestBody::Bytes(b)
    }
}

/// Shortest per-URL timeout handed to the transport. libcurl treats zero as "wait forever".
pub const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Everything needed to fetch one target. Immutable for the duration of a fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// One URL, or several joined with `|`.
    pub target: String,
    /// Per-URL timeout. Values below [`MIN_TIMEOUT`] are raised to it.
    pub timeout: Duration,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
    /// Accept any status code, not just 200.
    pub ignore_status_codes: bool,
    /// Report a checksum of the body instead of decoded text.
    pub is_binary: bool,
    /// A zero-byte reply is a valid (empty) page rather than an error.
    pub empty_pages_are_a_change: bool,
    /// Proxy for every scheme, replacing the system proxies.
    pub proxy_override: Option<String>,
}

impl FetchRequest {
    /// GET `target` with a 45 second timeout and default policies.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            timeout: Duration::from_secs(45),
            method: "GET".to_string(),
            headers: HashMap::new(),
            body: None,
            ignore_status_codes: false,
            is_binary: false,
            empty_pages_are_a_change: false,
            proxy_override: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout actually given to the transport.
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.max(MIN_TIMEOUT)
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set a header, replacing any existing one whose name differs only in case.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn ignore_status_codes(mut self, yes: bool) -> Self {
        self.ignore_status_codes = yes;
        self
    }

    pub fn binary(mut self, yes: bool) -> Self {
        self.is_binary = yes;
        self
    }

    pub fn empty_pages_are_a_change(mut self, yes: bool) -> Self {
        self.empty_pages_are_a_change = yes;
        self
    }

    pub fn with_proxy_override(mut self, proxy: impl Into<String>) -> Self {
        self.proxy_override = Some(proxy.into());
        self
    }
}
