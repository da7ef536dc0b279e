//! Outbound proxy selection.
//!
//! A per-request override wins for every scheme; otherwise the system-wide
//! HTTP and HTTPS proxies apply to their own scheme only.

use serde::{Deserialize, Serialize};

/// Process-wide proxy addresses (from config or `HTTP_PROXY`/`HTTPS_PROXY`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemProxies {
    pub http: Option<String>,
    pub https: Option<String>,
}

/// Proxy to use per URL scheme for one fetch. All `None` means direct connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyMap {
    pub http: Option<String>,
    pub https: Option<String>,
    pub ftp: Option<String>,
}

impl ProxyMap {
    /// Build the mapping for one fetch. Empty strings count as unset.
    pub fn resolve(proxy_override: Option<&str>, system: &SystemProxies) -> Self {
        if let Some(p) = non_empty(proxy_override) {
            return Self {
                http: Some(p.to_string()),
                https: Some(p.to_string()),
                ftp: Some(p.to_string()),
            };
        }
        Self {
            http: non_empty(system.http.as_deref()).map(str::to_string),
            https: non_empty(system.https.as_deref()).map(str::to_string),
            ftp: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none() && self.ftp.is_none()
    }

    /// Proxy for a scheme (`http`, `https`, `ftp`), case-insensitive.
    pub fn for_scheme(&self, scheme: &str) -> Option<&str> {
        let entry = if scheme.eq_ignore_ascii_case("http") {
            &self.http
        } else if scheme.eq_ignore_ascii_case("https") {
            &self.https
        } else if scheme.eq_ignore_ascii_case("ftp") {
            &self.ftp
        } else {
            return None;
        };
        entry.as_deref()
    }

    /// Proxy for the scheme of `url`; `None` for unparsable URLs.
    pub fn for_url(&self, url: &str) -> Option<&str> {
        let parsed = url::Url::parse(url).ok()?;
        self.for_scheme(parsed.scheme())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
