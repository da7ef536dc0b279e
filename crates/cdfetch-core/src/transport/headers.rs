//! Response headers and parsing of raw header lines.

use std::slice;

/// Response headers in arrival order. Lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping earlier values with the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Raw `Content-Type` value, or "" when absent.
    pub fn content_type(&self) -> &str {
        self.get("content-type").unwrap_or("")
    }

    pub fn iter(&self) -> slice::Iter<'_, (String, String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = ResponseHeaders::new();
        for (k, v) in iter {
            headers.append(k, v);
        }
        headers
    }
}

impl<'a> IntoIterator for &'a ResponseHeaders {
    type Item = &'a (String, String);
    type IntoIter = slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Status line and headers of the last response in a header stream.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParsedHead {
    pub status_code: Option<u32>,
    pub headers: ResponseHeaders,
}

/// Parse header lines as delivered by curl's header callback. Each status
/// line starts a new block (redirect hops, `100 Continue`), so only the
/// final response's headers survive.
pub(crate) fn parse_head(lines: &[String]) -> ParsedHead {
    let mut head = ParsedHead::default();
    for line in lines {
        let line = line.trim_end();
        if line.starts_with("HTTP/") {
            head.status_code = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse().ok());
            head.headers = ResponseHeaders::new();
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            head.headers.append(name.trim(), value.trim());
        }
    }
    head
}
