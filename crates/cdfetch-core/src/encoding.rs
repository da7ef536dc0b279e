//! Text decoding for response bodies.
//!
//! A charset declared in `Content-Type` is trusted as-is. Otherwise the body
//! is run through a [`CharsetDetector`]; if that yields nothing the body is
//! decoded as UTF-8.

use encoding_rs::{Encoding, UTF_8};

/// Best-effort statistical charset detection.
pub trait CharsetDetector: Send + Sync {
    /// Guess the encoding of `bytes`, or `None` when there is nothing to go on.
    fn detect(&self, bytes: &[u8]) -> Option<&'static Encoding>;
}

/// Detector backed by `chardetng` (the Firefox detector).
#[derive(Debug, Clone, Copy, Default)]
pub struct ChardetngDetector;

impl CharsetDetector for ChardetngDetector {
    fn detect(&self, bytes: &[u8]) -> Option<&'static Encoding> {
        if bytes.is_empty() {
            return None;
        }
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(bytes, true);
        Some(detector.guess(None, true))
    }
}

/// Charset label from a `Content-Type` value, e.g. `text/html; charset="utf-8"` -> `utf-8`.
pub fn declared_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then_some(value)
    })
}

/// True when the header carries an explicit charset parameter.
pub fn has_declared_charset(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("charset=")
}

/// Pick the encoding for a body: declared charset first, then detection, then UTF-8.
pub fn resolve_encoding<D>(body: &[u8], content_type: &str, detector: &D) -> &'static Encoding
where
    D: CharsetDetector + ?Sized,
{
    if has_declared_charset(content_type) {
        return declared_charset(content_type)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
    }
    match detector.detect(body) {
        Some(encoding) => {
            tracing::debug!("no declared charset, detected {}", encoding.name());
            encoding
        }
        None => UTF_8,
    }
}

/// Decode `body` using [`resolve_encoding`]. Malformed sequences become U+FFFD.
pub fn decode_body<D>(body: &[u8], content_type: &str, detector: &D) -> String
where
    D: CharsetDetector + ?Sized,
{
    let encoding = resolve_encoding(body, content_type, detector);
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}
