//! Classify curl errors into transport error kinds.

use super::TransportErrorKind;

/// Map a libcurl error to the transport failure it represents.
pub fn classify_curl_error(e: &curl::Error) -> TransportErrorKind {
    if e.is_operation_timedout() {
        return TransportErrorKind::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return TransportErrorKind::Dns;
    }
    if e.is_couldnt_connect()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportErrorKind::Connection;
    }
    if e.is_ssl_connect_error() || e.is_peer_failed_verification() || e.is_ssl_certproblem() {
        return TransportErrorKind::Tls;
    }
    if e.is_unsupported_protocol() {
        return TransportErrorKind::UnsupportedScheme;
    }
    if e.is_url_malformed() {
        return TransportErrorKind::InvalidUrl;
    }
    TransportErrorKind::Other
}
