//! Fetch engine for change detection.
//!
//! A target names one URL or several joined with `|`. [`Fetcher::fetch`]
//! retrieves each, applies the status/empty-body/charset policies, checks
//! that multi-URL targets agree on Content-Type, and returns one
//! [`FetchResult`].

pub mod aggregate;
pub mod checksum;
pub mod config;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod proxy;
pub mod request;
pub mod result;
pub mod single;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{split_target, Fetcher};
pub use config::FetchConfig;
pub use error::{FetchError, TransportError, TransportErrorKind};
pub use proxy::{ProxyMap, SystemProxies};
pub use request::{FetchRequest, RequestBody};
pub use result::{FetchResult, FetchedResource, ResourceOutcome};
pub use transport::{CurlTransport, ResponseHeaders, Transport};
