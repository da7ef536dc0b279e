//! Target-level fetching.
//!
//! A target is one URL or several joined with `|`. A single URL is fetched
//! and its outcome returned as-is. For several URLs each is fetched
//! independently (in parallel when configured); failures are logged and
//! collected without stopping the others, and the successes are merged by
//! [`reconcile`] in target order.

mod reconcile;
mod split;

pub use split::split_target;

use std::thread;

use crate::config::FetchConfig;
use crate::encoding::{ChardetngDetector, CharsetDetector};
use crate::error::FetchError;
use crate::proxy::{ProxyMap, SystemProxies};
use crate::request::FetchRequest;
use crate::result::{FetchResult, ResourceOutcome};
use crate::single::ResourceFetcher;
use crate::transport::{CurlTransport, Transport};

use reconcile::reconcile;

/// Fetches targets. Holds no per-call state; one instance can serve many calls.
pub struct Fetcher<T = CurlTransport, D = ChardetngDetector> {
    resources: ResourceFetcher<T, D>,
    system_proxies: SystemProxies,
    parallel: bool,
}

impl Fetcher {
    /// Fetcher using libcurl and chardetng.
    pub fn new(config: &FetchConfig) -> Self {
        Self::with_parts(config, CurlTransport::new(config), ChardetngDetector)
    }
}

impl<T: Transport, D: CharsetDetector> Fetcher<T, D> {
    pub fn with_parts(config: &FetchConfig, transport: T, detector: D) -> Self {
        Self {
            resources: ResourceFetcher::new(transport, detector, config),
            system_proxies: config.system_proxies(),
            parallel: config.parallel,
        }
    }

    pub fn resources(&self) -> &ResourceFetcher<T, D> {
        &self.resources
    }

    /// Fetch `request.target` and produce one result.
    pub fn fetch(&self, request: &FetchRequest) -> Result<FetchResult, FetchError> {
        let proxies = ProxyMap::resolve(request.proxy_override.as_deref(), &self.system_proxies);
        let urls = split_target(&request.target);

        match urls.as_slice() {
            [] => Err(FetchError::Validation(format!(
                "target {:?} contains no URLs",
                request.target
            ))),
            [url] => self
                .resources
                .fetch(url, request, &proxies)
                .map(FetchResult::from),
            _ => {
                if request.is_binary {
                    return Err(FetchError::Validation(
                        "multiple URLs do not support binary fetching".to_string(),
                    ));
                }
                let outcomes = self.fetch_each(&urls, request, &proxies);
                reconcile(outcomes, &urls)
            }
        }
    }

    /// Fetch every URL, returning outcomes in the order of `urls`.
    fn fetch_each(
        &self,
        urls: &[String],
        request: &FetchRequest,
        proxies: &ProxyMap,
    ) -> Vec<ResourceOutcome> {
        if !self.parallel {
            return urls
                .iter()
                .map(|url| self.resources.fetch(url, request, proxies))
                .collect();
        }
        thread::scope(|scope| {
            let handles: Vec<_> = urls
                .iter()
                .map(|url| scope.spawn(move || self.resources.fetch(url, request, proxies)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    }
}
