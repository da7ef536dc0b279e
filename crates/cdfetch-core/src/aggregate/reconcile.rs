//! Merge per-URL outcomes of a composite target.
//!
//! Outcomes are folded in target order. The first success becomes the master;
//! later successes must carry the master's exact Content-Type to be merged.

use crate::error::FetchError;
use crate::result::{FetchResult, ResourceOutcome};
use crate::transport::ResponseHeaders;

/// Baseline established by the first successful URL.
#[derive(Debug)]
struct Master {
    url: String,
    status_code: u32,
    headers: ResponseHeaders,
    content_type: String,
}

#[derive(Debug, Default)]
pub(crate) struct Reconciled {
    master: Option<Master>,
    parts: Vec<String>,
    pub(crate) errors: Vec<FetchError>,
}

impl Reconciled {
    fn accept(&mut self, outcome: ResourceOutcome) {
        let resource = match outcome {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(url = e.url().unwrap_or(""), "failed to fetch URL: {}", e);
                self.errors.push(e);
                return;
            }
        };

        match &self.master {
            None => {
                self.master = Some(Master {
                    url: resource.url,
                    status_code: resource.status_code,
                    content_type: resource.headers.content_type().to_string(),
                    headers: resource.headers,
                });
            }
            Some(master) => {
                let new_content_type = resource.content_type();
                if new_content_type != master.content_type {
                    let e = FetchError::ContentTypeMismatch {
                        master_url: master.url.clone(),
                        conflicting_url: resource.url.clone(),
                        master_content_type: master.content_type.clone(),
                        new_content_type: new_content_type.to_string(),
                    };
                    tracing::warn!(url = resource.url.as_str(), "failed to fetch URL: {}", e);
                    self.errors.push(e);
                    return;
                }
            }
        }
        self.parts.push(resource.text);
    }

    /// Merged result, or the first recorded error when nothing was usable.
    pub(crate) fn finish(self, urls: &[String]) -> Result<FetchResult, FetchError> {
        let Reconciled {
            master,
            parts,
            errors,
        } = self;
        let master = match master {
            Some(m) if !parts.is_empty() => m,
            _ => {
                return Err(errors
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| FetchError::AllSourcesFailed {
                        urls: urls.to_vec(),
                    }))
            }
        };
        if !errors.is_empty() {
            tracing::info!(
                "{} of {} URLs failed; merged content from the rest",
                errors.len(),
                urls.len()
            );
        }
        let content = parts.join("\n");
        let raw_content = content.clone().into_bytes();
        Ok(FetchResult {
            status_code: master.status_code,
            headers: master.headers,
            content,
            raw_content,
        })
    }
}

/// Fold ordered outcomes into one result.
pub(crate) fn reconcile<I>(outcomes: I, urls: &[String]) -> Result<FetchResult, FetchError>
where
    I: IntoIterator<Item = ResourceOutcome>,
{
    let mut state = Reconciled::default();
    for outcome in outcomes {
        state.accept(outcome);
    }
    state.finish(urls)
}
