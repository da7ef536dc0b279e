//! `cdfetch fetch <target>` – fetch a target and print the result.

use anyhow::{Context, Result};
use cdfetch_core::{FetchConfig, FetchRequest, FetchResult, Fetcher};
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// URL to fetch, or several URLs joined with '|'.
    pub target: String,

    /// HTTP method.
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Request header, repeatable.
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body, sent as UTF-8.
    #[arg(short = 'd', long = "data")]
    pub data: Option<String>,

    /// Per-URL timeout in seconds (default from config).
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Accept any status code instead of only 200.
    #[arg(long)]
    pub ignore_status_codes: bool,

    /// Print a checksum of the body instead of its text.
    #[arg(long)]
    pub binary: bool,

    /// Treat a zero-byte reply as an empty page instead of an error.
    #[arg(long)]
    pub empty_is_change: bool,

    /// Proxy for every scheme, replacing the configured proxies.
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Print status line and headers before the content.
    #[arg(short = 'i', long)]
    pub include: bool,

    /// Print the result as JSON.
    #[arg(long, conflicts_with = "include")]
    pub json: bool,
}

impl FetchArgs {
    pub fn to_request(&self, cfg: &FetchConfig) -> FetchRequest {
        let timeout = self
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| cfg.default_timeout());
        let mut req = FetchRequest::new(&self.target)
            .with_method(&self.method)
            .with_timeout(timeout)
            .ignore_status_codes(self.ignore_status_codes)
            .binary(self.binary)
            .empty_pages_are_a_change(self.empty_is_change);
        for (name, value) in &self.headers {
            req = req.with_header(name, value);
        }
        if let Some(data) = &self.data {
            req = req.with_body(data.as_str());
        }
        if let Some(proxy) = &self.proxy {
            req = req.with_proxy_override(proxy);
        }
        req
    }
}

/// Parse `Name: value` into a header pair.
pub fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid header {s:?}: expected 'Name: value'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid header {s:?}: empty name"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

pub async fn run_fetch(cfg: &FetchConfig, args: FetchArgs) -> Result<()> {
    let request = args.to_request(cfg);
    let target = request.target.clone();
    let fetcher = Fetcher::new(cfg);

    let result = tokio::task::spawn_blocking(move || fetcher.fetch(&request))
        .await
        .context("fetch task failed")?
        .with_context(|| format!("fetching {}", target))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&render_json(&result))?);
    } else {
        print!("{}", render_text(&result, args.include));
    }
    Ok(())
}

pub(crate) fn render_text(result: &FetchResult, include: bool) -> String {
    let mut out = String::new();
    if include {
        out.push_str(&format!("status: {}\n", result.status_code));
        for (name, value) in &result.headers {
            out.push_str(&format!("{}: {}\n", name, value));
        }
        out.push('\n');
    }
    out.push_str(&result.content);
    if !result.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub(crate) fn render_json(result: &FetchResult) -> serde_json::Value {
    let headers: Vec<[&str; 2]> = result
        .headers
        .iter()
        .map(|(k, v)| [k.as_str(), v.as_str()])
        .collect();
    serde_json::json!({
        "status_code": result.status_code,
        "headers": headers,
        "content": result.content,
        "raw_length": result.raw_content.len(),
    })
}
