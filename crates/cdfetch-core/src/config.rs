use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::checksum::ChecksumAlgorithm;
use crate::proxy::SystemProxies;

/// Global configuration loaded from `~/.config/cdfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Honor `file://` URLs. Off by default so a network-facing target cannot read local files.
    pub allow_file_uri: bool,
    /// System-wide proxy for `http://` URLs.
    pub http_proxy: Option<String>,
    /// System-wide proxy for `https://` URLs.
    pub https_proxy: Option<String>,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirects: u32,
    /// Fetch the URLs of a composite target concurrently.
    pub parallel: bool,
    /// Digest used as content for binary fetches.
    pub binary_checksum: ChecksumAlgorithm,
    /// Request timeout used by the CLI when none is given.
    pub default_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            allow_file_uri: false,
            http_proxy: None,
            https_proxy: None,
            connect_timeout_secs: 15,
            max_redirects: 10,
            parallel: true,
            binary_checksum: ChecksumAlgorithm::Md5,
            default_timeout_secs: 45,
        }
    }
}

impl FetchConfig {
    pub fn system_proxies(&self) -> SystemProxies {
        SystemProxies {
            http: self.http_proxy.clone(),
            https: self.https_proxy.clone(),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    /// Apply `ALLOW_FILE_URI`, `HTTP_PROXY` and `HTTPS_PROXY` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production).
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("ALLOW_FILE_URI") {
            match parse_bool(&raw) {
                Some(v) => self.allow_file_uri = v,
                None => tracing::warn!("ignoring ALLOW_FILE_URI={:?}: not a boolean", raw),
            }
        }
        if let Some(p) = lookup("HTTP_PROXY").filter(|p| !p.trim().is_empty()) {
            self.http_proxy = Some(p);
        }
        if let Some(p) = lookup("HTTPS_PROXY").filter(|p| !p.trim().is_empty()) {
            self.https_proxy = Some(p);
        }
        self
    }
}

/// Parse the usual truthy/falsy strings (`yes`, `on`, `1`, `false`, ...).
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Environment overrides are applied on top.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg.with_env_overrides());
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg.with_env_overrides())
}
