use crate::catalog::{self, SerializationCandidate};
use crate::transport::{TransportOptions, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_REDIRECTS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration loaded from `~/.config/ontofetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Redirect hops followed per GET before giving up with a redirect loop.
    pub max_redirects: u32,
    /// Connect timeout per hop, in seconds.
    pub connect_timeout_secs: u64,
    /// Total deadline per hop (connect + transfer), in seconds.
    pub request_timeout_secs: u64,
    /// Largest 200 body accepted, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
    /// Optional `User-Agent` header; libcurl sends none by default.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional negotiation catalog; replaces the built-in one when present.
    #[serde(default)]
    pub serializations: Option<Vec<SerializationCandidate>>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: None,
            serializations: None,
        }
    }
}

fn default_max_body_bytes() -> u64 {
    DEFAULT_MAX_BODY_BYTES
}

impl FetchConfig {
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_body_bytes: self.max_body_bytes,
            user_agent: self.user_agent.clone(),
        }
    }

    /// Configured catalog, or the built-in one. An empty configured list is an error.
    pub fn catalog(&self) -> Result<Vec<SerializationCandidate>> {
        match &self.serializations {
            None => Ok(catalog::default_catalog()),
            Some(list) if list.is_empty() => {
                anyhow::bail!("config: `serializations` is empty; remove it or list at least one entry")
            }
            Some(list) => Ok(list.clone()),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ontofetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
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
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
