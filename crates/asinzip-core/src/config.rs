use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Retry parameters (optional `[retry]` section). Absent = single-shot fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per image (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 8,
        }
    }
}

/// Operator defaults loaded from `~/.config/asinzip/config.toml`.
/// CLI flags override these per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsinzipConfig {
    /// Identifiers per ZIP archive.
    pub batch_size: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Image fetches in flight within one batch. 1 = strictly sequential.
    pub max_concurrent_fetches: usize,
    /// User-Agent sent with every image request.
    pub user_agent: String,
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for AsinzipConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent_fetches: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("asinzip")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AsinzipConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AsinzipConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: AsinzipConfig = toml::from_str(&data)?;
    Ok(cfg)
}
