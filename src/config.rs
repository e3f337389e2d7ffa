//! Spray configuration.
//!
//! Settings are layered, lowest priority first:
//!
//! 1. Built-in defaults ([`SprayConfig::default`])
//! 2. An optional YAML file (`--config`)
//! 3. Environment variables and command-line flags (applied by the CLI)
//!
//! Durations are humantime strings such as `500ms` or `2s`.
//!
//! ```yaml
//! host: 127.0.0.1
//! port: 8080
//! rounds: 5000
//! seed: 1234
//! timeout: 250ms
//! delay: 0s
//! persistent: true
//! workers: 4
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::transmit::CampaignConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Target plus per-campaign settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprayConfig {
    pub host: String,
    pub port: u16,
    /// Independent campaigns run side by side. Worker `i` uses seed
    /// `seed + i`.
    pub workers: usize,
    pub campaign: CampaignConfig,
}

impl Default for SprayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: 1,
            campaign: CampaignConfig::default(),
        }
    }
}

/// On-disk shape; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSprayConfig {
    host: Option<String>,
    port: Option<u16>,
    rounds: Option<u64>,
    seed: Option<u64>,
    timeout: Option<String>,
    delay: Option<String>,
    persistent: Option<bool>,
    verbose: Option<bool>,
    workers: Option<usize>,
}

impl SprayConfig {
    /// Defaults, overlaid with the file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded spray config");
        Self::from_yaml(&contents)
    }

    /// Defaults overlaid with a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawSprayConfig = if contents.trim().is_empty() {
            RawSprayConfig::default()
        } else {
            serde_yml::from_str(contents)?
        };

        let mut config = Self::default();
        if let Some(host) = raw.host {
            config.host = host;
        }
        if let Some(port) = raw.port {
            config.port = port;
        }
        if let Some(workers) = raw.workers {
            config.workers = workers;
        }
        if let Some(rounds) = raw.rounds {
            config.campaign.rounds = rounds;
        }
        if raw.seed.is_some() {
            config.campaign.seed = raw.seed;
        }
        if let Some(timeout) = raw.timeout {
            config.campaign.timeout = parse_duration(&timeout)?;
        }
        if let Some(delay) = raw.delay {
            config.campaign.delay = parse_duration(&delay)?;
        }
        if let Some(persistent) = raw.persistent {
            config.campaign.persistent = persistent;
        }
        if let Some(verbose) = raw.verbose {
            config.campaign.verbose = verbose;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }

    /// Campaign settings for worker `index`.
    pub fn worker_campaign(&self, index: usize) -> CampaignConfig {
        let mut campaign = self.campaign.clone();
        campaign.seed = campaign.seed.map(|seed| seed.wrapping_add(index as u64));
        campaign
    }
}

/// Parse a humantime duration (`250ms`, `1s`, `1m 30s`).
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|source| ConfigError::Duration {
        value: value.to_string(),
        source,
    })
}
