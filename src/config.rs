// src/config.rs

use crate::cli::Cli;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Upper bound on concurrent fetch workers
pub const MAX_CONCURRENCY: usize = 65_536;

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub follow_redirects: bool,
    #[serde(default)]
    pub show_urls: bool,
}

fn default_concurrency() -> usize { 10 }
fn default_timeout_secs() -> u64 { 5 }
fn default_log_level() -> String { "warn".to_string() }

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            follow_redirects: false,
            show_urls: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&contents)?;
        Ok(cfg)
    }
}

/// Effective settings for one run, after CLI flags are applied over the config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub follow_redirects: bool,
    pub show_urls: bool,
    pub log_level: String,
}

impl ScanSettings {
    /// Resolve settings with precedence: CLI flag > config file > default
    pub fn resolve(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let concurrency = cli.concurrency.unwrap_or(config.scan.concurrency);
        if concurrency == 0 || concurrency > MAX_CONCURRENCY {
            anyhow::bail!("concurrency must be between 1 and {}", MAX_CONCURRENCY);
        }

        Ok(Self {
            concurrency,
            timeout_secs: cli.timeout.unwrap_or(config.scan.timeout_secs),
            follow_redirects: cli.follow_redirects || config.scan.follow_redirects,
            show_urls: cli.show_urls || config.scan.show_urls,
            log_level: cli
                .log_level()
                .map(str::to_string)
                .unwrap_or_else(|| config.logging.level.clone()),
        })
    }

    /// Per-request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}
