//! Configuration management for webcheckd.
//!
//! Loads settings from /etc/webcheck/config.toml or uses defaults.
//! `WEBCHECK_CONFIG` points at an explicit file, `PORT` overrides the port.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use webcheck_common::DEFAULT_PORT;

/// Config file path
pub const CONFIG_PATH: &str = "/etc/webcheck/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/webcheck/config.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "WEBCHECK_CONFIG";

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built front-end to serve; requests outside /api fall back to its index.html
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// Upstream validator services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Nu HTML validator endpoint (queried with `doc` and `out=json`)
    #[serde(default = "default_html_validator_url")]
    pub html_validator_url: String,

    /// W3C CSS validator endpoint (queried with `uri` and `output=json`)
    #[serde(default = "default_css_validator_url")]
    pub css_validator_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_html_validator_url() -> String {
    "https://validator.w3.org/nu/".to_string()
}

fn default_css_validator_url() -> String {
    "https://jigsaw.w3.org/css-validator/validator".to_string()
}

fn default_user_agent() -> String {
    "LocalValidator/1.0".to_string()
}

fn default_timeout() -> u64 {
    30 // the CSS validator is slow on large sheets
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            html_validator_url: default_html_validator_url(),
            css_validator_url: default_css_validator_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl Config {
    /// Load config from file, or return defaults, then apply env overrides
    pub fn load() -> Self {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from_path(&path).unwrap_or_else(|e| {
                warn!("Failed to load config from {}, using defaults: {:#}", path, e);
                Config::default()
            }),
            Err(_) => Self::load_from_path(CONFIG_PATH)
                .or_else(|_| Self::load_from_path(DEFAULT_CONFIG_PATH))
                .unwrap_or_else(|e| {
                    warn!("Config not found, using defaults: {:#}", e);
                    Config::default()
                }),
        };

        config.apply_port_override(std::env::var(PORT_ENV).ok());
        config
    }

    /// Load config from specific path
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply a `PORT` value; unparseable values are ignored
    pub fn apply_port_override(&mut self, value: Option<String>) {
        let Some(raw) = value else {
            return;
        };

        match raw.trim().parse::<u16>() {
            Ok(port) => self.server.port = port,
            Err(_) => warn!("Ignoring invalid {}={:?}", PORT_ENV, raw),
        }
    }

    /// Socket address to bind
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.bind_address, self.server.port);
        addr.parse()
            .with_context(|| format!("Invalid listen address {}", addr))
    }
}
