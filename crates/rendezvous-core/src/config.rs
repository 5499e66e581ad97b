//! Configuration system for the rendezvous server.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $RENDEZVOUS_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/rendezvous/config.toml
//!   3. ~/.config/rendezvous/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendezvousConfig {
    pub network: NetworkConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// HTTP listening port.
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Lifetime of a registration, reset on every re-registration.
    pub ttl_secs: u64,
    /// Background sweep cadence. 0 = sweep only when a new session registers.
    pub sweep_interval_secs: u64,
}

impl RegistryConfig {
    /// Capped at `MAX_TTL_SECS` so deadlines stay representable.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs.min(MAX_TTL_SECS))
    }

    /// `None` when the background sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.sweep_interval_secs.min(MAX_TTL_SECS)))
    }
}

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TTL_SECS: u64 = 25;
/// Longest accepted TTL or sweep interval: one year.
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

impl Default for RendezvousConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            sweep_interval_secs: 0,
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("rendezvous")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl RendezvousConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_file(&Self::file_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file, or defaults if it does not exist.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("RENDEZVOUS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        Self::write_default_to(&path)?;
        Ok(path)
    }

    fn write_default_to(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteFailed(path.to_path_buf(), e))?;
        }
        let text = toml::to_string_pretty(&RendezvousConfig::default())
            .map_err(ConfigError::SerializeFailed)?;
        std::fs::write(path, text).map_err(|e| ConfigError::WriteFailed(path.to_path_buf(), e))
    }

    /// Apply env var overrides. `lookup` resolves a variable name.
    ///
    /// Plain `PORT` is honoured first so the usual hosting convention works;
    /// the namespaced `RENDEZVOUS_NETWORK__PORT` wins when both are set.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(p) = lookup("PORT").and_then(|v| v.parse().ok()) {
            self.network.port = p;
        }
        if let Some(p) = lookup("RENDEZVOUS_NETWORK__PORT").and_then(|v| v.parse().ok()) {
            self.network.port = p;
        }
        if let Some(v) = lookup("RENDEZVOUS_NETWORK__BIND_ADDR") {
            self.network.bind_addr = v;
        }
        if let Some(s) = lookup("RENDEZVOUS_REGISTRY__TTL_SECS").and_then(|v| v.parse().ok()) {
            self.registry.ttl_secs = s;
        }
        if let Some(s) =
            lookup("RENDEZVOUS_REGISTRY__SWEEP_INTERVAL_SECS").and_then(|v| v.parse().ok())
        {
            self.registry.sweep_interval_secs = s;
        }
    }
}
