//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::defaults::{
    default_allowed_addresses, default_ban_tiers, default_listen, default_queue_size,
    default_timeout_secs, default_true,
};

/// Environment variable overriding `server.listen`.
pub const ENV_LISTEN: &str = "MIKRODENY_LISTEN";
/// Environment variable overriding `telegram.base_url` (it embeds the bot token).
pub const ENV_TELEGRAM_BASE_URL: &str = "MIKRODENY_TELEGRAM_BASE_URL";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {name} override: {value}")]
    Env { name: &'static str, value: String },
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Principals allowed to call `/ipaddress`.
    #[serde(default)]
    pub users: Vec<AuthorizedUser>,
    /// Addresses exempt from ban accounting.
    #[serde(default)]
    pub allow_list: AllowListConfig,
    /// Offense-count to ban-duration tiers.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Chat bot transport. Absent disables notifications.
    pub telegram: Option<TelegramConfig>,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Split out from [`Config::load`]
    /// so tests don't have to touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_LISTEN) {
            self.server.listen = value.parse().map_err(|_| ConfigError::Env {
                name: ENV_LISTEN,
                value,
            })?;
        }

        if let Some(value) = lookup(ENV_TELEGRAM_BASE_URL) {
            match self.telegram.as_mut() {
                Some(telegram) => telegram.base_url = value,
                None => self.telegram = Some(TelegramConfig::with_base_url(value)),
            }
        }

        Ok(())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address (default: 0.0.0.0:8080).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Log output format (default: text).
    #[serde(default)]
    pub log_format: LogFormat,
    /// Serve Prometheus metrics on `/metrics` (default: true).
    #[serde(default = "default_true")]
    pub metrics: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            log_format: LogFormat::default(),
            metrics: true,
        }
    }
}

/// A principal allowed to call the ingestion and query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizedUser {
    /// Display name, used in logs only.
    pub name: String,
    /// Credential presented in the `userid` request header.
    pub key: String,
}

/// Static allow-list configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowListConfig {
    /// Exempt addresses in canonical string form.
    #[serde(default = "default_allowed_addresses")]
    pub addresses: Vec<String>,
}

impl Default for AllowListConfig {
    fn default() -> Self {
        Self {
            addresses: default_allowed_addresses(),
        }
    }
}

/// Ban policy configuration.
///
/// Tiers may be listed in any order; the highest matching threshold wins.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_ban_tiers")]
    pub tiers: Vec<BanTierConfig>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            tiers: default_ban_tiers(),
        }
    }
}

/// One tier: counts at or above `min_count` earn `ban_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BanTierConfig {
    pub min_count: u32,
    pub ban_minutes: u32,
}

/// Telegram bot transport configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API base URL including the token, e.g. `https://api.telegram.org/bot<token>`.
    pub base_url: String,
    /// Chat that receives a report after every ingestion batch (optional).
    pub report_chat_id: Option<i64>,
    /// Outbound message queue capacity (default: 64).
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TelegramConfig {
    fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            report_chat_id: None,
            queue_size: default_queue_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
