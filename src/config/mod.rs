use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Canto tenant connection settings
///
/// The API is reached at `https://{domain}.{api_host}` with a bearer
/// token. Both the domain and the token must be present before any
/// upstream call is attempted; their absence is a configuration error,
/// never a transient fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CantoConfig {
    /// Tenant subdomain, e.g. `acme` for `acme.canto.com`
    #[serde(default)]
    pub domain: String,
    /// API host suffix appended to the domain
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// OAuth bearer token for the tenant
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base URL used when constructing thumbnail-proxy and
    /// placeholder links handed back to browsers
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for resolved asset records, humantime format
    #[serde(default = "default_cache_ttl")]
    pub ttl: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canto: CantoConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_api_host() -> String {
    "canto.com".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8085
}

fn default_base_url() -> String {
    "http://localhost:8085".to_string()
}

fn default_cache_ttl() -> String {
    "1h".to_string()
}

impl Default for CantoConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            api_host: default_api_host(),
            token: String::new(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: default_base_url(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: default_cache_ttl(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canto: CantoConfig::default(),
            web: WebConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl CantoConfig {
    /// Both domain and token are required for upstream calls
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty() && !self.token.is_empty()
    }

    /// Ordered, user-facing configuration problems
    pub fn config_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.domain.is_empty() {
            errors.push("Canto domain not configured".to_string());
        }
        if self.token.is_empty() {
            errors.push("Canto API token not configured".to_string());
        }
        errors
    }
}

impl CacheConfig {
    /// Parse the configured TTL, e.g. "1h" or "90s"
    pub fn ttl_duration(&self) -> Result<Duration> {
        humantime::parse_duration(&self.ttl)
            .map_err(|e| anyhow::anyhow!("invalid cache.ttl '{}': {}", self.ttl, e))
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}
