//! Application configuration.

use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Hosts accepted when `debug` is on and no allow-list is configured.
const DEBUG_DEFAULT_HOSTS: [&str; 3] = [".localhost", "127.0.0.1", "[::1]"];

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Site-level settings (debug flag, signing key, host allow-list, mail).
    #[serde(default)]
    pub site: SiteConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Mail delivery backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailBackend {
    /// Print outgoing mail to the log.
    Console,
    /// Deliver through an SMTP relay.
    #[default]
    Smtp,
}

/// Site-level settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Debug mode. Never enable in production.
    #[serde(default)]
    pub debug: bool,
    /// Secret signing key. Required when `debug` is off.
    #[serde(default)]
    pub secret_key: String,
    /// Hosts this site may be served under.
    ///
    /// `*` accepts any host; an entry with a leading dot (`.example.com`)
    /// accepts the domain and all of its subdomains.
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
    /// Mail delivery backend.
    #[serde(default)]
    pub email_backend: EmailBackend,
    /// Reverse proxies whose `X-Forwarded-For` and `X-Real-IP` headers are
    /// believed. Requests from any other peer are keyed by the peer address.
    #[serde(default)]
    pub trusted_proxies: Vec<IpAddr>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, exported into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `MOVIECAT_ENV`)
    /// 4. Environment variables with `MOVIECAT__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("MOVIECAT_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(env_source())
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings that are unsafe outside of debug mode.
    pub fn validate(&self) -> AppResult<()> {
        if self.site.debug {
            return Ok(());
        }
        if self.site.secret_key.trim().is_empty() {
            return Err(AppError::Config(
                "site.secret_key must be set when debug is off".to_string(),
            ));
        }
        if self.site.allowed_hosts.is_empty() {
            return Err(AppError::Config(
                "site.allowed_hosts must be set when debug is off".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("MOVIECAT")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("site.allowed_hosts")
        .with_list_parse_key("site.trusted_proxies")
        .try_parsing(true)
}

impl SiteConfig {
    /// Host patterns actually in force.
    #[must_use]
    pub fn effective_allowed_hosts(&self) -> Vec<String> {
        if self.allowed_hosts.is_empty() && self.debug {
            return DEBUG_DEFAULT_HOSTS.iter().map(ToString::to_string).collect();
        }
        self.allowed_hosts.clone()
    }

    /// Check a `Host` header value (port allowed) against the allow-list.
    #[must_use]
    pub fn is_host_allowed(&self, host_header: &str) -> bool {
        let host = strip_port(host_header).to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }
        let host = host.trim_end_matches('.');

        self.effective_allowed_hosts()
            .iter()
            .any(|pattern| host_matches(host, &pattern.to_ascii_lowercase()))
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:8000
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}

fn host_matches(host: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(domain) = pattern.strip_prefix('.') {
        return host == domain || host.ends_with(pattern);
    }
    host == pattern
}
