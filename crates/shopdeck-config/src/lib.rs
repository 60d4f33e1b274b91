//! Shared configuration for the shopdeck dashboard.
//!
//! TOML profiles plus `SHOPDECK_`-prefixed environment overrides, and
//! translation to `shopdeck_core::GatewayConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopdeck_core::GatewayConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no gateway configured for profile '{profile}'")]
    NoGateway { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration for the dashboard.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named gateway profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    5
}

/// A named gateway profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Gateway base URL (e.g., "http://localhost:8080").
    pub gateway: String,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override poll interval (seconds, 0 disables).
    pub poll_interval: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "shopdeck", "shopdeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("shopdeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit file path + environment.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHOPDECK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `GatewayConfig` from a profile, applying global defaults.
pub fn profile_to_gateway_config(
    config: &Config,
    profile: &Profile,
) -> Result<GatewayConfig, ConfigError> {
    let url: url::Url = profile
        .gateway
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "gateway".into(),
            reason: format!("invalid URL: {}", profile.gateway),
        })?;

    Ok(GatewayConfig {
        url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(config.defaults.timeout)),
        danger_accept_invalid_certs: profile.insecure.unwrap_or(config.defaults.insecure),
        poll_interval_secs: profile
            .poll_interval
            .unwrap_or(config.defaults.poll_interval),
    })
}

/// Resolve the default profile into a `GatewayConfig`.
pub fn default_gateway_config(config: &Config) -> Result<GatewayConfig, ConfigError> {
    let profile_name = config.default_profile.as_deref().unwrap_or("default");
    let profile = config
        .profiles
        .get(profile_name)
        .ok_or_else(|| ConfigError::NoGateway {
            profile: profile_name.into(),
        })?;
    profile_to_gateway_config(config, profile)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config_from(std::path::Path::new("/nonexistent/shopdeck.toml")).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.timeout, 30);
        assert_eq!(config.defaults.poll_interval, 5);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn profile_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
default_profile = "local"

[defaults]
timeout = 10

[profiles.local]
gateway = "http://localhost:8080"
poll_interval = 2
"#
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        let gateway = default_gateway_config(&config).unwrap();

        assert_eq!(gateway.url.as_str(), "http://localhost:8080/");
        assert_eq!(gateway.timeout, Duration::from_secs(10));
        assert_eq!(gateway.poll_interval_secs, 2);
        assert!(!gateway.danger_accept_invalid_certs);
    }

    #[test]
    fn bad_gateway_url_is_a_validation_error() {
        let config = Config::default();
        let profile = Profile {
            gateway: "not a url".into(),
            insecure: None,
            timeout: None,
            poll_interval: None,
        };
        let err = profile_to_gateway_config(&config, &profile).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn unknown_default_profile_is_reported() {
        let config = Config::default();
        let err = default_gateway_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::NoGateway { .. }));
    }
}
