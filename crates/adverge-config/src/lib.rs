//! Shared configuration for the adverge CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `adverge_core::PlatformConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use adverge_api::{Credentials, DEFAULT_ENDPOINT};
use adverge_core::PlatformConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {credential} configured for profile '{profile}'")]
    NoCredentials {
        profile: String,
        credential: &'static str,
    },

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

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

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
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
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Read-cache TTL in seconds; 0 caches for the run's lifetime.
    #[serde(default)]
    pub cache_ttl: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            cache_ttl: 0,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named account profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Customer id of the operating account (digits only).
    pub customer_id: String,

    /// Manager account id, sent as login-customer-id when present.
    pub login_customer_id: Option<String>,

    /// API endpoint root override.
    pub endpoint: Option<String>,

    /// Developer token (plaintext — prefer keyring or env var).
    pub developer_token: Option<String>,

    /// Environment variable name containing the developer token.
    pub developer_token_env: Option<String>,

    /// OAuth access token (plaintext — prefer keyring or env var).
    pub access_token: Option<String>,

    /// Environment variable name containing the access token.
    pub access_token_env: Option<String>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override read-cache TTL (seconds).
    pub cache_ttl: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "adverge", "adverge").map_or_else(
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
    p.push("adverge");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("ADVERGE_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Pick a profile by explicit name, falling back to the default.
pub fn select_profile<'a>(
    config: &'a Config,
    name: Option<&str>,
) -> Result<(&'a str, &'a Profile), ConfigError> {
    let name = name
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .ok_or_else(|| ConfigError::UnknownProfile("<none>".into()))?;
    config
        .profiles
        .get_key_value(name.as_str())
        .map(|(k, v)| (k.as_str(), v))
        .ok_or(ConfigError::UnknownProfile(name))
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

// ── Credential resolution ───────────────────────────────────────────

/// Resolve one secret from the credential chain:
/// env var named in the profile, then keyring, then plaintext.
fn resolve_secret(
    env_name: Option<&str>,
    keyring_key: &str,
    plaintext: Option<&str>,
    profile_name: &str,
    credential: &'static str,
) -> Result<SecretString, ConfigError> {
    if let Some(env_name) = env_name {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new("adverge", &format!("{profile_name}/{keyring_key}")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(value) = plaintext {
        return Ok(SecretString::from(value.to_owned()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
        credential,
    })
}

/// Resolve the developer token for a profile.
pub fn resolve_developer_token(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_secret(
        profile.developer_token_env.as_deref(),
        "developer-token",
        profile.developer_token.as_deref(),
        profile_name,
        "developer token",
    )
}

/// Resolve the OAuth access token for a profile.
pub fn resolve_access_token(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_secret(
        profile.access_token_env.as_deref(),
        "access-token",
        profile.access_token.as_deref(),
        profile_name,
        "access token",
    )
}

/// Build a `PlatformConfig` from a profile, applying global defaults.
pub fn profile_to_platform_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<PlatformConfig, ConfigError> {
    if profile.customer_id.is_empty() || !profile.customer_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::Validation {
            field: "customer_id".into(),
            reason: format!("expected digits, got '{}'", profile.customer_id),
        });
    }

    let endpoint = profile.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
    let endpoint: url::Url = endpoint.parse().map_err(|_| ConfigError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {endpoint}"),
    })?;

    let credentials = Credentials {
        developer_token: resolve_developer_token(profile, profile_name)?,
        access_token: resolve_access_token(profile, profile_name)?,
        login_customer_id: profile.login_customer_id.clone(),
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    let cache_ttl = match profile.cache_ttl.unwrap_or(defaults.cache_ttl) {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    Ok(PlatformConfig {
        endpoint,
        credentials,
        timeout,
        cache_ttl,
    })
}
