//! Configuration for airfeed.
//!
//! TOML file + environment via figment, password resolution
//! (env var → keyring → plaintext), and translation of the `[series.*]`
//! tables into the core's `SeriesSet`. The binary adds flag overrides
//! on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

use airfeed_api::{TlsMode, TransportConfig};
use airfeed_core::SeriesSet;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for user '{user}'")]
    NoPassword { user: String },

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
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Calendar host and credentials.
    #[serde(default)]
    pub calendar: Calendar,

    /// Series keyed by the feed's series key, in file order.
    #[serde(default)]
    pub series: IndexMap<String, SeriesEntry>,
}

/// The `[calendar]` section.
#[derive(Debug, Deserialize, Serialize)]
pub struct Calendar {
    /// Calendar host base URL (e.g. "https://schedule.example.org").
    pub host: Option<String>,

    /// Login user for the scheduling interface.
    pub user: Option<String>,

    /// Password (plaintext — prefer password_env or the keyring).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Feed result template name.
    #[serde(default = "default_template")]
    pub template: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Query window length used when no duration is given.
    #[serde(default = "default_duration")]
    pub default_duration_days: u32,

    /// Upper bound for an entered duration.
    #[serde(default = "default_max_duration")]
    pub max_duration_days: u32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            host: None,
            user: None,
            password: None,
            password_env: None,
            template: default_template(),
            timeout_secs: default_timeout(),
            insecure: false,
            default_duration_days: default_duration(),
            max_duration_days: default_max_duration(),
        }
    }
}

fn default_template() -> String {
    "event.json-p".into()
}
fn default_timeout() -> u64 {
    5
}
fn default_duration() -> u32 {
    7
}
fn default_max_duration() -> u32 {
    30
}

/// One `[series.<key>]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeriesEntry {
    /// Local file uploaded for every matched event of this series.
    pub file: PathBuf,

    /// Remote series identifier.
    pub series_id: i64,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "airfeed", "airfeed").map_or_else(
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
    p.push("airfeed");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from a specific file + environment.
///
/// Environment variables use the `AIRFEED_` prefix with `__` as the
/// section separator (e.g. `AIRFEED_CALENDAR__HOST`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("AIRFEED_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
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

/// Resolve the login password for `user` from the credential chain.
pub fn resolve_password(calendar: &Calendar, user: &str) -> Result<SecretString, ConfigError> {
    // 1. Named env var
    if let Some(ref env_name) = calendar.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("airfeed", user) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = calendar.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoPassword { user: user.into() })
}

/// Resolve user + password, requiring a configured user.
pub fn resolve_credentials(calendar: &Calendar) -> Result<(String, SecretString), ConfigError> {
    let user = calendar
        .user
        .clone()
        .ok_or_else(|| ConfigError::Validation {
            field: "calendar.user".into(),
            reason: "no login user configured".into(),
        })?;
    let password = resolve_password(calendar, &user)?;
    Ok((user, password))
}

// ── Translation to core/api types ───────────────────────────────────

/// Parse and validate the configured host URL.
pub fn host_url(calendar: &Calendar) -> Result<Url, ConfigError> {
    let host = calendar.host.as_deref().ok_or_else(|| ConfigError::Validation {
        field: "calendar.host".into(),
        reason: "no calendar host configured".into(),
    })?;
    host.parse().map_err(|_| ConfigError::Validation {
        field: "calendar.host".into(),
        reason: format!("invalid URL: {host}"),
    })
}

/// Build the HTTP transport settings from the `[calendar]` section.
pub fn transport_config(calendar: &Calendar) -> TransportConfig {
    TransportConfig {
        tls: if calendar.insecure {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::System
        },
        timeout: Duration::from_secs(calendar.timeout_secs),
    }
}

/// Build the core `SeriesSet` from the `[series.*]` tables, preserving
/// file order.
pub fn series_set(config: &Config) -> SeriesSet {
    let mut set = SeriesSet::new();
    for (key, entry) in &config.series {
        set.insert(key.clone(), entry.series_id, entry.file.clone());
    }
    set
}

/// Clean configured series paths in place.
///
/// Paths that exist are canonicalized (resolving symlinks); a path that
/// is not readable yet only produces a warning — it fails its own
/// uploads later, not the run.
pub fn normalize_series_paths(config: &mut Config) {
    for (key, entry) in &mut config.series {
        match entry.file.canonicalize() {
            Ok(path) => entry.file = path,
            Err(err) => warn!(
                series = key.as_str(),
                file = %entry.file.display(),
                error = %err,
                "series file not readable at config load"
            ),
        }
    }
}
