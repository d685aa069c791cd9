//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`/`ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use airfeed_config::ConfigError;
use airfeed_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    /// Some uploads failed; the run itself completed.
    pub const PARTIAL: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the calendar host at {url}")]
    #[diagnostic(
        code(airfeed::connection_failed),
        help(
            "Check that the host is reachable and the URL is correct.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("The calendar host answered HTTP {status}")]
    #[diagnostic(
        code(airfeed::remote_status),
        help("The remote rejected the request; nothing was retried.")
    )]
    RemoteStatus { status: u16 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Login failed for user '{user}'")]
    #[diagnostic(
        code(airfeed::auth_failed),
        help(
            "Verify the user and password for the scheduling interface.\n\
             The password is read from password_env, the system keyring\n\
             (service 'airfeed'), or the config file, in that order."
        )
    )]
    AuthFailed { user: String },

    #[error("No password configured for user '{user}'")]
    #[diagnostic(
        code(airfeed::no_password),
        help(
            "Set password_env in the [calendar] section, store the password\n\
             in the system keyring under service 'airfeed', or (discouraged)\n\
             put it in the config file."
        )
    )]
    NoPassword { user: String },

    // ── Feed data ────────────────────────────────────────────────────

    #[error("The event feed could not be decoded: {message}")]
    #[diagnostic(
        code(airfeed::feed_decode),
        help("Check that the configured template produces the JSON event feed.")
    )]
    FeedDecode { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(airfeed::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(airfeed::config))]
    Config(Box<figment::Error>),

    // ── Interactive / IO ─────────────────────────────────────────────

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::RemoteStatus { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoPassword { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoPassword { user } => Self::NoPassword { user },
            ConfigError::Figment(inner) => Self::Config(inner),
            ConfigError::Io(inner) => Self::Io(inner),
            ConfigError::Serialization(inner) => Self::Validation {
                field: "config".into(),
                reason: inner.to_string(),
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

/// Translate a workflow error, attributing transport failures to the
/// configured host URL.
pub fn map_core(err: CoreError, url: &url::Url, user: &str) -> CliError {
    match err {
        CoreError::InvalidDateRange { start, end } => CliError::Validation {
            field: "date range".into(),
            reason: format!("start {start} is after end {end}"),
        },
        CoreError::InvalidDuration { days } => CliError::Validation {
            field: "days".into(),
            reason: format!("{days} is not a usable window length"),
        },
        CoreError::Api(api) => match api {
            airfeed_api::Error::RemoteStatus { status } => CliError::RemoteStatus { status },
            airfeed_api::Error::Authentication { .. } => CliError::AuthFailed { user: user.into() },
            airfeed_api::Error::Deserialization { message, .. } => {
                CliError::FeedDecode { message }
            }
            other => CliError::ConnectionFailed {
                url: url.to_string(),
                source: other.into(),
            },
        },
    }
}
