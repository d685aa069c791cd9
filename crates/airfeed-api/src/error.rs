use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `airfeed-api` crate.
///
/// Covers every failure mode of the three calendar endpoints: transport,
/// remote status, response decoding, authentication, and local file
/// access. `airfeed-core` maps these into per-upload outcomes.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login did not yield a usable session (bad credentials, or the
    /// response carried zero or several cookies instead of exactly one).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction error (malformed base URL or path).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Remote status ───────────────────────────────────────────────
    /// The remote answered with a non-success HTTP status. No retry is
    /// attempted; the status is carried for reporting.
    #[error("Remote returned HTTP {status}")]
    RemoteStatus { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body does not decode as the expected event feed,
    /// with the raw body kept for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Local files ─────────────────────────────────────────────────
    /// A file destined for upload could not be opened or read.
    #[error("Cannot read upload file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if this error means no valid session exists and
    /// the remaining uploads of the batch segment must be skipped.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for connection-level failures (as opposed to the
    /// remote actively rejecting the request).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Extract the HTTP status, if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status } => Some(*status),
            _ => None,
        }
    }
}
