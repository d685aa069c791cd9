// Shared transport configuration for building reqwest::Client instances.
//
// One client is built per run and reused across the feed query, login,
// and every upload, so connection pooling (reqwest's default keep-alive)
// applies to the whole workflow. Compression is handled transparently
// through the gzip/brotli features.

use std::time::Duration;

use crate::error::Error;

/// Default per-request timeout. Every calendar call blocks at most this
/// long before failing; there are no retries on top.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// TLS verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Accept any certificate (for self-signed calendar hosts).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("airfeed/", env!("CARGO_PKG_VERSION")));

        if self.tls == TlsMode::DangerAcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().map_err(Error::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_five_seconds() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.tls, TlsMode::System);
    }

    #[test]
    fn builds_a_client() {
        let config = TransportConfig {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(1),
        };
        assert!(config.build_client().is_ok());
    }
}
