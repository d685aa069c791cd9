// Calendar CMS HTTP client
//
// Wraps `reqwest::Client` with calendar-specific URL construction and
// status checking. The endpoint groups (events, auth, upload) are
// implemented as inherent methods via separate files to keep this
// module focused on transport mechanics.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// HTTP client for the calendar CMS.
///
/// Owns the shared `reqwest::Client` (connection pool, timeout) and the
/// host base URL. All endpoint paths live under `agenda/` on the host
/// root; see the endpoint modules for the individual request shapes.
pub struct CalendarClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CalendarClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the calendar host root (e.g.
    /// `https://schedule.example.org`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The underlying HTTP client.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The calendar host base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an endpoint path under the host root.
    ///
    /// Normalizes trailing slashes so `agenda/events.cgi` lands directly
    /// under the host regardless of how the base URL was configured.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helper ───────────────────────────────────────────────

    /// Send a GET request and return the raw body after status checking.
    pub(crate) async fn get_raw(&self, url: Url) -> Result<Vec<u8>, Error> {
        debug!("GET {}", url.path());

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let resp = check_status(resp)?;

        Ok(resp.bytes().await.map_err(Error::Transport)?.to_vec())
    }
}

/// Reject any non-success HTTP status before the body is consumed.
pub(crate) fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(Error::RemoteStatus {
            status: status.as_u16(),
        })
    }
}
