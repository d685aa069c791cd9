// ── Calendar wire types ──

use serde::Deserialize;

/// One scheduled event row from the feed.
///
/// Only the series key and the event id are consumed; the feed carries
/// many more fields per event, all ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteEvent {
    /// Series key — matched against the keys of the local series config.
    pub skey: String,
    /// Remote identifier of this scheduled occurrence.
    pub event_id: i64,
}

/// Response body of `agenda/events.cgi`.
#[derive(Debug, Deserialize)]
pub(crate) struct EventFeed {
    pub events: Vec<RemoteEvent>,
}

/// Session credential issued by a successful login.
///
/// A single name/value cookie pair, attached as a `Cookie` header to
/// every upload request. Lives until the next login or process exit;
/// never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    name: String,
    value: String,
}

impl Session {
    pub(crate) fn new(name: String, value: String) -> Self {
        Self { name, value }
    }

    /// The cookie name (useful for logging; the value is not exposed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the `Cookie` header value for authenticated requests.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}
