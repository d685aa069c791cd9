//! Async client for the calendar CMS HTTP interface.
//!
//! Three endpoint groups: the public event feed (`agenda/events.cgi`),
//! the scheduling login (`agenda/planung/calendar.cgi`), and the
//! recording upload (`agenda/planung/audio-recordings.cgi`). The feed
//! needs no authentication; login yields a [`Session`] cookie that every
//! upload must carry.

pub mod calendar;
pub mod error;
pub mod transport;

pub use calendar::{CalendarClient, RemoteEvent, Session, decode_events};
pub use error::Error;
pub use transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
