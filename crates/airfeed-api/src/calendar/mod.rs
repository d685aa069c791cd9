// Calendar CMS endpoint groups: the public event feed, the scheduling
// login, and the recording upload.

mod auth;
mod client;
mod events;
mod models;
mod upload;

pub use client::CalendarClient;
pub use events::decode_events;
pub use models::{RemoteEvent, Session};
