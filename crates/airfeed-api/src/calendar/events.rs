// Event feed endpoint
//
// The feed is the only unauthenticated call: a single GET returning all
// events in a date window. Retrieval and decoding are separate steps so
// a parse failure is distinguishable from a transport failure.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::client::CalendarClient;
use crate::calendar::models::{EventFeed, RemoteEvent};
use crate::error::Error;

/// Wire format for the feed's date parameters.
const DATE_FMT: &str = "%Y-%m-%d";

impl CalendarClient {
    /// Retrieve the raw event feed for an inclusive date window.
    ///
    /// `GET agenda/events.cgi?from_date={from}&from_time=00:00&till_date={till}&till_time=23:55&template={template}`
    ///
    /// The window covers `from` 00:00 through `till` 23:55, so the end
    /// date is inclusive. The full response in one page is assumed.
    /// Returns the unparsed body; decode with [`decode_events`].
    pub async fn fetch_events_raw(
        &self,
        from: NaiveDate,
        till: NaiveDate,
        template: &str,
    ) -> Result<Vec<u8>, Error> {
        let mut url = self.endpoint_url("agenda/events.cgi")?;
        url.query_pairs_mut()
            .append_pair("from_date", &from.format(DATE_FMT).to_string())
            .append_pair("from_time", "00:00")
            .append_pair("till_date", &till.format(DATE_FMT).to_string())
            .append_pair("till_time", "23:55")
            .append_pair("template", template);

        debug!(%from, %till, template, "fetching event feed");
        self.get_raw(url).await
    }

    /// Fetch and decode the event feed in one step.
    pub async fn fetch_events(
        &self,
        from: NaiveDate,
        till: NaiveDate,
        template: &str,
    ) -> Result<Vec<RemoteEvent>, Error> {
        let body = self.fetch_events_raw(from, till, template).await?;
        decode_events(&body)
    }
}

/// Decode a feed body into its event list.
///
/// The body is an object wrapping the list: `{"events": [...]}`. Events
/// carry many fields; only `skey` and `event_id` are kept.
pub fn decode_events(body: &[u8]) -> Result<Vec<RemoteEvent>, Error> {
    let feed: EventFeed = serde_json::from_slice(body).map_err(|e| {
        let body = String::from_utf8_lossy(body).into_owned();
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })?;
    Ok(feed.events)
}
