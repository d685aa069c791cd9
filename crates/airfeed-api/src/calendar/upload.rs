// Recording upload endpoint
//
// One multipart POST per event. The file is read fully before any
// network activity, so an unreadable file fails locally without
// touching the transport.

use std::path::Path;

use reqwest::header;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::calendar::client::{CalendarClient, check_status};
use crate::calendar::models::Session;
use crate::error::Error;

impl CalendarClient {
    /// Upload one recording for one event.
    ///
    /// `POST agenda/planung/audio-recordings.cgi` with multipart fields
    /// `project_id=1`, `studio_id=1`, `series_id`, `event_id`,
    /// `action=upload`, and the file bytes under the `upload` part named
    /// after the file's base name. The session cookie authenticates the
    /// request.
    pub async fn upload_recording(
        &self,
        event_id: i64,
        series_id: i64,
        file: &Path,
        session: &Session,
    ) -> Result<(), Error> {
        let contents = tokio::fs::read(file).await.map_err(|source| Error::File {
            path: file.to_path_buf(),
            source,
        })?;

        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::File {
                path: file.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no file name",
                ),
            })?;

        let form = Form::new()
            .text("project_id", "1")
            .text("studio_id", "1")
            .text("series_id", series_id.to_string())
            .text("event_id", event_id.to_string())
            .text("action", "upload")
            .part("upload", Part::bytes(contents).file_name(file_name));

        let url = self.endpoint_url("agenda/planung/audio-recordings.cgi")?;
        debug!(event_id, series_id, "POST {}", url.path());

        let resp = self
            .http()
            .post(url)
            .header(header::COOKIE, session.cookie_header())
            .multipart(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        check_status(resp)?;
        Ok(())
    }
}
