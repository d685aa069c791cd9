// ── Feed workflow ──
//
// The single context driving a run: refresh the event store from the
// feed, match the snapshot against the configured series, then upload
// one file per matched event with one login per series. All remote
// calls are awaited sequentially.

use std::path::PathBuf;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use airfeed_api::{CalendarClient, Error as ApiError};

use crate::error::CoreError;
use crate::range::DateRange;
use crate::series::SeriesSet;
use crate::store::EventStore;

/// Login credentials for the scheduling interface.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: SecretString,
}

/// Outcome of a single upload attempt.
#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded,
    /// The upload failed; the batch continued with the next event.
    Failed(ApiError),
    /// Skipped because the series' login failed and no session existed.
    SkippedNoSession,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Uploaded)
    }
}

/// One row of the upload report.
#[derive(Debug)]
pub struct UploadReport {
    pub series_key: String,
    pub event_id: i64,
    pub file: PathBuf,
    pub outcome: UploadOutcome,
}

/// Workflow context owning the client, the event store, and the series
/// runtime state. Created once per run.
pub struct Feeder {
    client: CalendarClient,
    store: EventStore,
    series: SeriesSet,
    template: String,
}

impl Feeder {
    pub fn new(client: CalendarClient, series: SeriesSet, template: impl Into<String>) -> Self {
        Self {
            client,
            store: EventStore::new(),
            series,
            template: template.into(),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    // ── Query phase ──────────────────────────────────────────────────

    /// Query the feed for the date window and replace the store
    /// snapshot. Returns the number of retrieved events.
    ///
    /// The store is written only after fetch AND decode both succeed; a
    /// failed query leaves the previous snapshot intact.
    pub async fn refresh_events(&self, range: DateRange) -> Result<usize, CoreError> {
        let body = self
            .client
            .fetch_events_raw(range.start(), range.end(), &self.template)
            .await?;
        let events = airfeed_api::decode_events(&body)?;

        let count = events.len();
        self.store.replace(events);
        info!(count, "event store refreshed");
        Ok(count)
    }

    // ── Match phase ──────────────────────────────────────────────────

    /// Match the stored snapshot against the configured series.
    /// Returns the total number of matched events.
    pub fn match_series(&mut self) -> usize {
        let snapshot = self.store.snapshot();
        self.series.match_snapshot(&snapshot);

        let matched = self.series.matched_count();
        info!(matched, series = self.series.len(), "matched events");
        matched
    }

    // ── Upload phase ─────────────────────────────────────────────────

    /// Upload the configured file for every matched event.
    ///
    /// One login per series. A login failure skips the remaining
    /// uploads of that series only; an individual upload failure is
    /// recorded and the batch continues. `on_attempt` fires after every
    /// attempt (progress reporting).
    pub async fn upload_all(
        &self,
        credentials: &Credentials,
        mut on_attempt: impl FnMut(&UploadReport),
    ) -> Vec<UploadReport> {
        let mut reports = Vec::with_capacity(self.series.matched_count());

        for (key, runtime) in self.series.iter() {
            if runtime.event_ids().is_empty() {
                debug!(series = key, "no matched events, nothing to upload");
                continue;
            }

            info!(
                series = key,
                matches = runtime.event_ids().len(),
                file = %runtime.file().display(),
                "uploading series"
            );

            let session = match self
                .client
                .login(&credentials.user, &credentials.password)
                .await
            {
                Ok(session) => session,
                Err(err) => {
                    warn!(series = key, error = %err, "login failed, skipping series");
                    for &event_id in runtime.event_ids() {
                        let report = UploadReport {
                            series_key: key.to_owned(),
                            event_id,
                            file: runtime.file().to_path_buf(),
                            outcome: UploadOutcome::SkippedNoSession,
                        };
                        on_attempt(&report);
                        reports.push(report);
                    }
                    continue;
                }
            };

            for &event_id in runtime.event_ids() {
                let outcome = match self
                    .client
                    .upload_recording(event_id, runtime.series_id(), runtime.file(), &session)
                    .await
                {
                    Ok(()) => {
                        debug!(series = key, event_id, "uploaded");
                        UploadOutcome::Uploaded
                    }
                    Err(err) => {
                        warn!(series = key, event_id, error = %err, "upload failed");
                        UploadOutcome::Failed(err)
                    }
                };
                let report = UploadReport {
                    series_key: key.to_owned(),
                    event_id,
                    file: runtime.file().to_path_buf(),
                    outcome,
                };
                on_attempt(&report);
                reports.push(report);
            }
        }

        reports
    }
}
