// ── Series matching ──
//
// Matches the stored snapshot against the configured series by key.
// Match lists follow snapshot order and keep duplicates: if the feed
// repeats an event, it is uploaded once per occurrence.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::trace;

use airfeed_api::RemoteEvent;

/// Per-series runtime state: the upload target plus the event ids
/// matched in the current snapshot.
///
/// Created once per configured series with an empty match list and
/// mutated only by [`SeriesSet::match_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRuntime {
    series_id: i64,
    file: PathBuf,
    event_ids: Vec<i64>,
}

impl SeriesRuntime {
    fn new(series_id: i64, file: PathBuf) -> Self {
        Self {
            series_id,
            file,
            event_ids: Vec::new(),
        }
    }

    pub fn series_id(&self) -> i64 {
        self.series_id
    }

    /// The local file uploaded for every matched event of this series.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Matched event ids, in snapshot discovery order.
    pub fn event_ids(&self) -> &[i64] {
        &self.event_ids
    }
}

/// All configured series, keyed by the feed's series key.
///
/// Iteration order is config insertion order, keeping upload order
/// deterministic across runs.
#[derive(Debug, Default)]
pub struct SeriesSet {
    series: IndexMap<String, SeriesRuntime>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one series. Replaces any previous entry for the key.
    pub fn insert(&mut self, key: impl Into<String>, series_id: i64, file: PathBuf) {
        self.series
            .insert(key.into(), SeriesRuntime::new(series_id, file));
    }

    pub fn get(&self, key: &str) -> Option<&SeriesRuntime> {
        self.series.get(key)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SeriesRuntime)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total matched events across all series.
    pub fn matched_count(&self) -> usize {
        self.series.values().map(|s| s.event_ids.len()).sum()
    }

    /// Match a snapshot against the configured series.
    ///
    /// Previous matches are cleared first, so re-matching an unchanged
    /// snapshot yields the same lists. Events whose key is not
    /// configured are ignored; a configured series that matches nothing
    /// keeps its (empty) entry.
    pub fn match_snapshot(&mut self, events: &[RemoteEvent]) {
        for runtime in self.series.values_mut() {
            runtime.event_ids.clear();
        }
        for event in events {
            if let Some(runtime) = self.series.get_mut(&event.skey) {
                trace!(skey = %event.skey, event_id = event.event_id, "matched event");
                runtime.event_ids.push(event.event_id);
            }
        }
    }
}
