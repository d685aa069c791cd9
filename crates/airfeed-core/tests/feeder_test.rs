#![allow(clippy::unwrap_used)]
// Workflow tests for `Feeder` using wiremock: query, match, and the
// batch upload semantics (continue on failure, skip on login failure).

use std::path::PathBuf;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use airfeed_api::CalendarClient;
use airfeed_core::{Credentials, DateRange, Feeder, SeriesSet, UploadOutcome};

// ── Helpers ─────────────────────────────────────────────────────────

const TEMPLATE: &str = "event.json-p";

async fn server_and_client() -> (MockServer, CalendarClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CalendarClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn credentials() -> Credentials {
    Credentials {
        user: "operator".into(),
        password: "pw".to_string().into(),
    }
}

fn week() -> DateRange {
    DateRange::new("2026-08-07".parse().unwrap(), "2026-08-13".parse().unwrap()).unwrap()
}

fn audio_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"audio").unwrap();
    path
}

async fn mount_feed(server: &MockServer, feed: &serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/agenda/events.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed))
        .mount(server)
        .await;
}

async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/agenda/planung/calendar.cgi"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "sid=tok; Path=/"))
        .mount(server)
        .await;
}

// ── Query + match ───────────────────────────────────────────────────

#[tokio::test]
async fn refresh_and_match_fill_series_runtimes() {
    let (server, client) = server_and_client().await;
    mount_feed(
        &server,
        &json!({ "events": [
            { "skey": "jazz", "event_id": 101 },
            { "skey": "rock", "event_id": 202 },
            { "skey": "jazz", "event_id": 303 }
        ]}),
    )
    .await;

    let mut series = SeriesSet::new();
    series.insert("jazz", 395, PathBuf::from("a.mp3"));
    let mut feeder = Feeder::new(client, series, TEMPLATE);

    let count = feeder.refresh_events(week()).await.unwrap();
    assert_eq!(count, 3);

    let matched = feeder.match_series();
    assert_eq!(matched, 2);
    assert_eq!(
        feeder.series().get("jazz").unwrap().event_ids(),
        [101, 303]
    );
}

#[tokio::test]
async fn failed_query_leaves_the_store_unchanged() {
    let (server, client) = server_and_client().await;

    // First answer is a valid feed, afterwards the service degrades.
    Mock::given(method("GET"))
        .and(path("/agenda/events.cgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "events": [{ "skey": "jazz", "event_id": 101 }] })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/agenda/events.cgi"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let feeder = Feeder::new(client, SeriesSet::new(), TEMPLATE);

    feeder.refresh_events(week()).await.unwrap();
    assert_eq!(feeder.store().len(), 1);

    let err = feeder.refresh_events(week()).await.expect_err("must fail");
    assert!(matches!(
        err,
        airfeed_core::CoreError::Api(airfeed_api::Error::RemoteStatus { status: 503 })
    ));
    // The previous snapshot persists.
    assert_eq!(feeder.store().len(), 1);
}

#[tokio::test]
async fn undecodable_feed_leaves_the_store_unchanged() {
    let (server, client) = server_and_client().await;

    Mock::given(method("GET"))
        .and(path("/agenda/events.cgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "events": [{ "skey": "jazz", "event_id": 101 }] })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/agenda/events.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let feeder = Feeder::new(client, SeriesSet::new(), TEMPLATE);

    feeder.refresh_events(week()).await.unwrap();
    let err = feeder.refresh_events(week()).await.expect_err("must fail");
    assert!(matches!(
        err,
        airfeed_core::CoreError::Api(airfeed_api::Error::Deserialization { .. })
    ));
    assert_eq!(feeder.store().len(), 1);
}

// ── Upload batch ────────────────────────────────────────────────────

#[tokio::test]
async fn uploads_every_matched_event() {
    let (server, client) = server_and_client().await;
    let dir = tempfile::tempdir().unwrap();
    let file = audio_file(&dir, "jazz.mp3");

    mount_feed(
        &server,
        &json!({ "events": [
            { "skey": "jazz", "event_id": 101 },
            { "skey": "jazz", "event_id": 303 }
        ]}),
    )
    .await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/agenda/planung/audio-recordings.cgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let mut series = SeriesSet::new();
    series.insert("jazz", 395, file);
    let mut feeder = Feeder::new(client, series, TEMPLATE);

    feeder.refresh_events(week()).await.unwrap();
    feeder.match_series();

    let mut progress = 0_usize;
    let reports = feeder.upload_all(&credentials(), |_| progress += 1).await;

    assert_eq!(reports.len(), 2);
    assert_eq!(progress, 2);
    assert!(reports.iter().all(|r| r.outcome.is_success()));
    assert_eq!(reports[0].event_id, 101);
    assert_eq!(reports[1].event_id, 303);
}

#[tokio::test]
async fn series_without_matches_performs_no_login() {
    let (server, client) = server_and_client().await;
    mount_feed(&server, &json!({ "events": [] })).await;

    // No login, no upload may happen.
    Mock::given(method("POST"))
        .and(path("/agenda/planung/calendar.cgi"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "sid=tok"))
        .expect(0)
        .mount(&server)
        .await;

    let mut series = SeriesSet::new();
    series.insert("jazz", 395, PathBuf::from("a.mp3"));
    let mut feeder = Feeder::new(client, series, TEMPLATE);

    feeder.refresh_events(week()).await.unwrap();
    feeder.match_series();

    let reports = feeder.upload_all(&credentials(), |_| {}).await;
    assert!(reports.is_empty());
}

#[tokio::test]
async fn one_failed_upload_does_not_stop_the_batch() {
    let (server, client) = server_and_client().await;
    let dir = tempfile::tempdir().unwrap();
    let file = audio_file(&dir, "jazz.mp3");

    mount_feed(
        &server,
        &json!({ "events": [
            { "skey": "jazz", "event_id": 101 },
            { "skey": "jazz", "event_id": 303 }
        ]}),
    )
    .await;
    mount_login_ok(&server).await;
    // First upload fails, the second succeeds.
    Mock::given(method("POST"))
        .and(path("/agenda/planung/audio-recordings.cgi"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/agenda/planung/audio-recordings.cgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut series = SeriesSet::new();
    series.insert("jazz", 395, file);
    let mut feeder = Feeder::new(client, series, TEMPLATE);

    feeder.refresh_events(week()).await.unwrap();
    feeder.match_series();

    let reports = feeder.upload_all(&credentials(), |_| {}).await;

    assert_eq!(reports.len(), 2);
    assert!(matches!(
        reports[0].outcome,
        UploadOutcome::Failed(airfeed_api::Error::RemoteStatus { status: 500 })
    ));
    assert!(reports[1].outcome.is_success());
}

#[tokio::test]
async fn unreadable_file_fails_that_upload_only() {
    let (server, client) = server_and_client().await;
    let dir = tempfile::tempdir().unwrap();
    let good = audio_file(&dir, "talk.mp3");

    mount_feed(
        &server,
        &json!({ "events": [
            { "skey": "jazz", "event_id": 101 },
            { "skey": "talk", "event_id": 202 }
        ]}),
    )
    .await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/agenda/planung/audio-recordings.cgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut series = SeriesSet::new();
    series.insert("jazz", 395, dir.path().join("missing.mp3"));
    series.insert("talk", 401, good);
    let mut feeder = Feeder::new(client, series, TEMPLATE);

    feeder.refresh_events(week()).await.unwrap();
    feeder.match_series();

    let reports = feeder.upload_all(&credentials(), |_| {}).await;

    assert_eq!(reports.len(), 2);
    assert!(matches!(
        reports[0].outcome,
        UploadOutcome::Failed(airfeed_api::Error::File { .. })
    ));
    assert!(reports[1].outcome.is_success());
}

#[tokio::test]
async fn login_failure_skips_that_series_and_continues() {
    let (server, client) = server_and_client().await;
    let dir = tempfile::tempdir().unwrap();
    let jazz_file = audio_file(&dir, "jazz.mp3");
    let talk_file = audio_file(&dir, "talk.mp3");

    mount_feed(
        &server,
        &json!({ "events": [
            { "skey": "jazz", "event_id": 101 },
            { "skey": "jazz", "event_id": 303 },
            { "skey": "talk", "event_id": 202 }
        ]}),
    )
    .await;
    // First login yields no cookie (rejected), the second succeeds.
    Mock::given(method("POST"))
        .and(path("/agenda/planung/calendar.cgi"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/agenda/planung/audio-recordings.cgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut series = SeriesSet::new();
    series.insert("jazz", 395, jazz_file);
    series.insert("talk", 401, talk_file);
    let mut feeder = Feeder::new(client, series, TEMPLATE);

    feeder.refresh_events(week()).await.unwrap();
    feeder.match_series();

    let reports = feeder.upload_all(&credentials(), |_| {}).await;

    // Both jazz events are skipped without a session; talk proceeds.
    assert_eq!(reports.len(), 3);
    assert!(matches!(reports[0].outcome, UploadOutcome::SkippedNoSession));
    assert!(matches!(reports[1].outcome, UploadOutcome::SkippedNoSession));
    assert_eq!(reports[2].series_key, "talk");
    assert!(reports[2].outcome.is_success());
}
