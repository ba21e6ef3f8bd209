#![cfg(feature = "http")]
//! HTTP transport tests — starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use chrono::{Offset, TimeZone, Timelike, Utc};
use serde_json::Value;
use tzweb::{http, SqliteRepository, Temporal, TemporalService};

async fn start_server() -> (String, Arc<TemporalService<SqliteRepository>>) {
    let service = Arc::new(TemporalService::new(
        SqliteRepository::open_in_memory().unwrap(),
    ));
    let app = http::router(service.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), service)
}

#[tokio::test]
async fn create_then_fetch_by_id() {
    let (base, _service) = start_server().await;
    let client = reqwest::Client::new();

    let before = Utc::now();
    let created: Temporal = client
        .get(format!("{base}/temporal/create"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let after = Utc::now();

    let id = created.id.expect("create returns the assigned id");
    let instant = created.instant.expect("create stamps an instant");
    assert!(instant >= before && instant <= after);

    let fetched: Temporal = client
        .get(format!("{base}/temporal/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.instant, created.instant);
    assert_eq!(fetched.local_date, created.local_date);
    assert_eq!(fetched.zone_id, created.zone_id);
    assert_eq!(fetched.zone_offset, created.zone_offset);
    // The wall-clock field loses its sub-second part at the storage boundary.
    assert_eq!(
        fetched.local_time,
        created.local_time.map(|t| t.with_nanosecond(0).unwrap()),
    );

    // Viewed in the host's default zone, the stored instant is the local
    // time of creation.
    let zone = created.zone_id.unwrap();
    assert_eq!(
        fetched.instant.unwrap().with_timezone(&zone).naive_local(),
        instant.with_timezone(&zone).naive_local(),
    );
}

#[tokio::test]
async fn created_record_pairs_offset_with_zone_rules() {
    let (base, _service) = start_server().await;
    let client = reqwest::Client::new();

    let created: Temporal = client
        .get(format!("{base}/temporal/create"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let zone = created.zone_id.unwrap();
    let instant = created.instant.unwrap();
    let expected = zone.offset_from_utc_datetime(&instant.naive_utc()).fix();
    assert_eq!(created.zone_offset, Some(expected));
}

#[tokio::test]
async fn missing_id_returns_null_with_status_200() {
    let (base, _service) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/temporal/424242"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), Value::Null);
}

#[tokio::test]
async fn all_returns_every_record() {
    let (base, service) = start_server().await;
    let client = reqwest::Client::new();

    service.save(&Temporal::new()).unwrap();
    service.save(&Temporal::now()).unwrap();

    let all: Vec<Temporal> = client
        .get(format!("{base}/temporal/all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}
