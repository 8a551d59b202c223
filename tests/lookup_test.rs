//! End-to-end lookups against mocked upstreams

use std::sync::Arc;

use r6s_stats::{
    commands::lookup::{render_text, LookupRequest, StatsService},
    config::DbCredentials,
    normalize::Normalizer,
    retry::RetryPolicy,
    select::SourceRegistry,
    sources::{R6scnSource, StatsDbSource},
    Platform, R6sError, StatKind,
};
use reqwest::Client;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn credentials() -> Option<DbCredentials> {
    Some(DbCredentials {
        username: "user".to_string(),
        password: "pass".to_string(),
    })
}

fn service(registry: SourceRegistry, default_source: &str) -> StatsService {
    StatsService::new(
        registry,
        Normalizer::with_defaults(),
        RetryPolicy::immediate(3),
        default_source,
    )
}

#[tokio::test]
async fn test_statsdb_404_is_not_found_after_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r6/pc/player/Ghost"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(
        StatsDbSource::new(Client::new(), credentials()).with_base_url(server.uri()),
    ));

    let err = service(registry, "r6db")
        .lookup(&LookupRequest::new("Ghost", StatKind::Basic))
        .await
        .unwrap_err();

    match &err {
        R6sError::NotFound { username } => assert_eq!(username, "Ghost"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert_eq!(err.category().user_message(), "Player not found");
}

#[tokio::test]
async fn test_statsdb_server_errors_exhaust_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r6/psn/player/Busy"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(
        StatsDbSource::new(Client::new(), credentials()).with_base_url(server.uri()),
    ));

    let mut request = LookupRequest::new("Busy", StatKind::Basic);
    request.platform = Some(Platform::Psn);
    let err = service(registry, "r6db").lookup(&request).await.unwrap_err();

    assert!(matches!(
        err,
        R6sError::SourceUnavailable { attempts: 3, .. }
    ));
}

#[tokio::test]
async fn test_r6scn_detail_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apistats/stats/getprofilesbyuplayname"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "MacieJay",
            "Basicstat": [{"region": "emea", "level": 231, "mmr": 4500, "platform": "uplay"}],
            "StatGeneral": [{"kills": 900, "deaths": 600, "played": 100, "won": 55, "lost": 45}],
            "StatCR": [
                {"model": "ranked", "kills": 300, "deaths": 200, "won": 20, "lost": 10, "played": 30},
                {"model": "casual", "kills": 600, "deaths": 400, "won": 35, "lost": 35, "played": 70}
            ],
            "StatCR2": [],
            "StatOperator": [],
            "SeasonRanks": [
                {"season": 5, "mmr": 3000, "max_mmr": 3000},
                {"season": 5, "mmr": 4500, "max_mmr": 4500}
            ],
            "Casualstat": {"user_id": "4f9c", "mmr": 2600}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(
        R6scnSource::new(Client::new()).with_base_url(server.uri()),
    ));

    let lookup = service(registry, "r6scn")
        .lookup(&LookupRequest::new("MacieJay", StatKind::Detail))
        .await
        .unwrap();

    let stats = &lookup.statistics;
    assert_eq!(stats.level(), Some(231));
    assert_eq!(stats.general().unwrap().kd().to_string(), "1.50");
    assert_eq!(stats.ranked().unwrap().tier.unwrap().to_string(), "Diamond II");
    assert_eq!(stats.casual().unwrap().tier.unwrap().to_string(), "Gold III");

    // One season 5 entry; the peak still sees the repeated 4500 record.
    assert_eq!(stats.seasons().len(), 1);
    assert_eq!(stats.historical_peak().unwrap().max_mmr, Some(4500.0));

    let text = render_text(&lookup);
    assert!(text.contains("Ranked: K/D 1.50"));

    let json = serde_json::to_value(&lookup).unwrap();
    assert_eq!(json["source"], "r6scn");
    assert_eq!(json["kind"], "detail");
}

#[tokio::test]
async fn test_r6scn_empty_body_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(
        R6scnSource::new(Client::new()).with_base_url(server.uri()),
    ));

    let err = service(registry, "r6scn")
        .lookup(&LookupRequest::new("Nobody", StatKind::Basic))
        .await
        .unwrap_err();
    assert!(matches!(err, R6sError::NotFound { .. }));
}
