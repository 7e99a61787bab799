//! End-to-end router tests
//!
//! Drive the full router through `tower::ServiceExt::oneshot` with a stub
//! catalog backend and the mock chat provider, asserting on status codes
//! and response bodies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use holonet_api::{create_api_router, AppState, GatewayConfig};
use holonet_catalog::CatalogSource;
use holonet_core::{CatalogRecord, Entity, Role, UpstreamError, UpstreamPage};
use holonet_llm::MockChatProvider;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn record(fields: Value) -> CatalogRecord {
    match fields {
        Value::Object(map) => CatalogRecord::new(map),
        _ => panic!("record fixture must be a JSON object"),
    }
}

fn page(items: Vec<CatalogRecord>, count: u64, has_next: bool) -> UpstreamPage {
    UpstreamPage {
        items,
        count,
        has_next,
    }
}

/// Canned catalog backend serving pre-baked pages and lookups.
struct StubSource {
    pages: Vec<Result<UpstreamPage, UpstreamError>>,
    records: HashMap<String, CatalogRecord>,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(pages: Vec<Result<UpstreamPage, UpstreamError>>) -> Self {
        Self {
            pages,
            records: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn with_record(mut self, id: &str, record: CatalogRecord) -> Self {
        self.records.insert(id.to_string(), record);
        self
    }
}

#[async_trait]
impl CatalogSource for StubSource {
    async fn fetch_page(
        &self,
        _entity: Entity,
        page: u32,
        _search: Option<&str>,
    ) -> Result<UpstreamPage, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get((page - 1) as usize)
            .cloned()
            .unwrap_or_else(|| Ok(UpstreamPage::empty()))
    }

    async fn fetch_by_id(&self, entity: Entity, id: &str) -> Result<CatalogRecord, UpstreamError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound {
                resource: entity.resource().to_string(),
                id: id.to_string(),
            })
    }

    fn page_size(&self) -> u32 {
        10
    }
}

fn build_app(source: StubSource) -> (axum::Router, Arc<MockChatProvider>) {
    let chat = Arc::new(MockChatProvider::new());
    let state = AppState::new(Arc::new(source), chat.clone(), GatewayConfig::default());
    (create_api_router(state), chat)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// ============================================================================
// LIST ROUTES
// ============================================================================

#[tokio::test]
async fn test_list_filters_and_reports_filtered_totals() {
    // Two upstream pages of 10; only the three Skywalkers match.
    let mut first: Vec<CatalogRecord> = (0..9)
        .map(|i| record(json!({"name": format!("Trooper {i}"), "gender": "male"})))
        .collect();
    first.push(record(json!({"name": "Luke Skywalker", "gender": "male"})));
    let second = vec![
        record(json!({"name": "Anakin Skywalker", "gender": "male"})),
        record(json!({"name": "Shmi Skywalker", "gender": "female"})),
    ];

    let source = StubSource::new(vec![
        Ok(page(first, 12, true)),
        Ok(page(second, 12, false)),
    ]);
    let (app, _) = build_app(source);

    // Exact, case-insensitive name match for characters.
    let (status, body) = get(app, "/characters?name=luke+skywalker").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Luke Skywalker");
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["totalPages"], 1);
    assert_eq!(body["meta"]["currentPage"], 1);
    assert_eq!(body["meta"]["limit"], 10);
}

#[tokio::test]
async fn test_list_repaginates_to_requested_window() {
    let items: Vec<CatalogRecord> = (0..10)
        .map(|i| record(json!({"name": format!("Pilot {i:02}")})))
        .collect();
    let source = StubSource::new(vec![Ok(page(items, 10, false))]);
    let (app, _) = build_app(source);

    let (status, body) = get(app, "/characters?page=2&limit=3").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["name"], "Pilot 03");
    assert_eq!(body["meta"]["total"], 10);
    assert_eq!(body["meta"]["totalPages"], 4);
    assert_eq!(body["meta"]["currentPage"], 2);
}

#[tokio::test]
async fn test_list_contains_matching_for_starships() {
    let items = vec![
        record(json!({"name": "Millennium Falcon", "starship_class": "Light freighter"})),
        record(json!({"name": "X-wing", "starship_class": "Starfighter"})),
    ];
    let source = StubSource::new(vec![Ok(page(items, 2, false))]);
    let (app, _) = build_app(source);

    let (status, body) = get(app, "/starships?name=falcon").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Millennium Falcon");
}

#[tokio::test]
async fn test_list_partial_upstream_failure_still_serves() {
    // Page 2 fails; the gateway serves what page 1 produced.
    let items: Vec<CatalogRecord> = (0..10)
        .map(|i| record(json!({"name": format!("Pilot {i}")})))
        .collect();
    let source = StubSource::new(vec![
        Ok(page(items, 30, true)),
        Err(UpstreamError::Timeout {
            resource: "people".to_string(),
        }),
    ]);
    let (app, _) = build_app(source);

    let (status, body) = get(app, "/characters?limit=20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["meta"]["total"], 10);
}

#[tokio::test]
async fn test_list_invalid_page_is_400() {
    let (app, _) = build_app(StubSource::new(vec![]));
    let (status, body) = get(app, "/characters?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_list_invalid_limit_is_400() {
    let (app, _) = build_app(StubSource::new(vec![]));
    let (status, body) = get(app, "/characters?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_unknown_entity_is_404() {
    let (app, _) = build_app(StubSource::new(vec![]));
    let (status, body) = get(app, "/droids").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");
}

// ============================================================================
// LOOKUP ROUTE
// ============================================================================

#[tokio::test]
async fn test_get_by_id_found() {
    let source = StubSource::new(vec![]).with_record(
        "1",
        record(json!({"name": "Luke Skywalker"})).with_id("1"),
    );
    let (app, _) = build_app(source);

    let (status, body) = get(app, "/characters/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Luke Skywalker");
    assert_eq!(body["id"], "1");
}

#[tokio::test]
async fn test_get_by_id_missing_is_404() {
    let (app, _) = build_app(StubSource::new(vec![]));
    let (status, body) = get(app, "/characters/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");
}

// ============================================================================
// CHAT ROUTE
// ============================================================================

#[tokio::test]
async fn test_chat_round_trip_builds_persona_window() {
    let source = StubSource::new(vec![]).with_record(
        "1",
        record(json!({
            "name": "Luke Skywalker",
            "gender": "male",
            "birth_year": "19BBY"
        })),
    );
    let (app, chat) = build_app(source);

    let (status, body) = post_json(
        app,
        "/characters/1/chat",
        json!({
            "message": "Who trained you?",
            "previousMessages": [
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Greetings."}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "echo: Who trained you?");

    // Persona system turn first, then history oldest first, then the new
    // user message.
    let calls = chat.calls();
    assert_eq!(calls.len(), 1);
    let window = &calls[0];
    assert_eq!(window.len(), 4);
    assert_eq!(window[0].role, Role::System);
    assert!(window[0].content.contains("Luke Skywalker"));
    assert_eq!(window[1].content, "Hello");
    assert_eq!(window[2].content, "Greetings.");
    assert_eq!(window[3].content, "Who trained you?");
}

#[tokio::test]
async fn test_chat_unknown_character_is_404() {
    let (app, _) = build_app(StubSource::new(vec![]));
    let (status, body) = post_json(
        app,
        "/characters/999/chat",
        json!({"message": "Anyone there?"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");
}

#[tokio::test]
async fn test_chat_empty_message_is_400() {
    let source = StubSource::new(vec![])
        .with_record("1", record(json!({"name": "Luke Skywalker"})));
    let (app, _) = build_app(source);

    let (status, body) = post_json(app, "/characters/1/chat", json!({"message": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

// ============================================================================
// HEALTH ROUTES
// ============================================================================

#[tokio::test]
async fn test_health_ping() {
    let (app, _) = build_app(StubSource::new(vec![]));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/ping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_ready_reports_upstream() {
    let items = vec![record(json!({"name": "Luke Skywalker"}))];
    let source = StubSource::new(vec![Ok(page(items, 1, false))]);
    let (app, _) = build_app(source);

    let (status, body) = get(app, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["details"]["upstream"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready_unhealthy_when_upstream_down() {
    let source = StubSource::new(vec![Err(UpstreamError::Transport {
        resource: "people".to_string(),
        message: "connection refused".to_string(),
    })]);
    let (app, _) = build_app(source);

    let (status, body) = get(app, "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}
