//! Integration tests for the HTTP API
//!
//! Router driven with `oneshot`, in-memory store, stub reflection provider

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use moodjournal::config::JournalConfig;
use moodjournal::core::{create_router, Journal, MemoryEntryStore, ReflectionGenerator, ReflectionRequest};
use moodjournal::error::GenerationError;
use moodjournal::types::Reflection;

struct StubGenerator {
    fail: bool,
}

#[async_trait]
impl ReflectionGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, request: &ReflectionRequest) -> Result<Reflection, GenerationError> {
        if self.fail {
            return Err(GenerationError::Transport("connection refused".into()));
        }
        Ok(Reflection {
            reflection: format!("You seem {}.", request.emotion),
            summary: "stub".into(),
            actionable_insight: String::new(),
            followups: Vec::new(),
            tone: "plain".into(),
            safety_flag: false,
            coping_suggestion: None,
        })
    }
}

fn create_test_router(fail: bool) -> axum::Router {
    let journal = Journal::new(
        JournalConfig::default(),
        Arc::new(MemoryEntryStore::new()),
        Arc::new(StubGenerator { fail }),
    );
    create_router(journal)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router(false);
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["entries"], 0);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_reflect_success() {
    let app = create_test_router(false);
    let response = app
        .oneshot(post("/api/reflect", serde_json::json!({"entry": "So happy, a wonderful day"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["crisis"], false);
    assert_eq!(json["outcome"], "reflected");
    assert_eq!(json["classification"]["emotion"], "joyful");
    assert_eq!(json["reflection"]["reflection"], "You seem joyful.");
    assert_eq!(json["severity"], "excellent");
}

#[tokio::test]
async fn test_reflect_crisis() {
    let app = create_test_router(false);
    let response = app
        .oneshot(post("/api/reflect", serde_json::json!({"entry": "I want to kill myself"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["crisis"], true);
    assert_eq!(json["tier"], "critical");
    assert_eq!(json["matched"]["tier"], "critical");
    assert!(json["matched"]["keyword"].is_string());
    assert!(json["resources"].is_object());
    assert!(json["classification"]["sentiment"].is_number());
    assert!(json.get("reflection").is_none());
}

#[tokio::test]
async fn test_reflect_provider_down() {
    let app = create_test_router(true);
    let response = app
        .clone()
        .oneshot(post("/api/reflect", serde_json::json!({"entry": "Quiet afternoon"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = json_body(response).await;
    assert_eq!(json["outcome"], "reflection_unavailable");
    assert!(json["classification"]["emotion"].is_string());
    assert!(json["reason"].as_str().unwrap().contains("connection refused"));

    // the entry was still stored
    let response = app.oneshot(get("/api/dashboard")).await.unwrap();
    assert_eq!(json_body(response).await["total_entries"], 1);
}

#[tokio::test]
async fn test_blank_entry_is_bad_request() {
    let app = create_test_router(false);
    for uri in ["/api/reflect", "/api/analyze", "/api/similar"] {
        let response = app
            .clone()
            .oneshot(post(uri, serde_json::json!({"entry": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert!(json_body(response).await["error"].is_string());
    }
}

#[tokio::test]
async fn test_analyze_does_not_store() {
    let app = create_test_router(false);
    let response = app
        .clone()
        .oneshot(post("/api/analyze", serde_json::json!({"entry": "I feel hopeless"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["crisis"], "high");
    assert!(json["severity"].is_string());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(json_body(response).await["entries"], 0);
}

#[tokio::test]
async fn test_read_endpoints_after_submissions() {
    let app = create_test_router(false);
    for entry in [
        "Worried about the exam",
        "Exam went great, so happy",
        "Nervous about exam results",
    ] {
        let response = app
            .clone()
            .oneshot(post("/api/reflect", serde_json::json!({ "entry": entry })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post("/api/similar", serde_json::json!({"entry": "exam stress", "top_n": 2})))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["similar"].as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(post(
            "/api/search",
            serde_json::json!({"query": "exam", "emotions": ["anxious"], "sort_by": "oldest"}),
        ))
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["entries"][0]["text"], "Worried about the exam");

    let response = app.clone().oneshot(get("/api/insights")).await.unwrap();
    let json = json_body(response).await;
    assert_eq!(json["total_entries"], 3);
    assert_eq!(json["transitions"].as_array().unwrap().len(), 2);

    let response = app.clone().oneshot(get("/api/analytics")).await.unwrap();
    assert_eq!(json_body(response).await["metrics"]["total"], 3);

    let response = app.clone().oneshot(get("/api/trends")).await.unwrap();
    assert!(!json_body(response).await["weeks"].as_array().unwrap().is_empty());

    let response = app.oneshot(get("/api/dashboard")).await.unwrap();
    let json = json_body(response).await;
    assert_eq!(json["most_common_emotion"], "anxious");
    assert_eq!(json["positive_count"], 1);
}
