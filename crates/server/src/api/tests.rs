//! Handler tests driving the full router against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::router::build_router;
use crate::state::AppState;
use crate::store::memory::MemoryItemStore;

fn app() -> (Router, Arc<MemoryItemStore>) {
    let store = Arc::new(MemoryItemStore::new());
    let state = Arc::new(AppState::new(store.clone()));
    (build_router(state), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

#[tokio::test]
async fn test_root_message() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("MySQL"));
}

#[tokio::test]
async fn test_health_connected() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "connected"}));
}

#[tokio::test]
async fn test_health_stays_200_when_database_down() {
    let (app, store) = app();
    store.set_unavailable(true);

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "api_ok_db_error");
    assert_eq!(body["database"], "disconnected");
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_health_stays_200_when_ping_hangs() {
    let (app, store) = app();
    store.set_hanging(true);

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "api_ok_db_error");
    assert_eq!(body["database"], "disconnected");
    assert!(body["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_create_get_delete_roundtrip() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/items/",
        Some(json!({"name": "a", "description": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/items/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json!({"id": id, "name": "a", "description": "b"}));

    let (status, deleted) = send(&app, Method::DELETE, &format!("/items/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], format!("Item {} supprimé avec succès", id));

    let (status, missing) = send(&app, Method::GET, &format!("/items/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, json!({"detail": "Item non trouvé"}));
}

#[tokio::test]
async fn test_create_is_not_idempotent() {
    let (app, _) = app();
    let payload = json!({"name": "same", "description": "same"});

    let (_, first) = send(&app, Method::POST, "/items/", Some(payload.clone())).await;
    let (_, second) = send(&app, Method::POST, "/items/", Some(payload)).await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_delete_missing_is_404() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::DELETE, "/items/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item non trouvé");
}

#[tokio::test]
async fn test_list_pagination() {
    let (app, _) = app();
    for i in 0..5 {
        send(
            &app,
            Method::POST,
            "/items/",
            Some(json!({"name": format!("item-{}", i), "description": ""})),
        )
        .await;
    }

    let (status, all) = send(&app, Method::GET, "/items/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 5);

    let (_, page) = send(&app, Method::GET, "/items/?skip=1&limit=2", None).await;
    let names: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["item-1", "item-2"]);

    let (status, _) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_rejects_oversized_name() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/items/",
        Some(json!({"name": "x".repeat(101), "description": "ok"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("100"));
}

#[tokio::test]
async fn test_create_missing_field_rejected() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::POST, "/items/", Some(json!({"name": "only"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("description"));
}

#[tokio::test]
async fn test_create_wrong_field_type_has_detail() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/items/",
        Some(json!({"name": 7, "description": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_storage_fault_is_500() {
    let (app, store) = app();
    store.set_unavailable(true);

    let (status, body) = send(&app, Method::GET, "/items/", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().starts_with("database error"));
}
