//! Integration tests for the ZoneForge Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use zoneforge::config::{Config, PathConfig};
use zoneforge::web::{create_router, AppState};

mod fixtures;
use fixtures::*;

/// Creates a test AppState with a temporary workspace.
fn create_test_state() -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        paths: PathConfig {
            layouts_dir: Some(temp_dir.path().to_path_buf()),
        },
        ..Config::default()
    };

    let state =
        AppState::new(config, temp_dir.path().to_path_buf()).expect("Failed to create app state");

    (state, temp_dir)
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

/// Helper to make a POST request with JSON body.
async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Helper to make a PUT request with JSON body.
async fn put_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", uri, Some(body)).await
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

fn zone_ids(zones: &Value) -> Vec<String> {
    zones
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|z| z["id"].as_str().map(String::from))
        .collect()
}

fn complete_zones_json() -> Value {
    serde_json::to_value(complete_pos_zones()).unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

// ============================================================================
// Component Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_list_components_filtered() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/components").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 26);

    let (status, json) = get_json(&app, "/api/components?screen=kds").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 7);
    assert_eq!(json["components"][0]["layoutType"], "kds");

    let (_, json) = get_json(&app, "/api/components?screen=pos&category=dialog").await;
    let ids: Vec<&str> = json["components"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["ModifierDialog", "TipDialog"]);
}

#[tokio::test]
async fn test_get_component() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/components/SendButton").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["maxInstances"], 4);
    assert_eq!(json["variants"].as_array().unwrap().len(), 4);

    let (status, json) = get_json(&app, "/api/components/Jukebox").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("Jukebox"));
}

// ============================================================================
// Layout Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_list_layouts_empty() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/layouts").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["layouts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_layouts_with_files() {
    let (state, temp_dir) = create_test_state();
    write_layout_file(temp_dir.path(), "kds.json", &test_layout_kds());
    write_layout_file(temp_dir.path(), "counter.json", &test_layout_pos());
    std::fs::write(temp_dir.path().join("notes.txt"), "not a layout").unwrap();

    let app = create_router(state);
    let (status, json) = get_json(&app, "/api/layouts").await;

    assert_eq!(status, StatusCode::OK);
    let layouts = json["layouts"].as_array().unwrap();
    assert_eq!(layouts.len(), 2);
    assert_eq!(layouts[0]["filename"], "counter.json");
    assert_eq!(layouts[0]["name"], "Front Counter");
    assert_eq!(layouts[0]["zoneCount"], 9);
    assert_eq!(layouts[1]["screen"], "kds");
}

#[tokio::test]
async fn test_get_layout_success() {
    let (state, temp_dir) = create_test_state();
    write_layout_file(temp_dir.path(), "counter.json", &test_layout_pos());
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/layouts/counter.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metadata"]["name"], "Front Counter");
    assert_eq!(json["zones"].as_array().unwrap().len(), 9);

    // Extension is optional
    let (status, _) = get_json(&app, "/api/layouts/counter").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_layout_not_found() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/layouts/missing.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_get_layout_rejects_hidden_file() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, _) = get_json(&app, "/api/layouts/.secret.json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_layout_success() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);

    let body = serde_json::to_value(test_layout_pos()).unwrap();
    let (status, _) = put_json(&app, "/api/layouts/new-counter", body).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let saved = read_layout_file(&temp_dir.path().join("new-counter.json"));
    assert_eq!(saved.metadata.name, "Front Counter");
    assert_eq!(saved.zones.len(), 9);
}

#[tokio::test]
async fn test_save_layout_with_errors_is_refused() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);

    let body = serde_json::to_value(test_layout_with_conflict()).unwrap();
    let (status, json) = put_json(&app, "/api/layouts/conflict.json", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "Layout has validation errors");
    assert!(json["details"].as_str().unwrap().contains("Quick Pay"));
    assert!(!temp_dir.path().join("conflict.json").exists());
}

#[tokio::test]
async fn test_save_layout_with_warnings_is_allowed() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);

    let body = serde_json::to_value(test_layout_warnings_only()).unwrap();
    let (status, _) = put_json(&app, "/api/layouts/warn.json", body).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(temp_dir.path().join("warn.json").exists());
}

#[tokio::test]
async fn test_save_layout_duplicate_zone_ids() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let mut body = serde_json::to_value(test_layout_pos()).unwrap();
    let first = body["zones"][0].clone();
    body["zones"].as_array_mut().unwrap().push(first);

    let (status, json) = put_json(&app, "/api/layouts/dup.json", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid layout");
}

#[tokio::test]
async fn test_validate_saved_layout() {
    let (state, temp_dir) = create_test_state();
    write_layout_file(temp_dir.path(), "empty.json", &test_layout_empty_pos());
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/layouts/empty.json/validate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["canSave"], false);
    assert_eq!(json["summary"]["errors"], 6);
}

// ============================================================================
// Validation Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_validate_zones_clean() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/validate",
        json!({ "zones": complete_zones_json(), "screen": "pos" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["canSave"], true);
    assert!(json["diagnostics"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_validate_zones_express_theme() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(
        &app,
        "/api/validate",
        json!({ "zones": complete_zones_json(), "screen": "pos", "themeId": "express" }),
    )
    .await;

    assert_eq!(json["canSave"], true);
    assert_eq!(json["summary"]["infos"], 1);
    assert_eq!(json["diagnostics"][0]["id"], "express-table-select");
    assert_eq!(json["diagnostics"][0]["severity"], "info");
}

#[tokio::test]
async fn test_validate_zones_empty_kds() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(&app, "/api/validate", json!({ "screen": "kds" })).await;

    assert_eq!(json["canSave"], false);
    let ids: Vec<&str> = json["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["missing-KdsHeader", "missing-TicketGrid"]);
}

// ============================================================================
// Placement Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_add_zone() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/zones/add",
        json!({ "zones": [], "component": "SendButton", "variant": "bar" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let zone_id = json["zoneId"].as_str().unwrap();
    let zone = &json["zones"][0];
    assert_eq!(zone["id"], zone_id);
    assert_eq!(zone["position"], "bottom");
    assert_eq!(zone["order"], 0);
    assert_eq!(zone["visible"], true);
    assert_eq!(zone["variant"], "bar");
    assert_eq!(zone["config"]["variant"], "bar");
    assert_eq!(zone["config"]["label"], "Send");
}

#[tokio::test]
async fn test_add_unknown_component_is_noop() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/zones/add",
        json!({ "zones": complete_zones_json(), "component": "Jukebox" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("zoneId").is_none());
    assert_eq!(json["zones"], complete_zones_json());
}

#[tokio::test]
async fn test_remove_and_toggle_zone() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(
        &app,
        "/api/zones/remove",
        json!({ "zones": complete_zones_json(), "id": "cash" }),
    )
    .await;
    assert!(!zone_ids(&json["zones"]).contains(&"cash".to_string()));
    assert_eq!(json["zones"].as_array().unwrap().len(), 8);

    let (_, json) = post_json(
        &app,
        "/api/zones/toggle",
        json!({ "zones": json["zones"], "id": "grid" }),
    )
    .await;
    let grid = json["zones"]
        .as_array()
        .unwrap()
        .iter()
        .find(|z| z["id"] == "grid")
        .unwrap();
    assert_eq!(grid["visible"], false);
}

#[tokio::test]
async fn test_reorder_and_drop_zone() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(
        &app,
        "/api/zones/reorder",
        json!({ "zones": complete_zones_json(), "id": "send", "direction": "down" }),
    )
    .await;
    let bottom: Vec<String> = zone_ids(&json["zones"])
        .into_iter()
        .filter(|id| ["send", "cash", "card"].contains(&id.as_str()))
        .collect();
    assert_eq!(bottom, vec!["cash", "send", "card"]);

    let (_, json) = post_json(
        &app,
        "/api/zones/drop",
        json!({ "zones": complete_zones_json(), "source": "send", "target": "card" }),
    )
    .await;
    let send = json["zones"]
        .as_array()
        .unwrap()
        .iter()
        .find(|z| z["id"] == "send")
        .unwrap();
    assert_eq!(send["order"], 2);
}

#[tokio::test]
async fn test_move_zone() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(
        &app,
        "/api/zones/move",
        json!({ "zones": complete_zones_json(), "id": "card", "position": "right" }),
    )
    .await;

    let card = json["zones"]
        .as_array()
        .unwrap()
        .iter()
        .find(|z| z["id"] == "card")
        .unwrap();
    assert_eq!(card["position"], "right");
    assert_eq!(card["order"], 2);
}

#[tokio::test]
async fn test_duplicate_zone() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(
        &app,
        "/api/zones/duplicate",
        json!({ "zones": complete_zones_json(), "id": "send" }),
    )
    .await;
    let copy_id = json["zoneId"].as_str().unwrap().to_string();
    assert_ne!(copy_id, "send");
    assert_eq!(json["zones"].as_array().unwrap().len(), 10);

    // Singletons can't be duplicated
    let (_, json) = post_json(
        &app,
        "/api/zones/duplicate",
        json!({ "zones": complete_zones_json(), "id": "grid" }),
    )
    .await;
    assert!(json.get("zoneId").is_none());
    assert_eq!(json["zones"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_set_config_checks_schema() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(
        &app,
        "/api/zones/config",
        json!({ "zones": complete_zones_json(), "id": "grid", "key": "columns", "value": 6 }),
    )
    .await;
    let grid = json["zones"]
        .as_array()
        .unwrap()
        .iter()
        .find(|z| z["id"] == "grid")
        .unwrap();
    assert_eq!(grid["config"]["columns"], 6.0);

    let (_, json) = post_json(
        &app,
        "/api/zones/config",
        json!({ "zones": complete_zones_json(), "id": "grid", "key": "columns", "value": "six" }),
    )
    .await;
    assert_eq!(json["zones"], complete_zones_json());
}

#[tokio::test]
async fn test_set_variant_and_resize() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(
        &app,
        "/api/zones/variant",
        json!({ "zones": complete_zones_json(), "id": "send", "variant": "fire" }),
    )
    .await;
    let send = json["zones"]
        .as_array()
        .unwrap()
        .iter()
        .find(|z| z["id"] == "send")
        .unwrap()
        .clone();
    assert_eq!(send["variant"], "fire");
    assert_eq!(send["config"]["variant"], "fire");

    let (_, json) = post_json(
        &app,
        "/api/zones/resize",
        json!({ "zones": complete_zones_json(), "id": "order", "width": 300, "height": null }),
    )
    .await;
    let order = json["zones"]
        .as_array()
        .unwrap()
        .iter()
        .find(|z| z["id"] == "order")
        .unwrap();
    assert_eq!(order["width"], 300);
    assert!(order.get("height").is_none());
}

#[tokio::test]
async fn test_edit_then_validate_round_trip() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, json) = post_json(
        &app,
        "/api/zones/duplicate",
        json!({ "zones": complete_zones_json(), "id": "send" }),
    )
    .await;

    let (_, report) = post_json(
        &app,
        "/api/validate",
        json!({ "zones": json["zones"], "screen": "pos" }),
    )
    .await;
    assert_eq!(report["canSave"], false);
    assert_eq!(report["diagnostics"][0]["id"], "dup-send-variant-kitchen");
    assert_eq!(report["diagnostics"][0]["severity"], "error");
}
