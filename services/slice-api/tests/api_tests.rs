//! HTTP-level tests for the slice API.
//!
//! The router is driven with `tower::ServiceExt::oneshot`, without binding a
//! socket. Most tests serve an in-memory dataset; the end-to-end tests at the
//! bottom serve a real NetCDF file written to a temp directory.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use netcdf_parser::{GriddedDataset, NetCdfDataset};
use slice_api::{build_router, AppState, ServerConfig};
use test_utils::{temp_netcdf_fixture, GridFixture, MemoryDataset};

// ============================================================================
// Helpers
// ============================================================================

fn app_with(dataset: impl GriddedDataset + 'static, config: ServerConfig) -> Router {
    build_router(Arc::new(AppState::new(Arc::new(dataset), config)))
}

fn scenario_app() -> Router {
    app_with(MemoryDataset::scenario(), ServerConfig::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    (status, content_type, body)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, content_type, body) = get(app, uri).await;
    assert_eq!(content_type.as_deref(), Some("application/json"));
    (status, serde_json::from_slice(&body).unwrap())
}

fn cell(x: f64, y: f64, concentration: f64) -> Value {
    json!({ "x": x, "y": y, "concentration": concentration })
}

// ============================================================================
// Usage and health
// ============================================================================

#[tokio::test]
async fn test_usage_page() {
    let (status, content_type, body) = get(scenario_app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("/get-data"));
    assert!(text.contains("/get-image"));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(scenario_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_metrics_without_recorder_is_not_found() {
    let (status, _, _) = get(scenario_app(), "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_with_recorder() {
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let state = AppState::new(Arc::new(MemoryDataset::scenario()), ServerConfig::default())
        .with_prometheus(recorder.handle());
    let app = build_router(Arc::new(state));

    let (status, content_type, _) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
}

// ============================================================================
// /get-info
// ============================================================================

#[tokio::test]
async fn test_get_info() {
    let (status, body) = get_json(scenario_app(), "/get-info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["dimensions"],
        json!({ "time": 2, "z": 1, "y": 2, "x": 3 })
    );

    let field = &body["variables"]["concentration"];
    assert_eq!(field["type"], "float");
    assert_eq!(field["dimensions"], json!(["time", "z", "y", "x"]));
    assert_eq!(field["attributes"]["units"], "kg m-3");

    assert_eq!(body["variables"]["x"]["dimensions"], json!(["x"]));
    assert_eq!(body["variables"]["y"]["type"], "double");
}

// ============================================================================
// /get-data
// ============================================================================

#[tokio::test]
async fn test_get_data_scenario() {
    let (status, body) = get_json(scenario_app(), "/get-data?t=0&z=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "concentration_data": [
                [cell(0.0, 10.0, 1.0), cell(1.0, 10.0, 2.0), cell(2.0, 10.0, 3.0)],
                [cell(0.0, 20.0, 4.0), cell(1.0, 20.0, 5.0), cell(2.0, 20.0, 6.0)],
            ]
        })
    );
}

#[tokio::test]
async fn test_get_data_second_time_step() {
    let (status, body) = get_json(scenario_app(), "/get-data?t=1&z=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["concentration_data"][0][0], cell(0.0, 10.0, 6.0));
    assert_eq!(body["concentration_data"][1][2], cell(2.0, 20.0, 1.0));
}

#[tokio::test]
async fn test_get_data_missing_t() {
    let (status, body) = get_json(scenario_app(), "/get-data?z=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("'t'"));
}

#[tokio::test]
async fn test_get_data_missing_z() {
    let (status, body) = get_json(scenario_app(), "/get-data?t=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("'z'"));
}

#[tokio::test]
async fn test_get_data_no_query() {
    let (status, body) = get_json(scenario_app(), "/get-data").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_get_data_malformed_indices() {
    for uri in [
        "/get-data?t=abc&z=0",
        "/get-data?t=-1&z=0",
        "/get-data?t=0&z=1.5",
        "/get-data?t=&z=0",
    ] {
        let (status, body) = get_json(scenario_app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_get_data_repeated_index_names_that_index() {
    let (status, body) = get_json(scenario_app(), "/get-data?t=0&z=0&z=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("'z'"));

    let (status, body) = get_json(scenario_app(), "/get-image?t=0&t=1&z=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("'t'"));
}

#[tokio::test]
async fn test_get_data_time_out_of_bounds() {
    let (status, body) = get_json(scenario_app(), "/get-data?t=99&z=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("out of bounds"));
    assert!(message.contains("99"));
}

#[tokio::test]
async fn test_get_data_z_out_of_bounds() {
    let (status, _) = get_json(scenario_app(), "/get-data?t=0&z=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_data_missing_variable_is_server_error() {
    let app = app_with(
        MemoryDataset::scenario().without_variable("concentration"),
        ServerConfig::default(),
    );
    let (status, body) = get_json(app, "/get-data?t=0&z=0").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("concentration"));
}

#[tokio::test]
async fn test_get_data_validation_precedes_variable_check() {
    let app = app_with(
        MemoryDataset::scenario().without_variable("x"),
        ServerConfig::default(),
    );
    let (status, _) = get_json(app, "/get-data?t=5&z=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_data_zero_width_keeps_rows() {
    let fixture = GridFixture {
        time: 1,
        z: 1,
        x: vec![],
        y: vec![0.0, 1.0],
        values: vec![],
        units: "1".to_string(),
    };
    let app = app_with(MemoryDataset::from_fixture(&fixture), ServerConfig::default());
    let (status, body) = get_json(app, "/get-data?t=0&z=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "concentration_data": [[], []] }));
}

// ============================================================================
// /get-image
// ============================================================================

#[tokio::test]
async fn test_get_image_scenario() {
    let (status, content_type, body) = get(scenario_app(), "/get-image?t=0&z=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));

    let img = image::load_from_memory(&body).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(0, 0).0[0], 0);
    assert_eq!(img.get_pixel(2, 0).0[0], 102);
    assert_eq!(img.get_pixel(2, 1).0[0], 255);
}

#[tokio::test]
async fn test_get_image_errors_are_json() {
    let (status, body) = get_json(scenario_app(), "/get-image?z=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = get_json(scenario_app(), "/get-image?t=2&z=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_image_empty_slice_is_server_error() {
    let fixture = GridFixture {
        time: 1,
        z: 1,
        x: vec![0.0, 1.0],
        y: vec![],
        values: vec![],
        units: "1".to_string(),
    };
    let app = app_with(MemoryDataset::from_fixture(&fixture), ServerConfig::default());
    let (status, body) = get_json(app, "/get-image?t=0&z=0").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_image_route_disabled() {
    let config = ServerConfig {
        enable_image_route: false,
        ..ServerConfig::default()
    };

    let app = app_with(MemoryDataset::scenario(), config.clone());
    let (status, _, _) = get(app, "/get-image?t=0&z=0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, usage) = get(app_with(MemoryDataset::scenario(), config), "/").await;
    assert!(!String::from_utf8(usage).unwrap().contains("/get-image"));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests() {
    let app = scenario_app();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        let uri = format!("/get-data?t={}&z=0", i % 2);
        tasks.push(tokio::spawn(async move { get_json(app, &uri).await }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let expected = if i % 2 == 0 { 1.0 } else { 6.0 };
        assert_eq!(body["concentration_data"][0][0]["concentration"], json!(expected));
    }
}

// ============================================================================
// End-to-end with a NetCDF file
// ============================================================================

fn netcdf_app(fixture: &GridFixture) -> (tempfile::TempDir, Router) {
    let (dir, path) = temp_netcdf_fixture(fixture);
    let dataset = NetCdfDataset::open(&path).unwrap();
    (dir, app_with(dataset, ServerConfig::default()))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_netcdf_get_data() {
    let (_dir, app) = netcdf_app(&GridFixture::scenario());
    let (status, body) = get_json(app, "/get-data?t=0&z=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["concentration_data"][0][1], cell(1.0, 10.0, 2.0));
    assert_eq!(body["concentration_data"][1][2], cell(2.0, 20.0, 6.0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_netcdf_get_image() {
    let (_dir, app) = netcdf_app(&GridFixture::scenario());
    let (status, content_type, body) = get(app, "/get-image?t=1&z=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    let img = image::load_from_memory(&body).unwrap().to_luma8();
    assert_eq!(img.get_pixel(0, 0).0[0], 255);
    assert_eq!(img.get_pixel(2, 1).0[0], 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_netcdf_get_info_and_bounds() {
    let (_dir, app) = netcdf_app(&GridFixture::scenario());

    let (status, body) = get_json(app.clone(), "/get-info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dimensions"]["time"], 2);
    assert_eq!(body["variables"]["concentration"]["type"], "float");
    assert_eq!(body["variables"]["concentration"]["attributes"]["units"], "kg m-3");

    let (status, _) = get_json(app, "/get-data?t=2&z=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
