/// Dashboard API over the sample dataset, exercised without a socket.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use depgraph::graph::sample;
use depgraph::{router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    router(Arc::new(AppState::new(Arc::new(sample::ait_dataset()))))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_status() {
    let (status, json) = get("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["dataset"]["entities"], 4);
}

#[tokio::test]
async fn test_elements_unfiltered() {
    let (status, json) = get("/api/elements").await;
    assert_eq!(status, StatusCode::OK);

    let elements = json["elements"].as_array().unwrap();
    let nodes = elements.iter().filter(|e| e["group"] == "nodes").count();
    let edges = elements.iter().filter(|e| e["group"] == "edges").count();
    assert_eq!(nodes, 4);
    assert_eq!(edges, 7);
    assert_eq!(json["filtered"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_elements_filtered_by_dropdowns() {
    let (_, json) = get("/api/elements?risk_factor=4&recovery_time=all&business_name=all").await;

    let elements = json["elements"].as_array().unwrap();
    let classes: Vec<(&str, &str)> = elements
        .iter()
        .filter(|e| e["group"] == "nodes")
        .map(|e| (e["data"]["id"].as_str().unwrap(), e["classes"].as_str().unwrap()))
        .collect();
    assert_eq!(classes, vec![("2", "connected offline"), ("4", "filtered offline")]);

    let edge = elements.iter().find(|e| e["group"] == "edges").unwrap();
    assert_eq!(edge["data"]["source"], "4");
    assert_eq!(edge["data"]["target"], "2");
}

#[tokio::test]
async fn test_unknown_filter_key_is_ignored() {
    let (status, json) = get("/api/summary?colour=blue").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["filtered"], 4);
}

#[tokio::test]
async fn test_summary() {
    let (_, json) = get("/api/summary?status=online").await;
    assert_eq!(json["total"], 4);
    assert_eq!(json["filtered"], 2);
    assert_eq!(json["online"], 2);
    assert_eq!(json["offline"], 0);
}

#[tokio::test]
async fn test_overview_is_default_classed() {
    let (_, json) = get("/api/overview").await;
    let elements = json["elements"].as_array().unwrap();
    assert!(elements
        .iter()
        .filter(|e| e["group"] == "nodes")
        .all(|e| e["classes"].as_str().unwrap().starts_with("default ")));
}

#[tokio::test]
async fn test_details() {
    let (_, json) = get("/api/details").await;
    assert_eq!(json["kind"], "placeholder");

    let (_, json) = get("/api/details?id=3").await;
    assert_eq!(json["kind"], "entity");
    assert_eq!(json["label"], "AIT3");

    let (_, json) = get("/api/nodes/2").await;
    assert_eq!(json["label"], "AIT2");

    let (status, json) = get("/api/nodes/404").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kind"], "placeholder");
}

#[tokio::test]
async fn test_options() {
    let (_, json) = get("/api/options").await;
    assert_eq!(json["labels"].as_array().unwrap().len(), 4);
    let risk = json["attributes"]["risk_factor"].as_array().unwrap();
    assert_eq!(risk[0]["label"], "All");
    assert_eq!(risk[1]["label"], "Risk 2");
    assert_eq!(risk[1]["value"], 2);
}

#[tokio::test]
async fn test_figures() {
    let (_, json) = get("/api/scatter?label=B").await;
    let data = json["data"].as_array().unwrap();
    // three status traces and one drop line
    assert_eq!(data.len(), 4);
    assert_eq!(data[1]["text"][0], "B");

    let (_, json) = get("/api/scatter/click?label=B").await;
    assert_eq!(json["message"], "Clicked on point with label: B");

    let (_, json) = get("/api/geo").await;
    assert_eq!(json["data"][0]["type"], "scattergeo");
}

#[tokio::test]
async fn test_dashboard_page() {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("AIT Network Graph"));
}

#[tokio::test]
async fn test_geo_search() {
    let (_, json) = get("/api/geo?search=cityd").await;
    let data = json["data"].as_array().unwrap();
    // two links into CityD, then the marker trace
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["mode"], "lines");
    assert_eq!(data[2]["lat"].as_array().unwrap().len(), 3);

    let (_, json) = get("/api/geo?search=").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["lat"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_lineage() {
    let (status, json) = get("/api/lineage").await;
    assert_eq!(status, StatusCode::OK);

    let elements = json["elements"].as_array().unwrap();
    let shared: Vec<&str> = elements
        .iter()
        .filter(|e| e["classes"] == "shared")
        .map(|e| e["data"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(shared, vec!["UpstreamA"]);
    assert!(elements
        .iter()
        .filter(|e| e["group"] == "nodes")
        .all(|e| ["app", "upstream", "table"].contains(&e["data"]["type"].as_str().unwrap())));

    let (_, json) = get("/api/lineage/shared-tables").await;
    let tables = json.as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["table"], "orders");
    assert_eq!(tables[0]["apps"][1], "App2");
}

#[tokio::test]
async fn test_summary_uses_state_status_axis() {
    let dataset = depgraph::Dataset::new(vec![
        depgraph::Entity::new("a", "A").with_attribute("health", "up"),
        depgraph::Entity::new("b", "B").with_attribute("health", "down"),
    ])
    .unwrap();
    let mut state = AppState::new(Arc::new(dataset));
    state.projector = depgraph::Projector::new()
        .with_status_key("health")
        .with_online_value("up")
        .with_offline_value("down");
    let app = router(Arc::new(state));

    let req = Request::builder().uri("/api/summary").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["online"], 1);
    assert_eq!(json["offline"], 1);
}
