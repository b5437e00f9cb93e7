//! HTTP handlers for the dashboard API

use crate::chart::{self, CityMarker, MarkerLink, ScatterPoint};
use crate::graph::{Dataset, EntityId};
use crate::projection::lineage::{self, LineageGraph, LineageRow};
use crate::projection::{self, FilterOptions, FilterSpec, Projector};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared, read-only state behind every handler
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub projector: Projector,
    pub scatter_points: Vec<ScatterPoint>,
    pub cities: Vec<CityMarker>,
    pub links: Vec<MarkerLink>,
    pub lineage_rows: Vec<LineageRow>,
}

impl AppState {
    /// State over `dataset` with the default projector, sample figures and
    /// sample lineage rows
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            projector: Projector::default(),
            scatter_points: chart::scatter::sample_points(),
            cities: chart::geo::sample_cities(),
            links: chart::geo::sample_links(),
            lineage_rows: lineage::sample_rows(),
        }
    }

    pub fn with_lineage(mut self, rows: Vec<LineageRow>) -> Self {
        self.lineage_rows = rows;
        self
    }
}

pub type SharedState = Arc<AppState>;

#[derive(Deserialize)]
pub struct DetailsQuery {
    pub id: Option<String>,
}

#[derive(Deserialize)]
pub struct ScatterQuery {
    pub label: Option<String>,
}

#[derive(Deserialize)]
pub struct GeoQuery {
    pub search: Option<String>,
}

fn filter_from(params: HashMap<String, String>) -> FilterSpec {
    FilterSpec::from_pairs(params)
}

/// Handler for system status
pub async fn status_handler(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "dataset": {
            "entities": state.dataset.len(),
        }
    }))
}

/// Filtered-connected elements for the current dropdown selection
pub async fn elements_handler(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let filter = filter_from(params);
    Json(state.projector.project(&state.dataset, &filter))
}

/// Initial all-default render
pub async fn overview_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let projection = state.projector.overview(&state.dataset);
    Json(json!({ "elements": projection.elements }))
}

pub async fn summary_handler(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let filter = filter_from(params);
    Json(state.projector.summarize(&state.dataset, &filter))
}

pub async fn options_handler(State(state): State<SharedState>) -> impl IntoResponse {
    Json(FilterOptions::from_dataset(&state.dataset))
}

/// Details for `?id=`, or the placeholder when no id is given
pub async fn details_handler(
    State(state): State<SharedState>,
    Query(query): Query<DetailsQuery>,
) -> impl IntoResponse {
    let selected = query
        .id
        .filter(|id| !id.trim().is_empty())
        .map(EntityId::from);
    Json(projection::describe(&state.dataset, selected.as_ref()))
}

pub async fn node_details_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = EntityId::from(id);
    Json(projection::describe(&state.dataset, Some(&id)))
}

pub async fn scatter_handler(
    State(state): State<SharedState>,
    Query(query): Query<ScatterQuery>,
) -> impl IntoResponse {
    let points = chart::filter_points(&state.scatter_points, query.label.as_deref());
    Json(chart::scatter_figure(&points, "3D Scatter Plot"))
}

/// Click panel text for a scatter point
pub async fn scatter_click_handler(Query(query): Query<ScatterQuery>) -> impl IntoResponse {
    Json(json!({ "message": chart::describe_point(query.label.as_deref()) }))
}

/// City map; `?search=` narrows it to one marker and its links
pub async fn geo_handler(
    State(state): State<SharedState>,
    Query(query): Query<GeoQuery>,
) -> impl IntoResponse {
    Json(chart::geo_search_figure(
        &state.cities,
        &state.links,
        query.search.as_deref(),
    ))
}

/// App -> upstream -> table elements
pub async fn lineage_handler(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({ "elements": LineageGraph::from_rows(&state.lineage_rows) }))
}

pub async fn shared_tables_handler(State(state): State<SharedState>) -> impl IntoResponse {
    Json(lineage::shared_tables(&state.lineage_rows))
}
