//! Plotly-compatible figures for the scatter and map pages
//!
//! Figures are plain data: the browser hands `data` and `layout` straight to
//! `Plotly.newPlot`.

pub mod geo;
pub mod scatter;

use serde::Serialize;
use serde_json::Value;

pub use geo::{geo_figure, geo_search_figure, CityMarker, MarkerLink};
pub use scatter::{describe_point, filter_points, scatter_figure, ScatterPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Value,
}

/// Marker colour: one named colour, or per-point values mapped through a
/// colour scale
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Named(String),
    Values(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
    pub color: MarkerColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

/// One trace; unused coordinate axes are omitted
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub z: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lon: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lat: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<&'static str>,
    pub showlegend: bool,
}
