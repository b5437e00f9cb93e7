//! 3D scatter with drop lines to the z = 0 plane
//!
//! Points carrying a status are split into one legend entry per status with a
//! fixed colour; otherwise a single trace is coloured by z.

use super::{Figure, Line, Marker, MarkerColor, Trace};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Status colours, in legend order
pub const STATUS_COLORS: [(&str, &str); 3] = [("up", "red"), ("down", "green"), ("pending", "orange")];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ScatterPoint {
    pub fn new(x: f64, y: f64, z: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            label: label.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Five labelled points A..E with statuses
pub fn sample_points() -> Vec<ScatterPoint> {
    [
        (1.0, 10.0, 5.0, "A", "up"),
        (2.0, 15.0, 6.0, "B", "down"),
        (3.0, 13.0, 7.0, "C", "pending"),
        (4.0, 17.0, 8.0, "D", "down"),
        (5.0, 9.0, 4.0, "E", "up"),
    ]
    .into_iter()
    .map(|(x, y, z, label, status)| ScatterPoint::new(x, y, z, label).with_status(status))
    .collect()
}

/// `None` keeps every point; otherwise exact label match
pub fn filter_points<'a>(points: &'a [ScatterPoint], label: Option<&str>) -> Vec<&'a ScatterPoint> {
    points
        .iter()
        .filter(|p| label.map_or(true, |wanted| p.label == wanted))
        .collect()
}

/// Click panel text for a clicked point label
pub fn describe_point(label: Option<&str>) -> String {
    match label {
        Some(label) => format!("Clicked on point with label: {}", label),
        None => "Click on a point in the scatter plot.".to_string(),
    }
}

pub fn scatter_figure(points: &[&ScatterPoint], title: &str) -> Figure {
    let mut data = if points.iter().any(|p| p.status.is_some()) {
        status_traces(points)
    } else {
        vec![value_trace(points)]
    };
    data.extend(points.iter().map(|p| drop_line(p)));

    Figure {
        data,
        layout: json!({
            "title": title,
            "margin": {"l": 0, "r": 0, "t": 30, "b": 0},
            "scene": {"zaxis": {"title": "Z Axis"}},
        }),
    }
}

fn status_traces(points: &[&ScatterPoint]) -> Vec<Trace> {
    STATUS_COLORS
        .iter()
        .map(|&(status, color)| {
            let group: Vec<&ScatterPoint> = points
                .iter()
                .copied()
                .filter(|p| p.status.as_deref() == Some(status))
                .collect();
            let caption = capitalize(status);

            Trace {
                kind: "scatter3d",
                mode: "markers",
                name: Some(format!("Status: {}", caption)),
                marker: Some(Marker {
                    size: 5,
                    color: MarkerColor::Named(color.to_string()),
                    colorscale: None,
                    opacity: None,
                    line: None,
                }),
                hovertemplate: Some(format!(
                    "Label: %{{text}}<br>X: %{{x}}<br>Y: %{{y}}<br>Z: %{{z}}<br>Status: {}<extra></extra>",
                    caption
                )),
                showlegend: true,
                ..coordinates(&group)
            }
        })
        .collect()
}

fn value_trace(points: &[&ScatterPoint]) -> Trace {
    Trace {
        kind: "scatter3d",
        mode: "markers",
        marker: Some(Marker {
            size: 5,
            color: MarkerColor::Values(points.iter().map(|p| p.z).collect()),
            colorscale: Some("Viridis".to_string()),
            opacity: None,
            line: None,
        }),
        hovertemplate: Some("Label: %{text}<br>X: %{x}<br>Y: %{y}<br>Z: %{z}<extra></extra>".to_string()),
        showlegend: true,
        ..coordinates(points)
    }
}

fn coordinates(points: &[&ScatterPoint]) -> Trace {
    Trace {
        x: points.iter().map(|p| p.x).collect(),
        y: points.iter().map(|p| p.y).collect(),
        z: points.iter().map(|p| p.z).collect(),
        text: points.iter().map(|p| p.label.clone()).collect(),
        ..Trace::default()
    }
}

fn drop_line(point: &ScatterPoint) -> Trace {
    Trace {
        kind: "scatter3d",
        mode: "lines",
        x: vec![point.x, point.x],
        y: vec![point.y, point.y],
        z: vec![0.0, point.z],
        line: Some(Line {
            color: "gray".to_string(),
            width: 2,
        }),
        showlegend: false,
        ..Trace::default()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
