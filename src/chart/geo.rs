//! World map with one marker per city
//!
//! Markers may be joined by links. Searching selects the first marker whose
//! name contains the query (any case); the map then shows that marker, the
//! markers linked to it, and the links themselves.

use super::{Figure, Line, Marker, MarkerColor, Trace};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMarker {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub count: u64,
}

pub fn sample_cities() -> Vec<CityMarker> {
    [
        ("CityA", 34.0522, -118.2437, 120),
        ("CityB", 51.5074, -0.1278, 75),
        ("CityC", -33.8688, 151.2093, 45),
        ("CityD", 35.6895, 139.6917, 150),
        ("CityE", -23.5505, -46.6333, 90),
    ]
    .into_iter()
    .map(|(city, lat, lon, count)| CityMarker {
        city: city.to_string(),
        lat,
        lon,
        count,
    })
    .collect()
}

/// Undirected link between two markers, by city name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerLink {
    pub from: String,
    pub to: String,
}

impl MarkerLink {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn touches(&self, city: &str) -> bool {
        self.from == city || self.to == city
    }

    /// The far end when `city` is one end
    pub fn other_end(&self, city: &str) -> Option<&str> {
        if self.from == city {
            Some(self.to.as_str())
        } else if self.to == city {
            Some(self.from.as_str())
        } else {
            None
        }
    }
}

pub fn sample_links() -> Vec<MarkerLink> {
    [
        ("CityA", "CityB"),
        ("CityB", "CityD"),
        ("CityD", "CityC"),
        ("CityE", "CityA"),
    ]
    .into_iter()
    .map(|(from, to)| MarkerLink::new(from, to))
    .collect()
}

/// First marker whose name contains `query`, ignoring case; a blank query
/// selects nothing
pub fn search_marker<'a>(markers: &'a [CityMarker], query: &str) -> Option<&'a CityMarker> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    markers
        .iter()
        .find(|m| m.city.to_lowercase().contains(&needle))
}

/// `selected` followed by every marker linked to it, in marker order, each
/// once
pub fn connected_markers<'a>(
    markers: &'a [CityMarker],
    links: &[MarkerLink],
    selected: &'a CityMarker,
) -> Vec<&'a CityMarker> {
    let linked: Vec<&str> = links
        .iter()
        .filter_map(|link| link.other_end(&selected.city))
        .collect();

    std::iter::once(selected)
        .chain(
            markers
                .iter()
                .filter(|m| m.city != selected.city && linked.contains(&m.city.as_str())),
        )
        .collect()
}

impl CityMarker {
    pub fn hover_text(&self) -> String {
        format!(
            "City: {}<br>Lat: {}<br>Lon: {}<br>Count: {}",
            self.city, self.lat, self.lon, self.count
        )
    }
}

pub fn geo_figure(cities: &[CityMarker]) -> Figure {
    let shown: Vec<&CityMarker> = cities.iter().collect();
    figure_with(marker_trace(&shown), Vec::new())
}

/// Map for a marker search: with a match, the selected marker, its linked
/// markers and the links touching it; otherwise every marker and no links
pub fn geo_search_figure(cities: &[CityMarker], links: &[MarkerLink], query: Option<&str>) -> Figure {
    let Some(selected) = query.and_then(|q| search_marker(cities, q)) else {
        return geo_figure(cities);
    };

    let shown = connected_markers(cities, links, selected);
    let lines = links
        .iter()
        .filter(|link| link.touches(&selected.city))
        .filter_map(|link| {
            let from = cities.iter().find(|c| c.city == link.from)?;
            let to = cities.iter().find(|c| c.city == link.to)?;
            Some(link_trace(from, to))
        })
        .collect();

    figure_with(marker_trace(&shown), lines)
}

fn link_trace(from: &CityMarker, to: &CityMarker) -> Trace {
    Trace {
        kind: "scattergeo",
        mode: "lines",
        lon: vec![from.lon, to.lon],
        lat: vec![from.lat, to.lat],
        line: Some(Line {
            color: "#FF5533".to_string(),
            width: 1,
        }),
        hoverinfo: Some("none"),
        showlegend: false,
        ..Trace::default()
    }
}

fn marker_trace(cities: &[&CityMarker]) -> Trace {
    Trace {
        kind: "scattergeo",
        mode: "markers",
        lon: cities.iter().map(|c| c.lon).collect(),
        lat: cities.iter().map(|c| c.lat).collect(),
        text: cities.iter().map(|c| c.hover_text()).collect(),
        marker: Some(Marker {
            size: 12,
            color: MarkerColor::Named("darkred".to_string()),
            colorscale: None,
            opacity: Some(0.8),
            line: Some(Line {
                color: "black".to_string(),
                width: 1,
            }),
        }),
        hoverinfo: Some("text"),
        showlegend: false,
        ..Trace::default()
    }
}

fn figure_with(markers: Trace, lines: Vec<Trace>) -> Figure {
    let mut data = lines;
    data.push(markers);

    Figure {
        data,
        layout: json!({
            "title": {"text": "World Map with City Markers", "x": 0.5},
            "margin": {"r": 0, "t": 0, "l": 0, "b": 0},
            "uirevision": "constant",
            "geo": {
                "projection": {"type": "natural earth", "scale": 1.3},
                "center": {"lat": 20, "lon": 0},
                "showcountries": true,
                "countrycolor": "black",
                "showcoastlines": true,
                "coastlinecolor": "gray",
                "showland": true,
                "landcolor": "lavender",
                "showlakes": true,
                "lakecolor": "lightblue",
                "showrivers": true,
                "rivercolor": "blue",
                "showocean": true,
                "oceancolor": "lightcyan",
                "showframe": false,
                "resolution": 50,
                "lonaxis": {"showgrid": true, "gridcolor": "lightgray"},
                "lataxis": {"showgrid": true, "gridcolor": "lightgray"},
            },
        }),
    }
}
