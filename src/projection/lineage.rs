//! Application data lineage
//!
//! A lineage table has one row per (application, upstream feed, table) use.
//! It is projected into a three-tier graph `app -> upstream -> table` for a
//! breadth-first renderer, and into the list of tables that more than one
//! application reads.

use super::element::EdgeElement;
use crate::graph::{EntityId, GraphError, GraphResult};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;
use tracing::debug;

/// Class added to upstream nodes feeding more than one row
pub const SHARED_CLASS: &str = "shared";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageRow {
    #[serde(alias = "appName")]
    pub app: String,
    #[serde(alias = "upstreamName")]
    pub upstream: String,
    #[serde(alias = "tableName", alias = "tables")]
    pub table: String,
}

impl LineageRow {
    pub fn new(app: impl Into<String>, upstream: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            upstream: upstream.into(),
            table: table.into(),
        }
    }
}

/// Small fixed lineage table used when no file is configured
pub fn sample_rows() -> Vec<LineageRow> {
    [
        ("App1", "UpstreamA", "orders"),
        ("App1", "UpstreamB", "customers"),
        ("App2", "UpstreamA", "orders"),
        ("App3", "UpstreamC", "customers"),
        ("App3", "UpstreamA", "inventory"),
    ]
    .into_iter()
    .map(|(app, upstream, table)| LineageRow::new(app, upstream, table))
    .collect()
}

/// Parse a JSON array of lineage rows
pub fn rows_from_json_str(input: &str) -> GraphResult<Vec<LineageRow>> {
    serde_json::from_str(input).map_err(|e| GraphError::Parse(e.to_string()))
}

/// Load lineage rows; the extension picks JSON or YAML
pub fn load_rows(path: impl AsRef<Path>) -> GraphResult<Vec<LineageRow>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => rows_from_json_str(&contents),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&contents).map_err(|e| GraphError::Parse(e.to_string()))
        }
        other => Err(GraphError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Tier of a lineage node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineageKind {
    App,
    Upstream,
    Table,
}

impl LineageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineageKind::App => "app",
            LineageKind::Upstream => "upstream",
            LineageKind::Table => "table",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageNodeData {
    pub id: EntityId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: LineageKind,
    /// Rows naming this node as their upstream; zero for other tiers
    #[serde(skip_serializing_if = "is_zero")]
    pub uses: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageNode {
    pub data: LineageNodeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<&'static str>,
}

impl LineageNode {
    pub fn id(&self) -> &EntityId {
        &self.data.id
    }

    pub fn is_shared(&self) -> bool {
        self.classes == Some(SHARED_CLASS)
    }
}

#[derive(Serialize)]
#[serde(tag = "group")]
enum LineageElement<'a> {
    #[serde(rename = "nodes")]
    Node(&'a LineageNode),
    #[serde(rename = "edges")]
    Edge(&'a EdgeElement),
}

/// Lineage nodes (first-appearance order) followed by distinct edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineageGraph {
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<EdgeElement>,
}

impl LineageGraph {
    /// Build the graph from rows.
    ///
    /// A name is one node whatever tier it shows up in; the tier it first
    /// appears in wins. Every row contributes `app -> upstream` and
    /// `upstream -> table`, each pair emitted once.
    pub fn from_rows(rows: &[LineageRow]) -> Self {
        let mut kinds: IndexMap<&str, LineageKind> = IndexMap::new();
        let mut uses: IndexMap<&str, usize> = IndexMap::new();
        let mut seen: FxHashSet<(&str, &str)> = FxHashSet::default();
        let mut pairs: Vec<(&str, &str)> = Vec::new();

        for row in rows {
            kinds.entry(row.app.as_str()).or_insert(LineageKind::App);
            kinds.entry(row.upstream.as_str()).or_insert(LineageKind::Upstream);
            kinds.entry(row.table.as_str()).or_insert(LineageKind::Table);
            *uses.entry(row.upstream.as_str()).or_insert(0) += 1;

            for pair in [
                (row.app.as_str(), row.upstream.as_str()),
                (row.upstream.as_str(), row.table.as_str()),
            ] {
                if seen.insert(pair) {
                    pairs.push(pair);
                }
            }
        }

        let nodes = kinds
            .into_iter()
            .map(|(name, kind)| {
                let count = match kind {
                    LineageKind::Upstream => uses.get(name).copied().unwrap_or(0),
                    _ => 0,
                };
                LineageNode {
                    data: LineageNodeData {
                        id: EntityId::from(name),
                        label: name.to_string(),
                        kind,
                        uses: count,
                    },
                    classes: (count > 1).then_some(SHARED_CLASS),
                }
            })
            .collect::<Vec<_>>();

        let edges = pairs
            .into_iter()
            .map(|(source, target)| EdgeElement::new(source.into(), target.into()))
            .collect::<Vec<_>>();

        debug!(
            rows = rows.len(),
            nodes = nodes.len(),
            edges = edges.len(),
            "built lineage graph"
        );

        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&LineageNode> {
        self.nodes.iter().find(|n| n.id().as_str() == id)
    }
}

impl Serialize for LineageGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.nodes
                .iter()
                .map(LineageElement::Node)
                .chain(self.edges.iter().map(LineageElement::Edge)),
        )
    }
}

/// A table read by more than one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedTable {
    pub table: String,
    /// Distinct applications, in first-appearance order
    pub apps: Vec<String>,
}

/// Tables used by at least two distinct applications, in first-appearance
/// order
pub fn shared_tables(rows: &[LineageRow]) -> Vec<SharedTable> {
    let mut by_table: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for row in rows {
        by_table
            .entry(row.table.as_str())
            .or_default()
            .insert(row.app.as_str());
    }

    by_table
        .into_iter()
        .filter(|(_, apps)| apps.len() > 1)
        .map(|(table, apps)| SharedTable {
            table: table.to_string(),
            apps: apps.into_iter().map(str::to_string).collect(),
        })
        .collect()
}
