//! Renderer-facing graph elements
//!
//! Serialises to the Cytoscape element format:
//! `{"group":"nodes","data":{"id":"1","label":"AIT1"},"classes":"filtered online"}`
//! and `{"group":"edges","data":{"source":"2","target":"1"}}`.

use crate::graph::EntityId;
use serde::{Serialize, Serializer};
use std::fmt;

/// Membership class of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Filtered,
    Connected,
    Default,
}

impl NodeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeClass::Filtered => "filtered",
            NodeClass::Connected => "connected",
            NodeClass::Default => "default",
        }
    }
}

/// Status class of a node, independent of `NodeClass`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Online,
    Offline,
}

impl StatusClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Online => "online",
            StatusClass::Offline => "offline",
        }
    }
}

/// Space-separated class list as consumed by stylesheet selectors like
/// `.filtered.online`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassTags {
    pub class: NodeClass,
    pub status: Option<StatusClass>,
}

impl fmt::Display for ClassTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} {}", self.class.as_str(), status.as_str()),
            None => write!(f, "{}", self.class.as_str()),
        }
    }
}

impl Serialize for ClassTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    pub id: EntityId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeElement {
    pub data: NodeData,
    pub classes: ClassTags,
}

impl NodeElement {
    pub fn id(&self) -> &EntityId {
        &self.data.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeData {
    pub source: EntityId,
    pub target: EntityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeElement {
    pub data: EdgeData,
}

impl EdgeElement {
    pub fn new(source: EntityId, target: EntityId) -> Self {
        Self {
            data: EdgeData { source, target },
        }
    }

    pub fn source(&self) -> &EntityId {
        &self.data.source
    }

    pub fn target(&self) -> &EntityId {
        &self.data.target
    }
}

/// One record of the flat element list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "group")]
pub enum Element {
    #[serde(rename = "nodes")]
    Node(NodeElement),
    #[serde(rename = "edges")]
    Edge(EdgeElement),
}

/// Nodes followed by edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementList {
    pub nodes: Vec<NodeElement>,
    pub edges: Vec<EdgeElement>,
}

impl ElementList {
    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &EntityId) -> Option<&NodeElement> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn has_edge(&self, source: &EntityId, target: &EntityId) -> bool {
        self.edges
            .iter()
            .any(|e| e.source() == source && e.target() == target)
    }

    /// Flat element sequence for the renderer
    pub fn to_elements(&self) -> Vec<Element> {
        self.nodes
            .iter()
            .cloned()
            .map(Element::Node)
            .chain(self.edges.iter().cloned().map(Element::Edge))
            .collect()
    }
}

impl Serialize for ElementList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_elements().serialize(serializer)
    }
}
