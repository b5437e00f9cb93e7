//! Entity implementation: one row of the dependency table
//!
//! An entity carries its own adjacency lists. References in those lists are
//! not required to resolve inside the dataset.

use super::property::{AttributeMap, AttributeValue};
use super::types::EntityId;
use serde::{Deserialize, Serialize};

/// A node in the dependency graph
///
/// Entities have:
/// - A unique ID
/// - A display label
/// - Upstream ids (entities this one depends on)
/// - Downstream ids (entities depending on this one)
/// - Scalar attributes used for filtering and colouring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity
    pub id: EntityId,

    /// Display name
    pub label: String,

    /// Ids this entity depends on
    #[serde(default)]
    pub upstream: Vec<EntityId>,

    /// Ids depending on this entity
    #[serde(default)]
    pub downstream: Vec<EntityId>,

    /// Named scalar tags
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl Entity {
    /// Create a new entity with no adjacency and no attributes
    pub fn new(id: impl Into<EntityId>, label: impl Into<String>) -> Self {
        Entity {
            id: id.into(),
            label: label.into(),
            upstream: Vec::new(),
            downstream: Vec::new(),
            attributes: AttributeMap::new(),
        }
    }

    /// Builder: set the upstream list
    pub fn with_upstream<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EntityId>,
    {
        self.upstream = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the downstream list
    pub fn with_downstream<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EntityId>,
    {
        self.downstream = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Get an attribute value
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Upstream followed by downstream ids
    pub fn neighbours(&self) -> impl Iterator<Item = &EntityId> {
        self.upstream.iter().chain(self.downstream.iter())
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl std::hash::Hash for Entity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
