//! Immutable dataset snapshot
//!
//! A `Dataset` is built once, validated, and then only read. Filtering and
//! projection always derive new views from it.

use super::entity::Entity;
use super::property::{keys, AttributeValue};
use super::types::EntityId;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building or loading a dataset
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Entity id must not be empty (label {0:?})")]
    EmptyId(String),

    #[error("Entity {0} appears more than once")]
    DuplicateEntity(EntityId),

    #[error("Invalid attribute {key} on entity {id}: expected {expected}, found {found}")]
    InvalidAttribute {
        id: EntityId,
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Read-only table of entities indexed by id
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Entities in source order
    entities: Vec<Entity>,

    /// Id -> position in `entities`
    index: FxHashMap<EntityId, usize>,

    /// Every attribute name carried by at least one entity
    attribute_keys: IndexSet<String>,
}

impl Dataset {
    /// Build a snapshot, validating ids and typed attributes.
    ///
    /// Adjacency lists are not checked: dangling references are allowed and
    /// dropped later at projection time.
    pub fn new(entities: Vec<Entity>) -> GraphResult<Self> {
        let mut index = FxHashMap::default();
        let mut attribute_keys = IndexSet::new();

        for (pos, entity) in entities.iter().enumerate() {
            if entity.id.is_empty() {
                return Err(GraphError::EmptyId(entity.label.clone()));
            }
            if index.insert(entity.id.clone(), pos).is_some() {
                return Err(GraphError::DuplicateEntity(entity.id.clone()));
            }
            if let Some(status) = entity.attribute(keys::STATUS) {
                if status.as_string().is_none() {
                    return Err(GraphError::InvalidAttribute {
                        id: entity.id.clone(),
                        key: keys::STATUS.to_string(),
                        expected: "String",
                        found: status.type_name(),
                    });
                }
            }
            for key in entity.attributes.keys() {
                if !attribute_keys.contains(key) {
                    attribute_keys.insert(key.clone());
                }
            }
        }

        debug!(
            entities = entities.len(),
            attributes = attribute_keys.len(),
            "dataset snapshot built"
        );

        Ok(Dataset {
            entities,
            index,
            attribute_keys,
        })
    }

    /// Parse a JSON array of entity records
    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        let entities: Vec<Entity> =
            serde_json::from_str(input).map_err(|e| GraphError::Parse(e.to_string()))?;
        Self::new(entities)
    }

    /// Parse a YAML sequence of entity records
    pub fn from_yaml_str(input: &str) -> GraphResult<Self> {
        let entities: Vec<Entity> =
            serde_yaml::from_str(input).map_err(|e| GraphError::Parse(e.to_string()))?;
        Self::new(entities)
    }

    /// Load a dataset file; the extension picks the format
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            other => Err(GraphError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Serialize back into the JSON record format
    pub fn to_json_string(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(&self.entities).map_err(|e| GraphError::Parse(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity by id
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.index.get(id).map(|&pos| &self.entities[pos])
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    /// Entities in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Whether any entity carries `key`
    pub fn knows_attribute(&self, key: &str) -> bool {
        self.attribute_keys.contains(key)
    }

    /// Distinct labels, in order of first appearance
    pub fn labels(&self) -> Vec<&str> {
        let unique: IndexSet<&str> = self.entities.iter().map(|e| e.label.as_str()).collect();
        unique.into_iter().collect()
    }

    /// Distinct values of one attribute, in order of first appearance
    pub fn distinct_values(&self, key: &str) -> Vec<&AttributeValue> {
        let mut values: Vec<&AttributeValue> = Vec::new();
        for value in self.entities.iter().filter_map(|e| e.attribute(key)) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        values
    }
}
