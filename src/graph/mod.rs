//! Dependency graph data model
//!
//! This module implements the entity table behind the dashboards:
//! - Entities with upstream/downstream adjacency lists and scalar attributes
//! - An immutable, validated dataset snapshot indexed by id
//! - A fixed sample dataset and a seedable synthetic generator

pub mod dataset;
pub mod entity;
pub mod generator;
pub mod property;
pub mod sample;
pub mod types;

// Re-export main types
pub use dataset::{Dataset, GraphError, GraphResult};
pub use entity::Entity;
pub use generator::{DatasetGenerator, GeneratorConfig, SyntheticGenerator};
pub use property::{keys, AttributeMap, AttributeValue};
pub use types::EntityId;
