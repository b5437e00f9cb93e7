//! Filter specifications built from dropdown selections

use crate::graph::{AttributeValue, Dataset, Entity};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pseudo-key constraining the entity's display label
pub const LABEL_KEY: &str = "label";

/// Dropdown text standing for "no constraint"
const WILDCARD: &str = "all";

/// Wildcard or exact-match constraint on one attribute
///
/// Serialized as the dropdown value itself: `"all"` for the wildcard,
/// otherwise the scalar. Deserializing accepts the same text rules as
/// [`FilterValue::parse`], plus `null` for the wildcard.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// "all": always matches
    Any,
    Exact(AttributeValue),
}

impl FilterValue {
    /// Parse a dropdown value; `all` (any case) and the empty string are wildcards
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(WILDCARD) {
            FilterValue::Any
        } else {
            FilterValue::Exact(AttributeValue::String(trimmed.to_string()))
        }
    }

    /// Typed value; text goes through the same wildcard rules as `parse`
    pub fn from_value(value: AttributeValue) -> Self {
        match value {
            AttributeValue::String(text) => Self::parse(&text),
            other => FilterValue::Exact(other),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FilterValue::Any)
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Any => serializer.serialize_str(WILDCARD),
            FilterValue::Exact(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<AttributeValue>::deserialize(deserializer)?;
        Ok(value.map_or(FilterValue::Any, FilterValue::from_value))
    }
}

/// Mapping from attribute name to constraint; constraints combine with AND.
///
/// A missing key leaves that attribute unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    constraints: IndexMap<String, FilterValue>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: require `key` to equal `value`; `"all"` or empty text
    /// leaves it unconstrained
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.constraints
            .insert(key.into(), FilterValue::from_value(value.into()));
        self
    }

    /// Build from raw `key=value` pairs such as query parameters
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let constraints = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), FilterValue::parse(value.as_ref())))
            .collect();
        Self { constraints }
    }

    /// True when no constraint can reject an entity
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.values().all(FilterValue::is_any)
    }

    /// Drop constraints on keys the dataset has never heard of.
    ///
    /// Unknown keys are treated as unconstrained rather than as
    /// "nothing matches".
    pub fn resolve(&self, dataset: &Dataset) -> FilterSpec {
        let constraints = self
            .constraints
            .iter()
            .filter(|(key, value)| {
                !value.is_any() && (key.as_str() == LABEL_KEY || dataset.knows_attribute(key))
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        FilterSpec { constraints }
    }

    /// Every exact constraint must equal the entity's attribute
    pub fn matches(&self, entity: &Entity) -> bool {
        self.constraints.iter().all(|(key, value)| match value {
            FilterValue::Any => true,
            FilterValue::Exact(expected) if key == LABEL_KEY => expected
                .as_string()
                .map_or(false, |label| label == entity.label),
            FilterValue::Exact(expected) => entity
                .attribute(key)
                .map_or(false, |actual| actual.matches(expected)),
        })
    }
}

/// Entities of `dataset` selected by `filter`, in source order.
///
/// Shared by the projector and the summary so both count the same subset.
pub fn select<'a>(dataset: &'a Dataset, filter: &FilterSpec) -> Vec<&'a Entity> {
    let resolved = filter.resolve(dataset);
    if resolved.is_unconstrained() {
        return dataset.iter().collect();
    }
    dataset.iter().filter(|e| resolved.matches(e)).collect()
}
