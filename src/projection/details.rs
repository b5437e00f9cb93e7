//! Click-to-inspect node details

use crate::graph::{Dataset, Entity, EntityId};
use serde::Serialize;
use tracing::debug;

pub const PLACEHOLDER: &str = "Click on a node to see details.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDetails {
    pub id: EntityId,
    pub label: String,
    pub fields: Vec<DetailField>,
    pub upstream: Vec<EntityId>,
    pub downstream: Vec<EntityId>,
}

impl EntityDetails {
    fn from_entity(entity: &Entity) -> Self {
        let fields = entity
            .attributes
            .iter()
            .map(|(key, value)| DetailField {
                name: humanize(key),
                value: value.to_string(),
            })
            .collect();

        Self {
            id: entity.id.clone(),
            label: entity.label.clone(),
            fields,
            upstream: entity.upstream.clone(),
            downstream: entity.downstream.clone(),
        }
    }
}

/// Contents of the details panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Details {
    Placeholder { message: String },
    Entity(EntityDetails),
}

impl Details {
    pub fn placeholder() -> Self {
        Details::Placeholder {
            message: PLACEHOLDER.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Details::Placeholder { .. })
    }

    /// One paragraph per line, as rendered in the panel
    pub fn lines(&self) -> Vec<String> {
        match self {
            Details::Placeholder { message } => vec![message.clone()],
            Details::Entity(details) => {
                let mut lines = Vec::with_capacity(details.fields.len() + 3);
                lines.push(format!("AIT Name: {}", details.label));
                lines.extend(
                    details
                        .fields
                        .iter()
                        .map(|field| format!("{}: {}", field.name, field.value)),
                );
                lines.push(format!("Upstream: {}", join_ids(&details.upstream)));
                lines.push(format!("Downstream: {}", join_ids(&details.downstream)));
                lines
            }
        }
    }
}

/// Details for the selected id, or the placeholder when nothing (or an id
/// unknown to the dataset) is selected
pub fn describe(dataset: &Dataset, selected: Option<&EntityId>) -> Details {
    let Some(id) = selected else {
        return Details::placeholder();
    };

    match dataset.get(id) {
        Some(entity) => Details::Entity(EntityDetails::from_entity(entity)),
        None => {
            debug!(%id, "selected id not in dataset");
            Details::placeholder()
        }
    }
}

/// `risk_factor` -> `Risk Factor`
fn humanize(key: &str) -> String {
    key.split(|c| c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_ids(ids: &[EntityId]) -> String {
    ids.iter()
        .map(EntityId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
