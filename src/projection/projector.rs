//! Filtered-connected element projection
//!
//! Turns a dataset snapshot and a filter into the node/edge list handed to
//! the graph renderer:
//!
//! 1. `filtered`  - entities matching every constraint
//! 2. `connected` - every id named in a filtered entity's upstream or
//!    downstream list (not reduced by `filtered`)
//! 3. visible     - `filtered` ∪ `connected`, restricted to ids in the dataset
//! 4. one node per visible entity, classed filtered > connected > default,
//!    plus an online/offline token when the entity has a status
//! 5. one edge per distinct (source, target) pair with both ends visible
//!
//! Dangling adjacency references are dropped silently.

use super::element::{ClassTags, EdgeElement, ElementList, NodeClass, NodeData, NodeElement, StatusClass};
use super::filter::{self, FilterSpec};
use super::summary::Summary;
use crate::graph::{keys, Dataset, Entity, EntityId};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, trace};

/// Result of one projection
#[derive(Debug, Clone, Default, Serialize)]
pub struct Projection {
    /// Renderer elements
    pub elements: ElementList,
    /// Ids matching the filter, in dataset order
    pub filtered: IndexSet<EntityId>,
    /// Ids referenced by filtered entities, in first-reference order; may
    /// overlap `filtered` and may contain dangling ids
    pub connected: IndexSet<EntityId>,
}

impl Projection {
    /// Ids that received a node element
    pub fn visible(&self) -> impl Iterator<Item = &EntityId> {
        self.elements.nodes.iter().map(NodeElement::id)
    }
}

/// Projection settings
///
/// The status axis is dataset-specific: by default the `status` attribute,
/// with `online` as the online value. Node classes treat anything else as
/// offline; the summary counts only the exact `offline` value.
#[derive(Debug, Clone)]
pub struct Projector {
    status_key: String,
    online_value: String,
    offline_value: String,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            status_key: keys::STATUS.to_string(),
            online_value: "online".to_string(),
            offline_value: "offline".to_string(),
        }
    }
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another attribute for the status axis
    pub fn with_status_key(mut self, key: impl Into<String>) -> Self {
        self.status_key = key.into();
        self
    }

    /// Value of the status attribute that counts as online
    pub fn with_online_value(mut self, value: impl Into<String>) -> Self {
        self.online_value = value.into();
        self
    }

    /// Value of the status attribute counted as offline in the summary
    pub fn with_offline_value(mut self, value: impl Into<String>) -> Self {
        self.offline_value = value.into();
        self
    }

    fn status_text<'a>(&self, entity: &'a Entity) -> Option<&'a str> {
        entity.attribute(&self.status_key).and_then(|v| v.as_string())
    }

    /// Status token for an entity, if it carries the status attribute
    pub fn status_class(&self, entity: &Entity) -> Option<StatusClass> {
        entity.attribute(&self.status_key).map(|value| {
            if value.as_string() == Some(self.online_value.as_str()) {
                StatusClass::Online
            } else {
                StatusClass::Offline
            }
        })
    }

    /// Counter boxes for `filter`, read off the same status axis as the
    /// node classes
    pub fn summarize(&self, dataset: &Dataset, filter: &FilterSpec) -> Summary {
        let selected = filter::select(dataset, filter);
        let count_status = |wanted: &str| {
            selected
                .iter()
                .filter(|e| self.status_text(e) == Some(wanted))
                .count()
        };

        Summary {
            total: dataset.len(),
            filtered: selected.len(),
            online: count_status(&self.online_value),
            offline: count_status(&self.offline_value),
        }
    }

    /// Project `dataset` through `filter`
    pub fn project(&self, dataset: &Dataset, filter: &FilterSpec) -> Projection {
        let filtered: IndexSet<EntityId> = filter::select(dataset, filter)
            .into_iter()
            .map(|e| e.id.clone())
            .collect();

        let mut connected = IndexSet::new();
        for id in &filtered {
            if let Some(entity) = dataset.get(id) {
                connected.extend(entity.neighbours().cloned());
            }
        }

        let visible: FxHashSet<&EntityId> = filtered
            .iter()
            .chain(connected.iter())
            .filter(|id| dataset.contains(id))
            .collect();

        let elements = self.build_elements(dataset, &visible, |id| {
            if filtered.contains(id) {
                NodeClass::Filtered
            } else if connected.contains(id) {
                NodeClass::Connected
            } else {
                NodeClass::Default
            }
        });

        debug!(
            filtered = filtered.len(),
            connected = connected.len(),
            nodes = elements.nodes.len(),
            edges = elements.edges.len(),
            "projected elements"
        );

        Projection {
            elements,
            filtered,
            connected,
        }
    }

    /// Initial render: every entity, classed `default`
    pub fn overview(&self, dataset: &Dataset) -> Projection {
        let visible: FxHashSet<&EntityId> = dataset.iter().map(|e| &e.id).collect();
        let elements = self.build_elements(dataset, &visible, |_| NodeClass::Default);

        Projection {
            elements,
            ..Projection::default()
        }
    }

    fn build_elements<F>(
        &self,
        dataset: &Dataset,
        visible: &FxHashSet<&EntityId>,
        classify: F,
    ) -> ElementList
    where
        F: Fn(&EntityId) -> NodeClass,
    {
        let mut elements = ElementList::default();
        let mut seen: FxHashSet<(EntityId, EntityId)> = FxHashSet::default();
        let mut dropped = 0usize;

        let shown: Vec<&Entity> = dataset.iter().filter(|e| visible.contains(&e.id)).collect();

        for &entity in &shown {
            elements.nodes.push(NodeElement {
                data: NodeData {
                    id: entity.id.clone(),
                    label: entity.label.clone(),
                },
                classes: ClassTags {
                    class: classify(&entity.id),
                    status: self.status_class(entity),
                },
            });
        }

        for entity in shown {
            let incoming = entity.upstream.iter().map(|up| (up, &entity.id));
            let outgoing = entity.downstream.iter().map(|down| (&entity.id, down));

            for (source, target) in incoming.chain(outgoing) {
                if !visible.contains(source) || !visible.contains(target) {
                    dropped += 1;
                    continue;
                }
                if seen.insert((source.clone(), target.clone())) {
                    elements
                        .edges
                        .push(EdgeElement::new(source.clone(), target.clone()));
                }
            }
        }

        if dropped > 0 {
            trace!(dropped, "skipped adjacency references outside the visible set");
        }

        elements
    }
}

/// Project with the default settings
pub fn project(dataset: &Dataset, filter: &FilterSpec) -> Projection {
    Projector::default().project(dataset, filter)
}

/// Initial all-default render with the default settings
pub fn overview(dataset: &Dataset) -> Projection {
    Projector::default().overview(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::sample;

    fn id(s: &str) -> EntityId {
        EntityId::new(s)
    }

    #[test]
    fn test_empty_filter_shows_everything_as_filtered() {
        let dataset = sample::ait_dataset();
        let projection = project(&dataset, &FilterSpec::new());

        assert_eq!(projection.filtered.len(), 4);
        assert_eq!(projection.elements.nodes.len(), 4);
        assert!(projection
            .elements
            .nodes
            .iter()
            .all(|n| n.classes.class == NodeClass::Filtered));
    }

    #[test]
    fn test_connected_neighbours() {
        let dataset = sample::ait_dataset();
        // AIT4 only: downstream [2]
        let filter = FilterSpec::new().with("label", "AIT4");
        let projection = project(&dataset, &filter);

        let visible: Vec<&str> = projection.visible().map(EntityId::as_str).collect();
        assert_eq!(visible, vec!["2", "4"]);
        assert_eq!(
            projection.elements.node(&id("2")).unwrap().classes.to_string(),
            "connected offline"
        );
        assert_eq!(
            projection.elements.node(&id("4")).unwrap().classes.to_string(),
            "filtered offline"
        );
        assert_eq!(projection.elements.edges.len(), 1);
        assert!(projection.elements.has_edge(&id("4"), &id("2")));
    }

    #[test]
    fn test_filtered_takes_precedence_over_connected() {
        let dataset = sample::ait_dataset();
        // AIT1 and AIT3 reference each other
        let filter = FilterSpec::new().with(keys::BUSINESS_NAME, "Business A");
        let projection = project(&dataset, &filter);

        assert!(projection.connected.contains(&id("1")));
        assert!(projection.connected.contains(&id("3")));
        assert_eq!(
            projection.elements.node(&id("1")).unwrap().classes.class,
            NodeClass::Filtered
        );
        assert_eq!(
            projection.elements.node(&id("2")).unwrap().classes.class,
            NodeClass::Connected
        );
        assert!(projection.elements.node(&id("4")).is_none());
    }

    #[test]
    fn test_no_match_yields_empty_projection() {
        let dataset = sample::ait_dataset();
        let filter = FilterSpec::new().with(keys::RISK_FACTOR, 1i64);
        let projection = project(&dataset, &filter);
        assert!(projection.filtered.is_empty());
        assert!(projection.elements.is_empty());
    }

    #[test]
    fn test_overview_is_all_default() {
        let dataset = sample::ait_dataset();
        let projection = overview(&dataset);
        assert_eq!(projection.elements.nodes.len(), 4);
        assert_eq!(projection.elements.edges.len(), 7);
        assert!(projection
            .elements
            .nodes
            .iter()
            .all(|n| n.classes.class == NodeClass::Default));
        assert!(projection.filtered.is_empty());
    }

    #[test]
    fn test_custom_status_axis() {
        let dataset = Dataset::new(vec![
            Entity::new("a", "A").with_attribute("health", "up"),
            Entity::new("b", "B").with_attribute("health", "down"),
            Entity::new("c", "C"),
        ])
        .unwrap();
        let projector = Projector::new()
            .with_status_key("health")
            .with_online_value("up");
        let projection = projector.project(&dataset, &FilterSpec::new());

        let classes: Vec<String> = projection
            .elements
            .nodes
            .iter()
            .map(|n| n.classes.to_string())
            .collect();
        assert_eq!(classes, vec!["filtered online", "filtered offline", "filtered"]);
    }

    #[test]
    fn test_summary_follows_custom_status_axis() {
        let dataset = Dataset::new(vec![
            Entity::new("a", "A").with_attribute("health", "up"),
            Entity::new("b", "B").with_attribute("health", "down"),
            Entity::new("c", "C").with_attribute("health", "up"),
            Entity::new("d", "D").with_attribute(keys::STATUS, "online"),
        ])
        .unwrap();
        let projector = Projector::new()
            .with_status_key("health")
            .with_online_value("up")
            .with_offline_value("down");

        let summary = projector.summarize(&dataset, &FilterSpec::new());
        assert_eq!(summary.filtered, 4);
        assert_eq!(summary.online, 2);
        assert_eq!(summary.offline, 1);

        // node classes and counts agree on who is online
        let projection = projector.project(&dataset, &FilterSpec::new());
        let online_nodes = projection
            .elements
            .nodes
            .iter()
            .filter(|n| n.classes.status == Some(StatusClass::Online))
            .count();
        assert_eq!(online_nodes, summary.online);
    }
}
