//! Counter boxes shown above the graph

use super::filter::FilterSpec;
use super::projector::Projector;
use crate::graph::Dataset;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// Entities in the whole dataset
    pub total: usize,
    /// Entities matching the filter
    pub filtered: usize,
    /// Matching entities whose status is exactly the online value
    pub online: usize,
    /// Matching entities whose status is exactly the offline value
    pub offline: usize,
}

impl Summary {
    /// Box captions in display order
    pub fn captions(&self) -> [String; 4] {
        [
            format!("Total Nodes: {}", self.total),
            format!("Filtered Nodes: {}", self.filtered),
            format!("Online Nodes: {}", self.online),
            format!("Offline Nodes: {}", self.offline),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.captions().join(" | "))
    }
}

/// Summary over the default `status` axis; see [`Projector::summarize`]
pub fn summarize(dataset: &Dataset, filter: &FilterSpec) -> Summary {
    Projector::default().summarize(dataset, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{keys, sample, Entity};

    #[test]
    fn test_unfiltered_summary() {
        let summary = summarize(&sample::ait_dataset(), &FilterSpec::new());
        assert_eq!(
            summary,
            Summary {
                total: 4,
                filtered: 4,
                online: 2,
                offline: 2
            }
        );
    }

    #[test]
    fn test_filtered_summary() {
        let filter = FilterSpec::new().with(keys::RECOVERY_TIME, "tier 1");
        let summary = summarize(&sample::ait_dataset(), &filter);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.filtered, 2);
        assert_eq!(summary.online, 1);
        assert_eq!(summary.offline, 1);
    }

    #[test]
    fn test_other_status_values_are_not_counted() {
        let dataset = Dataset::new(vec![
            Entity::new("1", "A").with_attribute(keys::STATUS, "pending"),
            Entity::new("2", "B"),
        ])
        .unwrap();
        let summary = summarize(&dataset, &FilterSpec::new());
        assert_eq!(summary.filtered, 2);
        assert_eq!(summary.online + summary.offline, 0);
    }

    #[test]
    fn test_captions() {
        let summary = Summary {
            total: 4,
            filtered: 2,
            online: 2,
            offline: 0,
        };
        assert_eq!(summary.captions()[0], "Total Nodes: 4");
        assert_eq!(summary.captions()[3], "Offline Nodes: 0");
        assert!(summary.to_string().contains("Filtered Nodes: 2"));
    }
}
