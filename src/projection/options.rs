//! Dropdown option lists for the filter panel

use crate::graph::{keys, AttributeValue, Dataset};
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;

/// Attributes offered as dropdown filters, in panel order
pub const FILTER_KEYS: [&str; 3] = [keys::RISK_FACTOR, keys::RECOVERY_TIME, keys::BUSINESS_NAME];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: AttributeValue,
}

impl DropdownOption {
    pub fn all() -> Self {
        Self {
            label: "All".to_string(),
            value: AttributeValue::from("all"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Entity labels in order of first appearance
    pub labels: Vec<DropdownOption>,
    /// `All` followed by the sorted distinct values, per filter key the
    /// dataset carries
    pub attributes: IndexMap<String, Vec<DropdownOption>>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let labels = dataset
            .labels()
            .into_iter()
            .map(|label| DropdownOption {
                label: label.to_string(),
                value: AttributeValue::from(label),
            })
            .collect();

        let attributes = FILTER_KEYS
            .iter()
            .filter(|key| dataset.knows_attribute(key))
            .map(|&key| (key.to_string(), attribute_options(dataset, key)))
            .collect();

        Self { labels, attributes }
    }

    pub fn for_key(&self, key: &str) -> Option<&[DropdownOption]> {
        self.attributes.get(key).map(Vec::as_slice)
    }
}

fn attribute_options(dataset: &Dataset, key: &str) -> Vec<DropdownOption> {
    let mut values: Vec<&AttributeValue> = dataset.distinct_values(key);
    values.sort_by(|a, b| compare_values(a, b));

    std::iter::once(DropdownOption::all())
        .chain(values.into_iter().map(|value| DropdownOption {
            label: option_label(key, value),
            value: value.clone(),
        }))
        .collect()
}

fn option_label(key: &str, value: &AttributeValue) -> String {
    if key == keys::RISK_FACTOR {
        format!("Risk {}", value)
    } else {
        value.to_string()
    }
}

/// Numbers by value, then booleans, then strings lexicographically
fn compare_values(a: &AttributeValue, b: &AttributeValue) -> Ordering {
    fn rank(value: &AttributeValue) -> u8 {
        match value {
            AttributeValue::Integer(_) | AttributeValue::Float(_) => 0,
            AttributeValue::Boolean(_) => 1,
            AttributeValue::String(_) => 2,
        }
    }

    fn number(value: &AttributeValue) -> Option<f64> {
        match value {
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    match (a, b) {
        (AttributeValue::String(x), AttributeValue::String(y)) => x.cmp(y),
        (AttributeValue::Boolean(x), AttributeValue::Boolean(y)) => x.cmp(y),
        _ => match (number(a), number(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => rank(a).cmp(&rank(b)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{sample, Entity};

    #[test]
    fn test_sample_options() {
        let options = FilterOptions::from_dataset(&sample::ait_dataset());

        let labels: Vec<&str> = options.labels.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["AIT1", "AIT2", "AIT3", "AIT4"]);

        let risk: Vec<&str> = options
            .for_key(keys::RISK_FACTOR)
            .unwrap()
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(risk, vec!["All", "Risk 2", "Risk 3", "Risk 4", "Risk 5"]);

        let tiers: Vec<String> = options
            .for_key(keys::RECOVERY_TIME)
            .unwrap()
            .iter()
            .map(|o| o.value.to_string())
            .collect();
        assert_eq!(tiers, vec!["all", "tier 1", "tier 2", "tier 3"]);

        assert_eq!(options.for_key(keys::BUSINESS_NAME).unwrap().len(), 4);
    }

    #[test]
    fn test_missing_attributes_are_skipped() {
        let dataset = Dataset::new(vec![Entity::new("1", "A")]).unwrap();
        let options = FilterOptions::from_dataset(&dataset);
        assert!(options.attributes.is_empty());
        assert_eq!(options.labels.len(), 1);
    }

    #[test]
    fn test_numeric_sort_is_by_value() {
        let dataset = Dataset::new(vec![
            Entity::new("1", "A").with_attribute(keys::RISK_FACTOR, 10i64),
            Entity::new("2", "B").with_attribute(keys::RISK_FACTOR, 9i64),
        ])
        .unwrap();
        let options = FilterOptions::from_dataset(&dataset);
        let risk: Vec<&str> = options
            .for_key(keys::RISK_FACTOR)
            .unwrap()
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(risk, vec!["All", "Risk 9", "Risk 10"]);
    }
}
