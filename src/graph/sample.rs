//! The fixed four-application dataset used by the demo dashboards

use super::dataset::Dataset;
use super::entity::Entity;
use super::property::keys;

/// AIT1..AIT4 with overlapping upstream/downstream lists.
///
/// The pairs (2, 1) and (3, 1) are each referenced from both of their
/// endpoints, so edge deduplication is exercised by the sample itself.
pub fn ait_dataset() -> Dataset {
    let rows: [(&str, &str, &[&str], &[&str], i64, &str, &str, &str); 4] = [
        ("1", "AIT1", &["2", "3"], &["2"], 3, "tier 1", "Business A", "online"),
        ("2", "AIT2", &["3"], &["1", "3"], 2, "tier 2", "Business B", "offline"),
        ("3", "AIT3", &["1"], &["1"], 5, "tier 3", "Business A", "online"),
        ("4", "AIT4", &[], &["2"], 4, "tier 1", "Business C", "offline"),
    ];

    let entities = rows
        .iter()
        .map(|&(id, label, upstream, downstream, risk, tier, business, status)| {
            Entity::new(id, label)
                .with_upstream(upstream.iter().copied())
                .with_downstream(downstream.iter().copied())
                .with_attribute(keys::RISK_FACTOR, risk)
                .with_attribute(keys::RECOVERY_TIME, tier)
                .with_attribute(keys::BUSINESS_NAME, business)
                .with_attribute(keys::STATUS, status)
        })
        .collect();

    // ids are literal and distinct
    Dataset::new(entities).unwrap_or_default()
}
