/// Properties of the filtered-connected projection over fixed and synthetic
/// datasets.
use depgraph::graph::{keys, sample, Dataset, DatasetGenerator, Entity, EntityId, SyntheticGenerator};
use depgraph::projection::{project, summarize, FilterSpec, NodeClass, Projection, StatusClass};
use std::collections::HashSet;

fn visible_ids(projection: &Projection) -> HashSet<String> {
    projection.visible().map(|id| id.as_str().to_string()).collect()
}

fn edge_pairs(projection: &Projection) -> Vec<(String, String)> {
    projection
        .elements
        .edges
        .iter()
        .map(|e| (e.source().as_str().to_string(), e.target().as_str().to_string()))
        .collect()
}

/// Every invariant that must hold for any projection
fn assert_well_formed(dataset: &Dataset, projection: &Projection) {
    let visible = visible_ids(projection);

    // Node ids are unique and exist in the dataset
    assert_eq!(visible.len(), projection.elements.nodes.len());
    for id in projection.visible() {
        assert!(dataset.contains(id), "node {} not in dataset", id);
    }

    // Edge endpoints are visible nodes, and pairs are unique
    let mut seen = HashSet::new();
    for (source, target) in edge_pairs(projection) {
        assert!(visible.contains(&source), "edge source {} not visible", source);
        assert!(visible.contains(&target), "edge target {} not visible", target);
        assert!(seen.insert((source.clone(), target.clone())), "duplicate edge {}->{}", source, target);
    }

    // Visible = (filtered ∪ connected) ∩ dataset
    let expected: HashSet<String> = projection
        .filtered
        .iter()
        .chain(projection.connected.iter())
        .filter(|id| dataset.contains(id))
        .map(|id| id.as_str().to_string())
        .collect();
    assert_eq!(visible, expected);
}

#[test]
fn test_empty_filter_shows_all_entities() {
    let dataset = sample::ait_dataset();
    let projection = project(&dataset, &FilterSpec::new());

    let expected: HashSet<String> = ["1", "2", "3", "4"].iter().map(|s| s.to_string()).collect();
    assert_eq!(visible_ids(&projection), expected);
    assert_well_formed(&dataset, &projection);
}

#[test]
fn test_end_to_end_edges_are_deduplicated() {
    let dataset = sample::ait_dataset();
    let projection = project(&dataset, &FilterSpec::new());

    let edges: HashSet<(String, String)> = edge_pairs(&projection).into_iter().collect();
    let expected: HashSet<(String, String)> = [
        ("2", "1"),
        ("3", "1"),
        ("1", "2"),
        ("3", "2"),
        ("1", "3"),
        ("2", "3"),
        ("4", "2"),
    ]
    .iter()
    .map(|(s, t)| (s.to_string(), t.to_string()))
    .collect();

    assert_eq!(edges, expected);
    // (2,1) and (3,1) are referenced twice in the source lists
    assert_eq!(projection.elements.edges.len(), 7);
}

#[test]
fn test_dangling_references_are_dropped() {
    let dataset = Dataset::new(vec![
        Entity::new("1", "AIT1").with_upstream(["ghost"]).with_downstream(["2", "missing"]),
        Entity::new("2", "AIT2").with_upstream(["1", "ghost"]),
    ])
    .unwrap();

    let projection = project(&dataset, &FilterSpec::new());
    assert_well_formed(&dataset, &projection);

    // connected keeps the raw references; the element list does not
    assert!(projection.connected.contains(&EntityId::new("ghost")));
    assert_eq!(edge_pairs(&projection), vec![("1".to_string(), "2".to_string())]);
    assert_eq!(projection.elements.nodes.len(), 2);
}

#[test]
fn test_hidden_entities_have_no_edges() {
    let dataset = sample::ait_dataset();
    // AIT4 only references AIT2; AIT1 and AIT3 stay hidden
    let filter = FilterSpec::new().with(keys::BUSINESS_NAME, "Business C");
    let projection = project(&dataset, &filter);

    assert_eq!(
        visible_ids(&projection),
        ["2", "4"].iter().map(|s| s.to_string()).collect::<HashSet<String>>()
    );
    for (source, target) in edge_pairs(&projection) {
        for hidden in ["1", "3"] {
            assert_ne!(source, hidden);
            assert_ne!(target, hidden);
        }
    }
    assert_well_formed(&dataset, &projection);
}

#[test]
fn test_class_tags_compose_orthogonally() {
    let dataset = sample::ait_dataset();
    let filter = FilterSpec::new().with(keys::RECOVERY_TIME, "tier 2");
    let projection = project(&dataset, &filter);

    // AIT2 (offline) is filtered; its neighbours AIT1, AIT3 (online) are connected
    let tags: Vec<(String, String)> = projection
        .elements
        .nodes
        .iter()
        .map(|n| (n.id().as_str().to_string(), n.classes.to_string()))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("1".to_string(), "connected online".to_string()),
            ("2".to_string(), "filtered offline".to_string()),
            ("3".to_string(), "connected online".to_string()),
        ]
    );

    for node in &projection.elements.nodes {
        assert!(matches!(
            node.classes.class,
            NodeClass::Filtered | NodeClass::Connected | NodeClass::Default
        ));
        assert!(matches!(
            node.classes.status,
            Some(StatusClass::Online) | Some(StatusClass::Offline)
        ));
    }
}

#[test]
fn test_summary_for_online_filter() {
    let dataset = sample::ait_dataset();
    let filter = FilterSpec::new().with(keys::STATUS, "online");
    let summary = summarize(&dataset, &filter);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.filtered, 2);
    assert_eq!(summary.online, 2);
    assert_eq!(summary.offline, 0);
}

#[test]
fn test_projection_is_deterministic() {
    let dataset = SyntheticGenerator::with_count(200).seeded(11).generate();
    let filter = FilterSpec::from_pairs([(keys::RISK_FACTOR, "2"), (keys::RECOVERY_TIME, "all")]);

    let first = serde_json::to_string(&project(&dataset, &filter)).unwrap();
    let second = serde_json::to_string(&project(&dataset, &filter)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_synthetic_thousand_entities() {
    let dataset = SyntheticGenerator::with_count(1000).seeded(2024).generate();

    for filter in [
        FilterSpec::new(),
        FilterSpec::new().with(keys::RISK_FACTOR, 3i64),
        FilterSpec::new().with(keys::RISK_FACTOR, 1i64).with(keys::RECOVERY_TIME, "tier 4"),
        FilterSpec::new().with(keys::BUSINESS_NAME, "Business ALL"),
    ] {
        let projection = project(&dataset, &filter);
        assert_well_formed(&dataset, &projection);

        for id in &projection.filtered {
            let node = projection.elements.node(id).unwrap();
            assert_eq!(node.classes.class, NodeClass::Filtered);
        }
    }

    let everything = project(&dataset, &FilterSpec::new());
    assert_eq!(everything.elements.nodes.len(), 1000);
}

#[test]
fn test_all_wildcard_keeps_every_entity() {
    let dataset = sample::ait_dataset();
    let built = FilterSpec::new()
        .with(keys::RISK_FACTOR, "all")
        .with(keys::RECOVERY_TIME, "all")
        .with(keys::BUSINESS_NAME, "all");
    let decoded: FilterSpec = serde_json::from_str(
        r#"{"constraints":{"risk_factor":"all","recovery_time":"All","business_name":""}}"#,
    )
    .unwrap();

    for filter in [built, decoded] {
        let projection = project(&dataset, &filter);
        assert_eq!(projection.elements.nodes.len(), 4);
        assert_eq!(projection.elements.edges.len(), 7);
        assert_well_formed(&dataset, &projection);
    }
}
