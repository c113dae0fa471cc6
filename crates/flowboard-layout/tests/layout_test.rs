use flowboard_layout::{Error, LayoutOptions, Point, RankDir, compute_positions, layout};
use std::collections::BTreeMap;

fn coords(nodes: &[(&str, Option<&str>)], opts: &LayoutOptions) -> BTreeMap<String, (f64, f64)> {
    let positions = compute_positions(nodes, opts).unwrap();
    nodes
        .iter()
        .zip(positions)
        .map(|((id, _), p)| (id.to_string(), (p.x, p.y)))
        .collect()
}

fn seed() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        ("1", None),
        ("b6", Some("28c")),
        ("d09", Some("1")),
        ("161", Some("d09")),
        ("28c", Some("d09")),
    ]
}

#[test]
fn layout_of_an_empty_list_is_empty() {
    let nodes: Vec<(&str, Option<&str>)> = Vec::new();
    assert!(layout(nodes, &LayoutOptions::default()).unwrap().is_empty());
}

#[test]
fn layout_can_place_a_single_isolated_node() {
    let opts = LayoutOptions {
        node_width: 50.0,
        node_height: 100.0,
        ..Default::default()
    };
    assert_eq!(
        coords(&[("a", None::<&str>)], &opts),
        [("a".to_string(), (25.0, 50.0))].into()
    );
}

#[test]
fn layout_places_unrelated_roots_side_by_side() {
    let opts = LayoutOptions {
        node_width: 50.0,
        node_height: 100.0,
        nodesep: 200.0,
        ..Default::default()
    };
    assert_eq!(
        coords(&[("a", None::<&str>), ("b", None::<&str>)], &opts),
        [
            ("a".to_string(), (25.0, 50.0)),
            ("b".to_string(), (50.0 + 200.0 + 25.0, 50.0)),
        ]
        .into()
    );
}

#[test]
fn layout_places_a_child_below_its_parent() {
    let opts = LayoutOptions {
        node_width: 75.0,
        node_height: 100.0,
        ranksep: 300.0,
        ..Default::default()
    };
    assert_eq!(
        coords(&[("b", Some("a")), ("a", None::<&str>)], &opts),
        [
            ("a".to_string(), (75.0 / 2.0, 50.0)),
            ("b".to_string(), (75.0 / 2.0, 100.0 + 300.0 + 50.0)),
        ]
        .into()
    );
}

#[test]
fn layout_of_the_seed_flow_matches_the_expected_ranks() {
    let opts = LayoutOptions::default();
    let c = coords(&seed(), &opts);

    let rank_step = opts.node_height + opts.ranksep;
    assert_eq!(c["1"].1, 50.0);
    assert_eq!(c["d09"].1, c["1"].1 + rank_step);
    assert_eq!(c["161"].1, c["d09"].1 + rank_step);
    assert_eq!(c["28c"].1, c["161"].1);
    assert_eq!(c["b6"].1, c["28c"].1 + rank_step);

    assert!((c["161"].0 - c["28c"].0).abs() >= opts.node_width + opts.nodesep);
    assert_eq!(c["b6"].0, c["28c"].0);
    assert_eq!(c["d09"].0, (c["161"].0 + c["28c"].0) / 2.0);
    assert_eq!(c["1"].0, c["d09"].0);
}

#[test]
fn layout_is_deterministic() {
    let opts = LayoutOptions::default();
    let first = compute_positions(&seed(), &opts).unwrap();
    for _ in 0..10 {
        assert_eq!(compute_positions(&seed(), &opts).unwrap(), first);
    }
}

#[test]
fn layout_keeps_input_order_and_gives_every_node_a_finite_position() {
    let nodes = seed();
    let out = layout(nodes.clone(), &LayoutOptions::default()).unwrap();
    assert_eq!(out.len(), nodes.len());
    for (p, n) in out.iter().zip(&nodes) {
        assert_eq!(p.node, *n);
        assert!(p.position.is_finite());
    }
}

#[test]
fn layout_rejects_dangling_parent_references() {
    let nodes = [("a", None::<&str>), ("b", Some("ghost"))];
    let err = compute_positions(&nodes, &LayoutOptions::default()).unwrap_err();
    assert_eq!(
        err,
        Error::DanglingReference {
            node: "b".to_string(),
            parent: "ghost".to_string(),
        }
    );
}

#[test]
fn layout_rejects_duplicate_ids() {
    let nodes = [("a", None::<&str>), ("a", None::<&str>)];
    let err = compute_positions(&nodes, &LayoutOptions::default()).unwrap_err();
    assert_eq!(err, Error::DuplicateId { id: "a".to_string() });
}

#[test]
fn layout_rejects_parent_cycles() {
    let nodes = [("a", Some("c")), ("b", Some("a")), ("c", Some("b"))];
    let err = compute_positions(&nodes, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Cycle { ref nodes } if nodes.len() == 3));

    let nodes = [("self", Some("self"))];
    let err = compute_positions(&nodes, &LayoutOptions::default()).unwrap_err();
    assert_eq!(err, Error::Cycle { nodes: vec!["self".to_string()] });
}

#[test]
fn layout_rejects_non_finite_size_hints() {
    let opts = LayoutOptions {
        node_width: f64::NAN,
        ..Default::default()
    };
    let err = compute_positions(&[("a", None::<&str>)], &opts).unwrap_err();
    assert!(matches!(err, Error::InvalidSize { .. }));
}

#[test]
fn layout_applies_margins() {
    let opts = LayoutOptions {
        node_width: 10.0,
        node_height: 10.0,
        marginx: 7.0,
        marginy: 3.0,
        ..Default::default()
    };
    let p = compute_positions(&[("a", None::<&str>)], &opts).unwrap();
    assert_eq!(p, vec![Point::new(12.0, 8.0)]);
}

#[test]
fn layout_bottom_to_top_puts_children_above_parents() {
    let opts = LayoutOptions {
        rankdir: RankDir::BT,
        ..Default::default()
    };
    let c = coords(&[("a", None::<&str>), ("b", Some("a"))], &opts);
    assert!(c["b"].1 < c["a"].1);
    assert_eq!(c["b"].1, 50.0);
}

#[test]
fn layout_left_to_right_spreads_ranks_along_x() {
    let opts = LayoutOptions {
        rankdir: RankDir::LR,
        node_width: 40.0,
        node_height: 20.0,
        ranksep: 10.0,
        ..Default::default()
    };
    let c = coords(&[("a", None::<&str>), ("b", Some("a"))], &opts);
    assert_eq!(c["a"], (20.0, 10.0));
    assert_eq!(c["b"], (40.0 + 10.0 + 20.0, 10.0));
}

#[test]
fn layout_handles_very_long_parent_chains() {
    let ids: Vec<String> = (0..20_000).map(|i| format!("n{i}")).collect();
    let nodes: Vec<(&str, Option<&str>)> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i.checked_sub(1).map(|p| ids[p].as_str())))
        .collect();

    let positions = compute_positions(&nodes, &LayoutOptions::default()).unwrap();
    assert_eq!(positions.len(), 20_000);
    assert!(positions.iter().all(|p| p.x == 125.0));
    assert_eq!(positions[0], Point::new(125.0, 50.0));
    assert_eq!(positions[19_999], Point::new(125.0, 19_999.0 * 150.0 + 50.0));
}
