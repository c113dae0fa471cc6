use flowboard_layout::order::{BarycenterEntry, Relationship, barycenter, cross_count, init_order, order, sort_layer};
use flowboard_layout::{EdgeLabel, LayoutGraph, NodeLabel, rank};

fn ranked(edges: &[(&str, &str)]) -> LayoutGraph {
    let mut g = LayoutGraph::new();
    for (v, w) in edges {
        g.set_edge(*v, *w);
    }
    rank::longest_path(&mut g).unwrap();
    g
}

fn layer(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn entry(v: &str, barycenter: Option<f64>) -> BarycenterEntry {
    BarycenterEntry {
        v: v.to_string(),
        barycenter,
        weight: barycenter.map(|_| 1.0),
    }
}

#[test]
fn init_order_keeps_subtrees_contiguous() {
    let g = ranked(&[("r", "a"), ("r", "b"), ("a", "a1"), ("b", "b1"), ("a", "a2")]);

    assert_eq!(
        init_order(&g),
        vec![layer(&["r"]), layer(&["a", "b"]), layer(&["a1", "a2", "b1"])]
    );
}

#[test]
fn init_order_of_an_unranked_graph_is_empty() {
    let mut g = LayoutGraph::new();
    g.set_node("a", NodeLabel::default());
    assert!(init_order(&g).is_empty());
}

#[test]
fn cross_count_is_zero_for_parallel_edges() {
    let g = ranked(&[("a1", "b1"), ("a2", "b2")]);
    assert_eq!(cross_count(&g, &[layer(&["a1", "a2"]), layer(&["b1", "b2"])]), 0.0);
}

#[test]
fn cross_count_counts_a_single_crossing() {
    let g = ranked(&[("a1", "b1"), ("a2", "b2")]);
    assert_eq!(cross_count(&g, &[layer(&["a1", "a2"]), layer(&["b2", "b1"])]), 1.0);
}

#[test]
fn cross_count_ignores_shared_endpoints_and_counts_every_pair() {
    let g = ranked(&[("a1", "b1"), ("a2", "b1")]);
    assert_eq!(cross_count(&g, &[layer(&["a1", "a2"]), layer(&["b1"])]), 0.0);

    let mut edges = Vec::new();
    for v in ["a1", "a2", "a3"] {
        for w in ["b1", "b2", "b3"] {
            edges.push((v, w));
        }
    }
    let g = ranked(&edges);
    let layering = [layer(&["a1", "a2", "a3"]), layer(&["b1", "b2", "b3"])];
    assert_eq!(cross_count(&g, &layering), 9.0);
}

#[test]
fn cross_count_multiplies_edge_weights() {
    let mut g = LayoutGraph::new();
    g.set_edge_with_label("a1", "b2", EdgeLabel { minlen: 1, weight: 2.0 });
    g.set_edge_with_label("a2", "b1", EdgeLabel { minlen: 1, weight: 3.0 });
    rank::longest_path(&mut g).unwrap();
    assert_eq!(cross_count(&g, &[layer(&["a1", "a2"]), layer(&["b1", "b2"])]), 6.0);
}

#[test]
fn cross_count_handles_multiple_layers() {
    let g = ranked(&[("a1", "b1"), ("b1", "c1"), ("a2", "b2"), ("b2", "c2")]);
    let layering = [
        layer(&["a1", "a2"]),
        layer(&["b2", "b1"]),
        layer(&["c1", "c2"]),
    ];
    assert_eq!(cross_count(&g, &layering), 2.0);
}

#[test]
fn barycenter_is_the_mean_order_of_predecessors() {
    let mut g = ranked(&[("a", "x"), ("b", "x"), ("c", "y")]);
    for (v, o) in [("a", 0), ("b", 1), ("c", 2)] {
        g.node_mut(v).unwrap().order = Some(o);
    }

    let entries = barycenter(&g, &layer(&["x", "y"]), Relationship::InEdges);
    assert_eq!(entries[0].barycenter, Some(0.5));
    assert_eq!(entries[0].weight, Some(2.0));
    assert_eq!(entries[1].barycenter, Some(2.0));
}

#[test]
fn barycenter_is_none_without_neighbours() {
    let g = ranked(&[("a", "x")]);
    let entries = barycenter(&g, &layer(&["a"]), Relationship::InEdges);
    assert_eq!(entries, vec![entry("a", None)]);
}

#[test]
fn sort_layer_keeps_unsortable_nodes_in_place() {
    let entries = [
        entry("a", Some(3.0)),
        entry("fixed", None),
        entry("b", Some(1.0)),
    ];
    assert_eq!(sort_layer(&entries, false), layer(&["b", "fixed", "a"]));
}

#[test]
fn sort_layer_breaks_ties_by_position_and_bias() {
    let entries = [entry("a", Some(1.0)), entry("b", Some(1.0))];
    assert_eq!(sort_layer(&entries, false), layer(&["a", "b"]));
    assert_eq!(sort_layer(&entries, true), layer(&["b", "a"]));
}

#[test]
fn order_removes_crossings_left_by_the_initial_order() {
    let mut g = ranked(&[("a", "x"), ("b", "x"), ("a", "z"), ("b", "y")]);
    let initial = init_order(&g);
    assert_eq!(initial[1], layer(&["x", "z", "y"]));
    assert_eq!(cross_count(&g, &initial), 1.0);

    order(&mut g, 4);

    let order_of = |v: &str| g.node(v).unwrap().order;
    assert_eq!(order_of("a"), Some(0));
    assert_eq!(order_of("b"), Some(1));
    assert_eq!(order_of("z"), Some(0));
    assert_eq!(order_of("x"), Some(1));
    assert_eq!(order_of("y"), Some(2));
}

#[test]
fn order_is_a_no_op_for_a_crossing_free_tree() {
    let mut g = ranked(&[("r", "a"), ("r", "b"), ("a", "a1")]);
    order(&mut g, 4);

    assert_eq!(g.node("a").unwrap().order, Some(0));
    assert_eq!(g.node("b").unwrap().order, Some(1));
    assert_eq!(g.node("a1").unwrap().order, Some(0));
}
