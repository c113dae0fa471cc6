use super::{barycenter, cross_count, init_order, sort_layer};
use crate::model::LayoutGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    InEdges,
    OutEdges,
}

/// Assigns `order` to every ranked node.
///
/// `passes` bounds how many consecutive sweeps may fail to improve the crossing count before
/// the best layering seen so far is committed.
pub fn order(g: &mut LayoutGraph, passes: usize) {
    let Some(max_rank) = crate::rank::max_rank(g) else {
        return;
    };

    let layering = init_order(g);
    assign_order(g, &layering);

    let mut best_cc = cross_count(g, &layering);
    let mut best_layering = layering;

    let mut i: usize = 0;
    let mut last_best: usize = 0;
    while last_best < passes && best_cc > 0.0 {
        let use_down = i % 2 == 1;
        let bias_right = i % 4 >= 2;

        let mut layers = build_layer_matrix(g, max_rank);
        if use_down {
            for r in 1..layers.len() {
                sweep_layer(g, &mut layers[r], Relationship::InEdges, bias_right);
            }
        } else {
            for r in (0..layers.len().saturating_sub(1)).rev() {
                sweep_layer(g, &mut layers[r], Relationship::OutEdges, bias_right);
            }
        }

        let cc = cross_count(g, &layers);
        tracing::trace!(pass = i, crossings = cc, "order sweep");
        if cc < best_cc {
            last_best = 0;
            best_cc = cc;
            best_layering = layers;
        }

        i += 1;
        last_best += 1;
    }

    assign_order(g, &best_layering);
}

fn sweep_layer(g: &mut LayoutGraph, layer: &mut Vec<String>, rel: Relationship, bias_right: bool) {
    let entries = barycenter(g, layer, rel);
    *layer = sort_layer(&entries, bias_right);
    for (i, v) in layer.iter().enumerate() {
        if let Some(n) = g.node_mut(v) {
            n.order = Some(i);
        }
    }
}

fn assign_order(g: &mut LayoutGraph, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}

pub(crate) fn build_layer_matrix(g: &LayoutGraph, max_rank: i32) -> Vec<Vec<String>> {
    let mut layers: Vec<Vec<(usize, String)>> = vec![Vec::new(); (max_rank + 1).max(0) as usize];
    for v in g.nodes() {
        let Some(node) = g.node(v) else {
            continue;
        };
        let (Some(rank), Some(order)) = (node.rank, node.order) else {
            continue;
        };
        if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
            layer.push((order, v.to_string()));
        }
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(o, _)| *o);
            layer.into_iter().map(|(_, v)| v).collect()
        })
        .collect()
}
