//! Coordinate assignment.
//!
//! `y` follows the rank: every rank is as tall as its tallest node and ranks are `ranksep`
//! apart. `x` starts from a packed row per rank and is then refined by two sweeps: a
//! down-sweep pulling every node under the mean of its parents and an up-sweep centering
//! every parent over its children. Each placement keeps at least `nodesep` to the left
//! neighbour, so nodes of one rank never overlap.

use crate::model::{LayoutGraph, LayoutOptions};
use crate::order::{Relationship, build_layer_matrix};

pub fn position(g: &mut LayoutGraph, opts: &LayoutOptions) {
    let Some(max_rank) = crate::rank::max_rank(g) else {
        return;
    };
    let layers = build_layer_matrix(g, max_rank);

    assign_y(g, &layers, opts.ranksep);
    pack_x(g, &layers, opts.nodesep);

    for layer in layers.iter().skip(1) {
        align_layer(g, layer, Relationship::InEdges, opts.nodesep);
    }
    for layer in layers.iter().rev().skip(1) {
        align_layer(g, layer, Relationship::OutEdges, opts.nodesep);
    }
}

fn size(g: &LayoutGraph, v: &str) -> (f64, f64) {
    g.node(v).map(|n| (n.width, n.height)).unwrap_or((0.0, 0.0))
}

fn assign_y(g: &mut LayoutGraph, layers: &[Vec<String>], rank_sep: f64) {
    let mut y_cursor: f64 = 0.0;
    for layer in layers {
        let rank_h = layer
            .iter()
            .map(|v| size(g, v).1)
            .fold(0.0_f64, f64::max);
        for v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(y_cursor + rank_h / 2.0);
            }
        }
        y_cursor += rank_h + rank_sep;
    }
}

fn pack_x(g: &mut LayoutGraph, layers: &[Vec<String>], node_sep: f64) {
    for layer in layers {
        let mut x_cursor: f64 = 0.0;
        for v in layer {
            let (w, _) = size(g, v);
            if let Some(n) = g.node_mut(v) {
                n.x = Some(x_cursor + w / 2.0);
            }
            x_cursor += w + node_sep;
        }
    }
}

/// Moves each node of `layer` toward the mean `x` of its neighbours on the adjacent layer,
/// left to right, never closer than `node_sep` to the previously placed node.
fn align_layer(g: &mut LayoutGraph, layer: &[String], rel: Relationship, node_sep: f64) {
    let mut prev_right: Option<f64> = None;
    for v in layer {
        let neighbours = match rel {
            Relationship::InEdges => g.predecessors(v),
            Relationship::OutEdges => g.successors(v),
        };
        let xs: Vec<f64> = neighbours
            .iter()
            .filter_map(|u| g.node(u).and_then(|n| n.x))
            .collect();
        let current = g.node(v).and_then(|n| n.x).unwrap_or(0.0);
        let desired = if xs.is_empty() {
            current
        } else {
            xs.iter().sum::<f64>() / xs.len() as f64
        };

        let (w, _) = size(g, v);
        let x = match prev_right {
            Some(right) => desired.max(right + node_sep + w / 2.0),
            None => desired,
        };
        if let Some(n) = g.node_mut(v) {
            n.x = Some(x);
        }
        prev_right = Some(x + w / 2.0);
    }
}

/// Shifts everything so the bounding box starts at (`marginx`, `marginy`).
pub fn translate(g: &mut LayoutGraph, opts: &LayoutOptions) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for v in g.nodes() {
        let Some(n) = g.node(v) else {
            continue;
        };
        if let (Some(x), Some(y)) = (n.x, n.y) {
            min_x = min_x.min(x - n.width / 2.0);
            min_y = min_y.min(y - n.height / 2.0);
        }
    }
    if !min_x.is_finite() || !min_y.is_finite() {
        return;
    }

    let dx = opts.marginx - min_x;
    let dy = opts.marginy - min_y;
    for v in g.node_ids() {
        if let Some(n) = g.node_mut(&v) {
            n.x = n.x.map(|x| x + dx);
            n.y = n.y.map(|y| y + dy);
        }
    }
}
