//! Turns a parent-pointer node list into a layout graph.
//!
//! Edges run parent -> child, so with `RankDir::TB` every child lands below its parent.

use crate::error::{Error, Result};
use crate::model::{EdgeLabel, LayoutGraph, LayoutOptions, NodeLabel};
use crate::LayoutNode;
use flowboard_graphlib::alg;
use rustc_hash::FxHashSet as HashSet;

pub fn build_graph<T: LayoutNode>(nodes: &[T], opts: &LayoutOptions) -> Result<LayoutGraph> {
    let (width, height) = (opts.node_width, opts.node_height);
    if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
        return Err(Error::InvalidSize { width, height });
    }

    let mut ids: HashSet<&str> = HashSet::default();
    for node in nodes {
        if !ids.insert(node.layout_id()) {
            return Err(Error::DuplicateId {
                id: node.layout_id().to_string(),
            });
        }
    }

    let mut g = LayoutGraph::new();
    for node in nodes {
        g.set_node(
            node.layout_id(),
            NodeLabel {
                width,
                height,
                ..Default::default()
            },
        );
    }

    for node in nodes {
        let Some(parent) = node.layout_parent() else {
            continue;
        };
        if !ids.contains(parent) {
            return Err(Error::DanglingReference {
                node: node.layout_id().to_string(),
                parent: parent.to_string(),
            });
        }
        g.set_edge_with_label(parent, node.layout_id(), EdgeLabel::default());
    }

    if let Some(cycle) = alg::find_cycles(&g).into_iter().next() {
        return Err(Error::Cycle { nodes: cycle });
    }

    Ok(g)
}
