//! Rank assignment.

use crate::error::{Error, Result};
use crate::model::LayoutGraph;
use flowboard_graphlib::alg;

/// Longest path from the roots: roots (and isolated nodes) get rank 0, every other node sits
/// `minlen` below its deepest predecessor.
pub fn longest_path(g: &mut LayoutGraph) -> Result<()> {
    let topo = alg::topsort(g).map_err(|e| Error::Cycle { nodes: e.remaining })?;

    for v in &topo {
        let mut rank: i32 = 0;
        for e in g.in_edges(v) {
            let minlen = g.edge(&e.v, &e.w).map(|l| l.minlen).unwrap_or(1).max(1) as i32;
            let pred = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
            rank = rank.max(pred + minlen);
        }
        if let Some(label) = g.node_mut(v) {
            label.rank = Some(rank);
        }
    }
    Ok(())
}

pub fn max_rank(g: &LayoutGraph) -> Option<i32> {
    g.nodes()
        .filter_map(|v| g.node(v).and_then(|n| n.rank))
        .max()
}
