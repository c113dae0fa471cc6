#![forbid(unsafe_code)]

//! Layered graph layout for flow graphs described by parent pointers.
//!
//! The pipeline is a compact Sugiyama-style layout: build a DAG from parent pointers
//! (parent -> child), assign ranks by longest path from the roots, reduce crossings with
//! barycenter sweeps, then assign coordinates. Positions are node centers in canvas space.

pub use flowboard_graphlib as graphlib;

pub mod coordinate_system;
pub mod error;
pub mod graph;
pub mod model;
pub mod order;
pub mod position;
pub mod rank;

pub use error::{Error, Result};
pub use model::{EdgeLabel, LayoutGraph, LayoutOptions, NodeLabel, Point, RankDir};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Anything that can be placed by [`layout`]: a string id plus an optional parent id from the
/// same id space.
pub trait LayoutNode {
    fn layout_id(&self) -> &str;
    fn layout_parent(&self) -> Option<&str>;
}

impl<T: LayoutNode + ?Sized> LayoutNode for &T {
    fn layout_id(&self) -> &str {
        (**self).layout_id()
    }

    fn layout_parent(&self) -> Option<&str> {
        (**self).layout_parent()
    }
}

impl LayoutNode for (&str, Option<&str>) {
    fn layout_id(&self) -> &str {
        self.0
    }

    fn layout_parent(&self) -> Option<&str> {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Positioned<T> {
    pub node: T,
    pub position: Point,
}

/// Lays out `nodes` and returns them, in input order, paired with their positions.
pub fn layout<T: LayoutNode>(nodes: Vec<T>, opts: &LayoutOptions) -> Result<Vec<Positioned<T>>> {
    let positions = compute_positions(&nodes, opts)?;
    Ok(nodes
        .into_iter()
        .zip(positions)
        .map(|(node, position)| Positioned { node, position })
        .collect())
}

/// Computes one position per input node, in input order.
pub fn compute_positions<T: LayoutNode>(nodes: &[T], opts: &LayoutOptions) -> Result<Vec<Point>> {
    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    let mut g = graph::build_graph(nodes, opts)?;
    run(&mut g, opts)?;

    let mut out: Vec<Point> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let id = node.layout_id();
        let label = g.node(id);
        let x = label.and_then(|n| n.x).unwrap_or(opts.marginx);
        let y = label.and_then(|n| n.y).unwrap_or(opts.marginy);
        out.push(Point { x, y });
    }
    tracing::debug!(nodes = out.len(), rankdir = ?opts.rankdir, "layout complete");
    Ok(out)
}

/// Runs the ranking, ordering and positioning stages on an already built graph.
pub fn run(g: &mut LayoutGraph, opts: &LayoutOptions) -> Result<()> {
    coordinate_system::adjust(g, opts.rankdir);
    rank::longest_path(g)?;
    order::order(g, opts.order_passes);
    position::position(g, opts);
    coordinate_system::undo(g, opts.rankdir);
    position::translate(g, opts);
    Ok(())
}
