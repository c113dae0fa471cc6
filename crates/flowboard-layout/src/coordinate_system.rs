//! Rank-direction transforms.
//!
//! The pipeline always lays out top-to-bottom. `adjust` prepares the graph for the requested
//! direction and `undo` maps the computed coordinates back.

use crate::model::{LayoutGraph, RankDir};

pub fn adjust(g: &mut LayoutGraph, rankdir: RankDir) {
    match rankdir {
        RankDir::LR | RankDir::RL => swap_width_height(g),
        RankDir::TB | RankDir::BT => {}
    }
}

pub fn undo(g: &mut LayoutGraph, rankdir: RankDir) {
    match rankdir {
        RankDir::BT | RankDir::RL => reverse_y(g),
        RankDir::TB | RankDir::LR => {}
    }

    match rankdir {
        RankDir::LR | RankDir::RL => {
            swap_xy(g);
            swap_width_height(g);
        }
        RankDir::TB | RankDir::BT => {}
    }
}

fn swap_width_height(g: &mut LayoutGraph) {
    for id in g.node_ids() {
        if let Some(n) = g.node_mut(&id) {
            (n.width, n.height) = (n.height, n.width);
        }
    }
}

fn reverse_y(g: &mut LayoutGraph) {
    for id in g.node_ids() {
        if let Some(n) = g.node_mut(&id) {
            n.y = n.y.map(|y| -y);
        }
    }
}

fn swap_xy(g: &mut LayoutGraph) {
    for id in g.node_ids() {
        if let Some(n) = g.node_mut(&id) {
            if let (Some(x), Some(y)) = (n.x, n.y) {
                n.x = Some(y);
                n.y = Some(x);
            }
        }
    }
}
