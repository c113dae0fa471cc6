use crate::model::LayoutGraph;
use rustc_hash::FxHashSet as HashSet;

/// Layers filled by a depth-first walk that starts from nodes sorted by (rank, insertion
/// order), so subtrees stay contiguous within every layer.
pub fn init_order(g: &LayoutGraph) -> Vec<Vec<String>> {
    let Some(max_rank) = crate::rank::max_rank(g) else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); (max_rank + 1).max(0) as usize];

    let mut start: Vec<&str> = g.nodes().collect();
    // `sort_by_key` is stable, so insertion order breaks rank ties.
    start.sort_by_key(|v| g.node(v).and_then(|n| n.rank).unwrap_or(i32::MAX));

    // Successors are pushed in reverse so they pop in edge order.
    let mut visited: HashSet<&str> = HashSet::default();
    let mut stack: Vec<&str> = Vec::new();
    for root in start {
        stack.push(root);
        while let Some(v) = stack.pop() {
            if !visited.insert(v) {
                continue;
            }
            let Some(rank) = g.node(v).and_then(|n| n.rank) else {
                continue;
            };
            if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
                layer.push(v.to_string());
            }
            stack.extend(g.successors(v).into_iter().rev());
        }
    }
    layers
}
