use crate::model::LayoutGraph;
use rustc_hash::FxHashMap as HashMap;

/// Weighted number of edge crossings between consecutive layers.
pub fn cross_count(g: &LayoutGraph, layering: &[Vec<String>]) -> f64 {
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

/// Sweeps the upper layer left to right. An edge landing at south slot `p` crosses every
/// edge already swept that lands strictly right of `p`.
fn two_layer_cross_count(g: &LayoutGraph, north: &[String], south: &[String]) -> f64 {
    if north.is_empty() || south.is_empty() {
        return 0.0;
    }

    let slot: HashMap<&str, usize> = south
        .iter()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect();

    let mut swept = WeightTree::new(south.len());
    let mut crossings: f64 = 0.0;
    for v in north {
        let mut targets: Vec<(usize, f64)> = g
            .out_edges(v)
            .into_iter()
            .filter_map(|e| {
                let p = *slot.get(e.w.as_str())?;
                Some((p, g.edge(&e.v, &e.w).map_or(1.0, |l| l.weight)))
            })
            .collect();
        targets.sort_by_key(|&(p, _)| p);

        for (p, weight) in targets {
            crossings += weight * swept.right_of(p);
            swept.add(p, weight);
        }
    }
    crossings
}

/// Fenwick tree of edge weight per south slot.
struct WeightTree {
    sums: Vec<f64>,
    total: f64,
}

impl WeightTree {
    fn new(slots: usize) -> Self {
        Self {
            sums: vec![0.0; slots + 1],
            total: 0.0,
        }
    }

    fn add(&mut self, slot: usize, weight: f64) {
        self.total += weight;
        let mut i = slot + 1;
        while i < self.sums.len() {
            self.sums[i] += weight;
            i += i & i.wrapping_neg();
        }
    }

    /// Weight stored in slots `> slot`.
    fn right_of(&self, slot: usize) -> f64 {
        let mut upto: f64 = 0.0;
        let mut i = slot + 1;
        while i > 0 {
            upto += self.sums[i];
            i &= i - 1;
        }
        self.total - upto
    }
}
