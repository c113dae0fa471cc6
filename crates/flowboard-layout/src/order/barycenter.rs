use super::Relationship;
use crate::model::LayoutGraph;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Weighted mean `order` of each node's neighbours on the adjacent fixed layer.
pub fn barycenter(
    g: &LayoutGraph,
    movable: &[String],
    relationship: Relationship,
) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|v| {
            let edges = match relationship {
                Relationship::InEdges => g.in_edges(v),
                Relationship::OutEdges => g.out_edges(v),
            };
            if edges.is_empty() {
                return BarycenterEntry {
                    v: v.clone(),
                    barycenter: None,
                    weight: None,
                };
            }

            let mut sum: f64 = 0.0;
            let mut weight: f64 = 0.0;
            for e in &edges {
                let u = match relationship {
                    Relationship::InEdges => &e.v,
                    Relationship::OutEdges => &e.w,
                };
                let edge_weight = g.edge(&e.v, &e.w).map(|l| l.weight).unwrap_or(1.0);
                let u_order = g.node(u).and_then(|n| n.order).unwrap_or(0) as f64;
                sum += edge_weight * u_order;
                weight += edge_weight;
            }

            BarycenterEntry {
                v: v.clone(),
                barycenter: (weight > 0.0).then(|| sum / weight),
                weight: Some(weight),
            }
        })
        .collect()
}

/// Reorders one layer by barycenter. Nodes without a barycenter keep their slot; the rest
/// fill the remaining slots sorted by barycenter, ties broken by the current position
/// (reversed when `bias_right`).
pub fn sort_layer(entries: &[BarycenterEntry], bias_right: bool) -> Vec<String> {
    let mut sortable: Vec<(usize, f64)> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.barycenter.map(|bc| (i, bc)))
        .collect();
    sortable.sort_by(|(ia, a), (ib, b)| {
        a.partial_cmp(b).unwrap_or(Ordering::Equal).then_with(|| {
            if bias_right {
                ib.cmp(ia)
            } else {
                ia.cmp(ib)
            }
        })
    });

    let mut out: Vec<Option<String>> = entries
        .iter()
        .map(|e| e.barycenter.is_none().then(|| e.v.clone()))
        .collect();
    let mut next = sortable.into_iter();
    for slot in out.iter_mut().filter(|s| s.is_none()) {
        if let Some((i, _)) = next.next() {
            *slot = Some(entries[i].v.clone());
        }
    }
    out.into_iter().flatten().collect()
}
