//! Graph container APIs used by `flowboard-layout`.
//!
//! Nodes and edges are kept in insertion order. Every iterator and helper in this crate walks
//! that order, so two graphs built from the same sequence of calls behave identically.

use rustc_hash::FxBuildHasher;
use std::hash::{Hash, Hasher};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
        }
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w
    }
}

impl Eq for EdgeKey {}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.hash(state);
        self.w.hash(state);
    }
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    label: E,
}

/// A simple directed graph (no multi-edges, no compound nodes).
#[derive(Debug, Clone)]
pub struct Graph<N, E>
where
    N: Default,
    E: Default,
{
    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    out: HashMap<String, Vec<usize>>,
    in_: HashMap<String, Vec<usize>>,
}

impl<N, E> Default for Graph<N, E>
where
    N: Default,
    E: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E>
where
    N: Default,
    E: Default,
{
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            out: HashMap::default(),
            in_: HashMap::default(),
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        self.set_node(id, N::default())
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    /// Position of `id` in insertion order.
    pub fn node_position(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_with_label(v, w, E::default())
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        let key = EdgeKey::new(v, w);
        if let Some(&idx) = self.edge_index.get(&key) {
            self.edges[idx].label = label;
            return self;
        }

        self.ensure_node(key.v.clone());
        self.ensure_node(key.w.clone());

        let idx = self.edges.len();
        self.out.entry(key.v.clone()).or_default().push(idx);
        self.in_.entry(key.w.clone()).or_default().push(idx);
        self.edge_index.insert(key.clone(), idx);
        self.edges.push(EdgeEntry { key, label });
        self
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        self.edge_index.contains_key(&EdgeKey::new(v, w))
    }

    pub fn edge(&self, v: &str, w: &str) -> Option<&E> {
        self.edge_index
            .get(&EdgeKey::new(v, w))
            .map(|&idx| &self.edges[idx].label)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn out_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.out
            .get(v)
            .map(|idxs| idxs.iter().map(|&i| self.edges[i].key.clone()).collect())
            .unwrap_or_default()
    }

    pub fn in_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.in_
            .get(v)
            .map(|idxs| idxs.iter().map(|&i| self.edges[i].key.clone()).collect())
            .unwrap_or_default()
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        self.out
            .get(v)
            .map(|idxs| idxs.iter().map(|&i| self.edges[i].key.w.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        self.in_
            .get(v)
            .map(|idxs| idxs.iter().map(|&i| self.edges[i].key.v.as_str()).collect())
            .unwrap_or_default()
    }

    /// Nodes without incoming edges, in insertion order.
    pub fn sources(&self) -> Vec<&str> {
        self.nodes()
            .filter(|v| self.in_.get(*v).is_none_or(|e| e.is_empty()))
            .collect()
    }

    /// Nodes without outgoing edges, in insertion order.
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes()
            .filter(|v| self.out.get(*v).is_none_or(|e| e.is_empty()))
            .collect()
    }
}

pub mod alg {
    use super::Graph;
    use std::collections::{BTreeMap, BTreeSet, VecDeque};
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CycleError {
        /// Nodes that could not be ordered, in insertion order.
        pub remaining: Vec<String>,
    }

    impl fmt::Display for CycleError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "graph has at least one cycle: {}", self.remaining.join(", "))
        }
    }

    impl std::error::Error for CycleError {}

    /// Kahn topological order. Ties are broken by insertion order.
    pub fn topsort<N, E>(g: &Graph<N, E>) -> Result<Vec<String>, CycleError>
    where
        N: Default,
        E: Default,
    {
        let mut indegree: BTreeMap<usize, usize> = BTreeMap::new();
        for v in g.nodes() {
            let pos = g.node_position(v).unwrap_or(usize::MAX);
            indegree.insert(pos, g.predecessors(v).len());
        }

        let ids = g.node_ids();
        let mut queue: VecDeque<usize> = indegree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(pos, _)| *pos)
            .collect();

        let mut out: Vec<String> = Vec::with_capacity(ids.len());
        while let Some(pos) = queue.pop_front() {
            let v = &ids[pos];
            out.push(v.clone());
            for w in g.successors(v) {
                let Some(w_pos) = g.node_position(w) else {
                    continue;
                };
                if let Some(d) = indegree.get_mut(&w_pos) {
                    *d = d.saturating_sub(1);
                    if *d == 0 {
                        queue.push_back(w_pos);
                    }
                }
            }
        }

        if out.len() != ids.len() {
            let done: BTreeSet<&str> = out.iter().map(|s| s.as_str()).collect();
            let remaining = ids
                .iter()
                .filter(|v| !done.contains(v.as_str()))
                .cloned()
                .collect();
            return Err(CycleError { remaining });
        }
        Ok(out)
    }

    /// Strongly connected components (Tarjan) of size > 1, plus self-loops.
    ///
    /// The walk keeps its own frame stack, so long parent chains cannot exhaust the call
    /// stack.
    pub fn find_cycles<N, E>(g: &Graph<N, E>) -> Vec<Vec<String>>
    where
        N: Default,
        E: Default,
    {
        let mut next_index: usize = 0;
        let mut indices: BTreeMap<&str, usize> = BTreeMap::new();
        let mut lowlink: BTreeMap<&str, usize> = BTreeMap::new();
        let mut stack: Vec<&str> = Vec::new();
        let mut on_stack: BTreeSet<&str> = BTreeSet::new();
        let mut sccs: Vec<Vec<String>> = Vec::new();

        for root in g.nodes() {
            if indices.contains_key(&root) {
                continue;
            }

            // (node, successors, next successor to visit)
            let mut frames: Vec<(&str, Vec<&str>, usize)> = Vec::new();
            indices.insert(root, next_index);
            lowlink.insert(root, next_index);
            next_index += 1;
            stack.push(root);
            on_stack.insert(root);
            frames.push((root, g.successors(root), 0));

            loop {
                let Some((v, succs, next)) = frames.last_mut() else {
                    break;
                };
                let v: &str = *v;
                let w = succs.get(*next).copied();
                if w.is_some() {
                    *next += 1;
                }

                match w {
                    Some(w) if !indices.contains_key(&w) => {
                        indices.insert(w, next_index);
                        lowlink.insert(w, next_index);
                        next_index += 1;
                        stack.push(w);
                        on_stack.insert(w);
                        frames.push((w, g.successors(w), 0));
                    }
                    Some(w) => {
                        if on_stack.contains(&w) {
                            let low = lowlink[&v].min(indices[&w]);
                            lowlink.insert(v, low);
                        }
                    }
                    None => {
                        frames.pop();
                        if let Some(&(parent, _, _)) = frames.last() {
                            let low = lowlink[&parent].min(lowlink[&v]);
                            lowlink.insert(parent, low);
                        }
                        if lowlink[&v] == indices[&v] {
                            let mut scc: Vec<String> = Vec::new();
                            while let Some(u) = stack.pop() {
                                on_stack.remove(&u);
                                scc.push(u.to_string());
                                if u == v {
                                    break;
                                }
                            }
                            sccs.push(scc);
                        }
                    }
                }
            }
        }

        let mut cycles: Vec<Vec<String>> = Vec::new();
        for mut scc in sccs {
            if scc.len() > 1 {
                scc.sort_by_key(|v| g.node_position(v).unwrap_or(usize::MAX));
                cycles.push(scc);
            } else if g.has_edge(&scc[0], &scc[0]) {
                cycles.push(scc);
            }
        }

        cycles.sort_by_key(|c| {
            c.first()
                .and_then(|v| g.node_position(v))
                .unwrap_or(usize::MAX)
        });
        cycles
    }
}
