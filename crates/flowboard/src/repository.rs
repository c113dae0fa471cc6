//! The canonical node collection.
//!
//! `NodeRepository` owns every node (insertion ordered) and the edges derived from their
//! parent pointers. All mutation goes through its operations, which validate before touching
//! state and rebuild the edge list after every structural change.

use crate::error::{Error, Result};
use crate::model::{BusinessHours, Edge, Node, NodeData, NodeId, NodeKind};
use chrono::NaiveTime;
use flowboard_layout::{LayoutOptions, Point};
use indexmap::IndexMap;
use rustc_hash::FxHashSet as HashSet;
use serde::Deserialize;
use serde_json::Value;

/// A partial update of one node's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Option<NodeData>,
}

impl NodePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            data: None,
        }
    }

    pub fn data(data: NodeData) -> Self {
        Self {
            name: None,
            data: Some(data),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.data.is_none()
    }

    /// Decodes a patch coming from an untyped caller. Anything that is not an object made of
    /// `name` / `data` (an event object, a bare string, ...) is rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::invalid("update_node", "patch must be a JSON object"));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| Error::invalid("update_node", format!("malformed patch: {e}")))
    }
}

#[derive(Debug, Clone)]
pub struct NodeRepository {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    duplicate_offset: Point,
}

impl Default for NodeRepository {
    fn default() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            duplicate_offset: Point::new(40.0, 120.0),
        }
    }
}

impl NodeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from a node list, rejecting duplicate ids, dangling parents and
    /// parent cycles.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self> {
        flowboard_layout::graph::build_graph(&nodes, &LayoutOptions::default())?;

        let mut repo = Self::new();
        repo.nodes = nodes.into_iter().map(|n| (n.id.clone(), n)).collect();
        repo.refresh_edges();
        tracing::debug!(nodes = repo.nodes.len(), edges = repo.edges.len(), "repository loaded");
        Ok(repo)
    }

    pub fn with_duplicate_offset(mut self, offset: Point) -> Self {
        self.duplicate_offset = offset;
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Result<&Node> {
        self.nodes.get(id).ok_or_else(|| Error::not_found("node", id))
    }

    /// Lookup restricted to one kind; a node of another kind counts as not found.
    pub fn find_by_id(&self, kind: NodeKind, id: &str) -> Result<&Node> {
        match self.nodes.get(id) {
            Some(node) if node.kind() == kind => Ok(node),
            _ => Err(Error::not_found(kind.as_str(), id)),
        }
    }

    /// Every node of `kind`, in order. An empty category is an error.
    pub fn find_all(&self, kind: NodeKind) -> Result<Vec<&Node>> {
        let found: Vec<&Node> = self.nodes.values().filter(|n| n.kind() == kind).collect();
        if found.is_empty() {
            return Err(Error::not_found(kind.as_str(), "*"));
        }
        Ok(found)
    }

    pub fn children(&self, id: &str) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| n.parent.as_ref().is_some_and(|p| p == id))
            .collect()
    }

    /// Connector children of a business-hours node.
    pub fn connectors(&self, date_time_id: &str) -> Result<Vec<&Node>> {
        self.find_by_id(NodeKind::DateTime, date_time_id)?;
        Ok(self
            .children(date_time_id)
            .into_iter()
            .filter(|n| n.kind() == NodeKind::DateTimeConnector)
            .collect())
    }

    pub fn add_node(&mut self, node: Node) -> Result<NodeId> {
        if self.nodes.contains_key(node.id.as_str()) {
            return Err(Error::DuplicateId {
                id: node.id.to_string(),
            });
        }
        if let Some(parent) = &node.parent {
            if !self.nodes.contains_key(parent.as_str()) {
                return Err(Error::DanglingReference {
                    node: node.id.to_string(),
                    parent: parent.to_string(),
                });
            }
        }

        let id = node.id.clone();
        tracing::debug!(%id, kind = %node.kind(), "add node");
        self.nodes.insert(id.clone(), node);
        self.refresh_edges();
        Ok(id)
    }

    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> Result<()> {
        const OP: &str = "update_node";

        if patch.is_empty() {
            return Err(Error::invalid(OP, "patch carries neither name nor data"));
        }
        let node = self.node(id)?;
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(Error::invalid(OP, "name must not be blank"));
            }
        }
        if let Some(data) = &patch.data {
            if data.kind() != node.kind() {
                return Err(Error::invalid(
                    OP,
                    format!("{} payload sent to {} node {id}", data.kind(), node.kind()),
                ));
            }
            match data {
                NodeData::DateTime(hours) => validate_business_hours(OP, hours)?,
                NodeData::SendMessage(msg) if msg.payload.is_empty() => {
                    return Err(Error::invalid(OP, "message payload must not be empty"));
                }
                _ => {}
            }
        }

        let node = self.node_mut(id)?;
        if let Some(name) = patch.name {
            node.name = Some(name);
        }
        if let Some(data) = patch.data {
            node.data = data;
        }
        tracing::debug!(id, "node fields updated");
        Ok(())
    }

    pub fn update_timezone(&mut self, id: &str, timezone: &str) -> Result<()> {
        self.find_by_id(NodeKind::DateTime, id)?;
        let timezone = timezone.trim();
        if timezone.is_empty() {
            return Err(Error::invalid("update_timezone", "timezone must not be empty"));
        }
        if let NodeData::DateTime(hours) = &mut self.node_mut(id)?.data {
            hours.timezone = timezone.to_string();
        }
        Ok(())
    }

    pub fn update_business_hour_times(
        &mut self,
        id: &str,
        index: usize,
        start: &str,
        end: &str,
    ) -> Result<()> {
        const OP: &str = "update_business_hour_times";

        let len = self.find_by_id(NodeKind::DateTime, id)?.times()?.len();
        if index >= len {
            return Err(Error::invalid(
                OP,
                format!("slot {index} out of range for {len} slots"),
            ));
        }
        validate_slot(OP, start, end)?;

        if let NodeData::DateTime(hours) = &mut self.node_mut(id)?.data {
            let slot = &mut hours.times[index];
            slot.start_time = start.to_string();
            slot.end_time = end.to_string();
        }
        Ok(())
    }

    /// Copies node `id` as a fresh node of the same kind with template data, under the same
    /// parent, offset by `duplicate_offset * (number of nodes of that kind)`.
    pub fn duplicate_node(&mut self, id: &str) -> Result<NodeId> {
        let source = self.node(id)?;
        let kind = source.kind();
        let same_kind = self.nodes.values().filter(|n| n.kind() == kind).count() as f64;
        let position = source.position.offset(
            self.duplicate_offset.x * same_kind,
            self.duplicate_offset.y * same_kind,
        );

        let copy = Node {
            id: self.mint_id(),
            name: source.name.clone(),
            parent: source.parent.clone(),
            data: NodeData::template(kind),
            position,
        };
        let copy_id = copy.id.clone();
        let index = self.nodes.get_index_of(id).map_or(self.nodes.len(), |i| i + 1);

        tracing::debug!(source = id, copy = %copy_id, %kind, "duplicate node");
        self.nodes.shift_insert(index, copy_id.clone(), copy);
        self.refresh_edges();
        Ok(copy_id)
    }

    /// Removes exactly one node. Its children are re-parented to its own parent, so deleting
    /// a root promotes its children to roots.
    pub fn delete_node(&mut self, id: &str) -> Result<Node> {
        let removed = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| Error::not_found("node", id))?;

        let mut adopted = 0usize;
        for node in self.nodes.values_mut() {
            if node.parent.as_ref().is_some_and(|p| p == id) {
                node.parent = removed.parent.clone();
                adopted += 1;
            }
        }

        tracing::debug!(id, adopted, "delete node");
        self.refresh_edges();
        Ok(removed)
    }

    pub fn reparent(&mut self, id: &str, parent: Option<&str>) -> Result<()> {
        self.node(id)?;
        if let Some(parent) = parent {
            if !self.nodes.contains_key(parent) {
                return Err(Error::DanglingReference {
                    node: id.to_string(),
                    parent: parent.to_string(),
                });
            }
            if let Some(path) = self.ancestor_path(parent, id) {
                return Err(Error::Cycle { nodes: path });
            }
        }

        tracing::debug!(id, parent = ?parent, "reparent node");
        self.node_mut(id)?.parent = parent.map(NodeId::from);
        self.refresh_edges();
        Ok(())
    }

    pub fn set_position(&mut self, id: &str, position: Point) -> Result<()> {
        if !position.is_finite() {
            return Err(Error::invalid(
                "set_position",
                format!("non-finite position ({}, {})", position.x, position.y),
            ));
        }
        self.node_mut(id)?.position = position;
        Ok(())
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::not_found("node", id))
    }

    /// Walks up from `start`; returns the chain if it reaches `target`.
    fn ancestor_path(&self, start: &str, target: &str) -> Option<Vec<String>> {
        let mut path = vec![target.to_string()];
        let mut seen: HashSet<&str> = HashSet::default();
        let mut cur = Some(start);
        while let Some(id) = cur {
            path.push(id.to_string());
            if id == target {
                return Some(path);
            }
            if !seen.insert(id) {
                return None;
            }
            cur = self
                .nodes
                .get(id)
                .and_then(|n| n.parent.as_ref())
                .map(NodeId::as_str);
        }
        None
    }

    fn mint_id(&self) -> NodeId {
        loop {
            let raw = uuid::Uuid::new_v4().simple().to_string();
            let candidate = &raw[..6];
            if !self.nodes.contains_key(candidate) {
                return NodeId::from(candidate);
            }
        }
    }

    fn refresh_edges(&mut self) {
        self.edges = self
            .nodes
            .values()
            .filter_map(|child| {
                let parent = self.nodes.get(child.parent.as_ref()?.as_str())?;
                Some(Edge::between(parent, child))
            })
            .collect();
    }
}

fn validate_slot(operation: &'static str, start: &str, end: &str) -> Result<()> {
    let parse = |s: &str| {
        NaiveTime::parse_from_str(s, "%H:%M")
            .map_err(|_| Error::invalid(operation, format!("`{s}` is not an HH:MM time")))
    };
    if parse(start)? >= parse(end)? {
        return Err(Error::invalid(
            operation,
            format!("start {start} must be before end {end}"),
        ));
    }
    Ok(())
}

fn validate_business_hours(operation: &'static str, hours: &BusinessHours) -> Result<()> {
    if hours.timezone.trim().is_empty() {
        return Err(Error::invalid(operation, "timezone must not be empty"));
    }
    if hours.times.is_empty() {
        return Err(Error::invalid(operation, "business hours need at least one slot"));
    }
    for slot in &hours.times {
        validate_slot(operation, &slot.start_time, &slot.end_time)?;
    }
    Ok(())
}
