//! Keeps node positions in step with the layout engine.

use crate::error::{Error, Result};
use crate::model::NodeId;
use crate::repository::NodeRepository;
use flowboard_layout::{LayoutOptions, Point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a relayout does with positions the user placed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutPolicy {
    /// Every relayout overwrites every position.
    #[default]
    ResetAll,
    /// Dragged and duplicated nodes keep their position until unpinned.
    PreserveManual,
}

#[derive(Debug, Clone, Default)]
pub struct PositionSync {
    options: LayoutOptions,
    policy: LayoutPolicy,
    pinned: BTreeSet<NodeId>,
}

impl PositionSync {
    pub fn new(options: LayoutOptions, policy: LayoutPolicy) -> Self {
        Self {
            options,
            policy,
            pinned: BTreeSet::new(),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    pub fn pinned(&self) -> impl Iterator<Item = &NodeId> {
        self.pinned.iter()
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.contains(id)
    }

    /// Marks `id` as manually placed. A no-op under [`LayoutPolicy::ResetAll`].
    pub fn pin(&mut self, id: NodeId) {
        if self.policy == LayoutPolicy::PreserveManual {
            self.pinned.insert(id);
        }
    }

    pub fn unpin(&mut self, id: &str) -> bool {
        self.pinned.remove(id)
    }

    /// Lays out the whole repository and writes the result back. Pinned nodes still take
    /// part in ranking and ordering but keep their position.
    pub fn relayout(&mut self, repo: &mut NodeRepository) -> Result<()> {
        self.pinned.retain(|id| repo.contains(id.as_str()));

        let nodes: Vec<_> = repo.nodes().collect();
        let positions = flowboard_layout::compute_positions(&nodes, &self.options)?;
        let updates: Vec<(NodeId, Point)> = nodes
            .iter()
            .zip(positions)
            .filter(|(n, _)| !self.pinned.contains(n.id.as_str()))
            .map(|(n, p)| (n.id.clone(), p))
            .collect();

        let written = updates.len();
        for (id, point) in updates {
            repo.set_position(id.as_str(), point)?;
        }
        tracing::debug!(
            written,
            pinned = self.pinned.len(),
            policy = ?self.policy,
            "relayout"
        );
        Ok(())
    }

    /// Forgets every pin, then lays everything out.
    pub fn relayout_all(&mut self, repo: &mut NodeRepository) -> Result<()> {
        self.pinned.clear();
        self.relayout(repo)
    }

    /// Applies a drag to exactly one node. No relayout happens.
    pub fn update_node_position(
        &mut self,
        repo: &mut NodeRepository,
        id: &str,
        position: Point,
    ) -> Result<()> {
        if !repo.contains(id) {
            return Err(Error::not_found("node", id));
        }
        repo.set_position(id, position)?;
        self.pin(NodeId::from(id));
        tracing::trace!(id, x = position.x, y = position.y, "node dragged");
        Ok(())
    }
}
