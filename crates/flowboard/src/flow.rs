//! The editing session a presentation layer talks to.
//!
//! A [`Flow`] owns the repository, the position synchronizer and the subscriber list. Every
//! entry point runs to completion (mutation, then relayout for structural changes) before any
//! subscriber is notified.

use crate::config::FlowConfig;
use crate::error::Result;
use crate::events::{ChangeEvent, StructuralCause, SubscriptionId, Subscribers};
use crate::model::{Node, NodeId};
use crate::render::RenderInput;
use crate::repository::{NodePatch, NodeRepository};
use crate::seed::seed_nodes;
use crate::sync::PositionSync;
use flowboard_layout::Point;
use serde_json::Value;

#[derive(Debug)]
pub struct Flow {
    config: FlowConfig,
    repo: NodeRepository,
    sync: PositionSync,
    subscribers: Subscribers,
}

impl Flow {
    /// A session over the built-in seed flow, laid out.
    pub fn new(config: FlowConfig) -> Result<Self> {
        Self::with_nodes(seed_nodes(), config)
    }

    pub fn with_nodes(nodes: Vec<Node>, config: FlowConfig) -> Result<Self> {
        let options = config.layout_options()?;
        let policy = config.layout_policy()?;
        let offset = config.duplicate_offset()?;

        let mut repo = NodeRepository::from_nodes(nodes)?.with_duplicate_offset(offset);
        let mut sync = PositionSync::new(options, policy);
        sync.relayout(&mut repo)?;

        Ok(Self {
            config,
            repo,
            sync,
            subscribers: Subscribers::default(),
        })
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn repository(&self) -> &NodeRepository {
        &self.repo
    }

    pub fn position_sync(&self) -> &PositionSync {
        &self.sync
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent, &NodeRepository) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn on_node_drag(&mut self, id: &str, position: Point) -> Result<()> {
        self.sync.update_node_position(&mut self.repo, id, position)?;
        self.notify(ChangeEvent::PositionMoved { id: id.into() });
        Ok(())
    }

    pub fn on_delete(&mut self, id: &str) -> Result<Node> {
        let removed = self.repo.delete_node(id)?;
        self.sync.unpin(id);
        self.structural(StructuralCause::Deleted(removed.id.clone()))?;
        Ok(removed)
    }

    pub fn on_duplicate(&mut self, id: &str) -> Result<NodeId> {
        let copy = self.repo.duplicate_node(id)?;
        self.sync.pin(copy.clone());
        self.structural(StructuralCause::Duplicated {
            source: id.into(),
            copy: copy.clone(),
        })?;
        Ok(copy)
    }

    pub fn on_field_change(&mut self, id: &str, patch: NodePatch) -> Result<()> {
        self.repo.update_node(id, patch)?;
        self.notify(ChangeEvent::FieldsUpdated { id: id.into() });
        Ok(())
    }

    /// Like [`Flow::on_field_change`] for callers holding untyped JSON.
    pub fn on_field_change_json(&mut self, id: &str, patch: &Value) -> Result<()> {
        self.on_field_change(id, NodePatch::from_json(patch)?)
    }

    pub fn on_timezone_change(&mut self, id: &str, timezone: &str) -> Result<()> {
        self.repo.update_timezone(id, timezone)?;
        self.notify(ChangeEvent::FieldsUpdated { id: id.into() });
        Ok(())
    }

    pub fn on_business_hours_change(
        &mut self,
        id: &str,
        index: usize,
        start: &str,
        end: &str,
    ) -> Result<()> {
        self.repo.update_business_hour_times(id, index, start, end)?;
        self.notify(ChangeEvent::FieldsUpdated { id: id.into() });
        Ok(())
    }

    pub fn on_reparent(&mut self, id: &str, parent: Option<&str>) -> Result<()> {
        self.repo.reparent(id, parent)?;
        self.structural(StructuralCause::Reparented(id.into()))
    }

    pub fn on_add(&mut self, node: Node) -> Result<NodeId> {
        let id = self.repo.add_node(node)?;
        self.structural(StructuralCause::Added(id.clone()))?;
        Ok(id)
    }

    /// Drops every manual placement and lays the whole flow out again.
    pub fn relayout_all(&mut self) -> Result<()> {
        self.sync.relayout_all(&mut self.repo)?;
        self.notify(ChangeEvent::Structural {
            cause: StructuralCause::Relayout,
        });
        Ok(())
    }

    pub fn render_input(&self) -> RenderInput {
        RenderInput::from_repository(&self.repo)
    }

    fn structural(&mut self, cause: StructuralCause) -> Result<()> {
        self.sync.relayout(&mut self.repo)?;
        self.notify(ChangeEvent::Structural { cause });
        Ok(())
    }

    fn notify(&mut self, event: ChangeEvent) {
        self.subscribers.notify(&event, &self.repo);
    }
}
