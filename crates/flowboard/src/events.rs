//! Change notification for presentation layers.
//!
//! Subscribers run after a mutation (and any relayout it triggers) has completed, so they
//! always observe a consistent repository.

use crate::model::NodeId;
use crate::repository::NodeRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralCause {
    Added(NodeId),
    Deleted(NodeId),
    Duplicated { source: NodeId, copy: NodeId },
    Reparented(NodeId),
    Relayout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Structural { cause: StructuralCause },
    PositionMoved { id: NodeId },
    FieldsUpdated { id: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&ChangeEvent, &NodeRepository)>;

#[derive(Default)]
pub struct Subscribers {
    next: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent, &NodeRepository) + 'static,
    {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls every subscriber in subscription order.
    pub fn notify(&mut self, event: &ChangeEvent, repo: &NodeRepository) {
        tracing::trace!(?event, subscribers = self.entries.len(), "notify");
        for (_, callback) in &mut self.entries {
            callback(event, repo);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
