//! The `{nodes, edges}` snapshot handed to a canvas renderer.

use crate::model::{Edge, Node, NodeData, NodeId, NodeKind};
use crate::repository::NodeRepository;
use flowboard_layout::Point;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: NodeId,
    /// Per-node renderer key, see [`Node::type_key`].
    #[serde(rename = "type")]
    pub type_key: String,
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_node: Option<NodeId>,
    pub position: Point,
    pub data: NodeData,
}

impl From<&Node> for RenderNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            type_key: node.type_key(),
            kind: node.kind(),
            name: node.display_name().to_string(),
            parent_node: node.parent.clone(),
            position: node.position,
            data: node.data.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderInput {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<Edge>,
}

impl RenderInput {
    pub fn from_repository(repo: &NodeRepository) -> Self {
        Self {
            nodes: repo.nodes().map(RenderNode::from).collect(),
            edges: repo.edges().to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
