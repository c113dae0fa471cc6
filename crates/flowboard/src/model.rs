//! Flow data model: typed nodes with parent pointers, and the edges derived from them.

use crate::error::{Error, Result};
use flowboard_layout::{LayoutNode, Point};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Trigger,
    SendMessage,
    DateTime,
    DateTimeConnector,
    AddComment,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Trigger,
        NodeKind::SendMessage,
        NodeKind::DateTime,
        NodeKind::DateTimeConnector,
        NodeKind::AddComment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Trigger => "trigger",
            NodeKind::SendMessage => "sendMessage",
            NodeKind::DateTime => "dateTime",
            NodeKind::DateTimeConnector => "dateTimeConnector",
            NodeKind::AddComment => "addComment",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerEvent {
    #[default]
    ConversationOpened,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerData {
    pub event: TriggerEvent,
    pub once_per_contact: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MessagePayload {
    Text { text: String },
    Attachment { attachment: String },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SendMessageData {
    pub payload: Vec<MessagePayload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateTimeAction {
    #[default]
    BusinessHours,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    #[serde(default)]
    pub action: DateTimeAction,
    pub times: Vec<TimeSlot>,
    pub timezone: String,
}

impl Default for BusinessHours {
    /// Monday to Sunday, 09:00 to 17:00, UTC.
    fn default() -> Self {
        Self {
            action: DateTimeAction::BusinessHours,
            times: Weekday::ALL
                .iter()
                .map(|&day| TimeSlot {
                    day,
                    start_time: "09:00".to_string(),
                    end_time: "17:00".to_string(),
                })
                .collect(),
            timezone: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    #[default]
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorData {
    pub connector_type: ConnectorType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommentData {
    pub comment: String,
}

/// Per-kind payload. The variant *is* the node kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeData {
    Trigger(TriggerData),
    SendMessage(SendMessageData),
    DateTime(BusinessHours),
    DateTimeConnector(ConnectorData),
    AddComment(CommentData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Trigger(_) => NodeKind::Trigger,
            NodeData::SendMessage(_) => NodeKind::SendMessage,
            NodeData::DateTime(_) => NodeKind::DateTime,
            NodeData::DateTimeConnector(_) => NodeKind::DateTimeConnector,
            NodeData::AddComment(_) => NodeKind::AddComment,
        }
    }

    /// Default payload for a freshly duplicated node of `kind`.
    pub fn template(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Trigger => NodeData::Trigger(TriggerData::default()),
            NodeKind::SendMessage => NodeData::SendMessage(SendMessageData {
                payload: vec![MessagePayload::Text {
                    text: String::new(),
                }],
            }),
            NodeKind::DateTime => NodeData::DateTime(BusinessHours::default()),
            NodeKind::DateTimeConnector => NodeData::DateTimeConnector(ConnectorData::default()),
            NodeKind::AddComment => NodeData::AddComment(CommentData::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "parentNode", skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    pub data: NodeData,
    #[serde(default)]
    pub position: Point,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, data: NodeData) -> Self {
        Self {
            id: id.into(),
            name: None,
            parent: None,
            data,
            position: Point::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// The name, falling back to the kind tag.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind().as_str())
    }

    /// `"{kind}-{id}"`, the key a renderer registry uses to tell same-kind nodes apart.
    pub fn type_key(&self) -> String {
        format!("{}-{}", self.kind(), self.id)
    }

    fn wrong_kind(&self, expected: NodeKind) -> Error {
        Error::not_found(expected.as_str(), self.id.as_str())
    }

    fn missing(&self, field: &'static str) -> Error {
        Error::MissingField {
            id: self.id.clone(),
            field,
        }
    }

    pub fn business_hours(&self) -> Result<&BusinessHours> {
        match &self.data {
            NodeData::DateTime(hours) => Ok(hours),
            _ => Err(self.wrong_kind(NodeKind::DateTime)),
        }
    }

    pub fn timezone(&self) -> Result<&str> {
        let hours = self.business_hours()?;
        if hours.timezone.trim().is_empty() {
            return Err(self.missing("timezone"));
        }
        Ok(&hours.timezone)
    }

    pub fn times(&self) -> Result<&[TimeSlot]> {
        let hours = self.business_hours()?;
        if hours.times.is_empty() {
            return Err(self.missing("times"));
        }
        Ok(&hours.times)
    }

    pub fn first_payload(&self) -> Result<&MessagePayload> {
        match &self.data {
            NodeData::SendMessage(msg) => msg.payload.first().ok_or_else(|| self.missing("payload[0]")),
            _ => Err(self.wrong_kind(NodeKind::SendMessage)),
        }
    }

    pub fn comment(&self) -> Result<&str> {
        match &self.data {
            NodeData::AddComment(c) => Ok(&c.comment),
            _ => Err(self.wrong_kind(NodeKind::AddComment)),
        }
    }

    pub fn connector_type(&self) -> Result<ConnectorType> {
        match &self.data {
            NodeData::DateTimeConnector(c) => Ok(c.connector_type),
            _ => Err(self.wrong_kind(NodeKind::DateTimeConnector)),
        }
    }
}

impl LayoutNode for Node {
    fn layout_id(&self) -> &str {
        self.id.as_str()
    }

    fn layout_parent(&self) -> Option<&str> {
        self.parent.as_ref().map(NodeId::as_str)
    }
}

/// Derived parent -> child link. `kind` mirrors the child's kind for styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl Edge {
    pub fn between(parent: &Node, child: &Node) -> Self {
        Self {
            id: format!("{}-{}", parent.id, child.id),
            source: parent.id.clone(),
            target: child.id.clone(),
            kind: child.kind(),
        }
    }
}
