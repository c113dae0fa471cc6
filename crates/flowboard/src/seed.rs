//! The initial flow every new session starts from.

use crate::model::{
    BusinessHours, CommentData, ConnectorData, ConnectorType, MessagePayload, Node, NodeData,
    SendMessageData, TriggerData,
};

pub fn seed_nodes() -> Vec<Node> {
    vec![
        Node::new("1", NodeData::Trigger(TriggerData::default())),
        message(
            "b6a0c1",
            "Away Message",
            "28c4b9",
            vec![MessagePayload::Text {
                text: "Sorry, we are currently away. We will respond as soon as possible."
                    .to_string(),
            }],
        ),
        Node::new("d09c08", NodeData::DateTime(BusinessHours::default()))
            .with_name("Business Hours")
            .with_parent("1"),
        connector("161f52", "Success", ConnectorType::Success),
        connector("28c4b9", "Failure", ConnectorType::Failure),
        message(
            "b0653a",
            "Welcome Message",
            "161f52",
            vec![
                MessagePayload::Text {
                    text: "Hello there, welcome to the chat!".to_string(),
                },
                MessagePayload::Attachment {
                    attachment: "https://fastly.picsum.photos/id/396/536/354.jpg".to_string(),
                },
            ],
        ),
        Node::new(
            "e879e4",
            NodeData::AddComment(CommentData {
                comment: "User message during off hours".to_string(),
            }),
        )
        .with_name("Add Comment #1")
        .with_parent("b6a0c1"),
    ]
}

fn message(id: &str, name: &str, parent: &str, payload: Vec<MessagePayload>) -> Node {
    Node::new(id, NodeData::SendMessage(SendMessageData { payload }))
        .with_name(name)
        .with_parent(parent)
}

fn connector(id: &str, name: &str, connector_type: ConnectorType) -> Node {
    Node::new(
        id,
        NodeData::DateTimeConnector(ConnectorData { connector_type }),
    )
    .with_name(name)
    .with_parent("d09c08")
}
