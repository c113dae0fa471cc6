use flowboard::model::{
    BusinessHours, CommentData, MessagePayload, SendMessageData, TriggerData,
};
use flowboard::{Edge, Error, Node, NodeData, NodeId, NodeKind, Point, seed_nodes};
use serde_json::json;

fn seed_node(id: &str) -> Node {
    seed_nodes()
        .into_iter()
        .find(|n| n.id == id)
        .unwrap()
}

#[test]
fn node_decodes_from_parent_pointer_json() {
    let node: Node = serde_json::from_value(json!({
        "id": "c1",
        "name": "Note",
        "parentNode": "b6a0c1",
        "data": { "kind": "addComment", "comment": "call back" }
    }))
    .unwrap();

    assert_eq!(node.id, "c1");
    assert_eq!(node.kind(), NodeKind::AddComment);
    assert_eq!(node.parent, Some(NodeId::from("b6a0c1")));
    assert_eq!(node.position, Point::default());
    assert_eq!(node.comment().unwrap(), "call back");
}

#[test]
fn node_serializes_parent_under_parent_node_key() {
    let node = Node::new("x", NodeData::Trigger(TriggerData::default())).with_parent("root");
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["parentNode"], json!("root"));
    assert_eq!(value["data"]["kind"], json!("trigger"));
    assert_eq!(value["data"]["oncePerContact"], json!(false));
    assert!(value.get("name").is_none());
}

#[test]
fn display_name_falls_back_to_the_kind() {
    assert_eq!(seed_node("1").display_name(), "trigger");
    assert_eq!(seed_node("d09c08").display_name(), "Business Hours");
}

#[test]
fn type_key_combines_kind_and_id() {
    assert_eq!(seed_node("d09c08").type_key(), "dateTime-d09c08");
    assert_eq!(seed_node("161f52").type_key(), "dateTimeConnector-161f52");
}

#[test]
fn business_hours_accessors_read_the_seed() {
    let node = seed_node("d09c08");
    assert_eq!(node.timezone().unwrap(), "UTC");
    let times = node.times().unwrap();
    assert_eq!(times.len(), 7);
    assert!(times.iter().all(|t| t.start_time == "09:00" && t.end_time == "17:00"));
}

#[test]
fn accessor_on_the_wrong_kind_is_not_found() {
    let err = seed_node("1").comment().unwrap_err();
    assert_eq!(
        err,
        Error::NotFound {
            category: "addComment",
            id: "1".to_string()
        }
    );
    assert!(matches!(
        seed_node("b6a0c1").timezone(),
        Err(Error::NotFound {
            category: "dateTime",
            ..
        })
    ));
}

#[test]
fn empty_required_fields_are_missing_field_errors() {
    let hours = Node::new(
        "dt",
        NodeData::DateTime(BusinessHours {
            timezone: String::new(),
            times: Vec::new(),
            ..Default::default()
        }),
    );
    assert_eq!(
        hours.timezone().unwrap_err(),
        Error::MissingField {
            id: NodeId::from("dt"),
            field: "timezone"
        }
    );
    assert!(matches!(
        hours.times(),
        Err(Error::MissingField { field: "times", .. })
    ));

    let msg = Node::new(
        "m",
        NodeData::SendMessage(SendMessageData {
            payload: Vec::new(),
        }),
    );
    assert!(matches!(
        msg.first_payload(),
        Err(Error::MissingField {
            field: "payload[0]",
            ..
        })
    ));
}

#[test]
fn first_payload_is_the_leading_text() {
    let payload = seed_node("b0653a").first_payload().unwrap().clone();
    assert_eq!(
        payload,
        MessagePayload::Text {
            text: "Hello there, welcome to the chat!".to_string()
        }
    );
}

#[test]
fn templates_match_their_kind() {
    for kind in NodeKind::ALL {
        assert_eq!(NodeData::template(kind).kind(), kind);
    }
    assert_eq!(
        NodeData::template(NodeKind::SendMessage),
        NodeData::SendMessage(SendMessageData {
            payload: vec![MessagePayload::Text {
                text: String::new()
            }]
        })
    );
    assert_eq!(
        NodeData::template(NodeKind::AddComment),
        NodeData::AddComment(CommentData::default())
    );
}

#[test]
fn edge_mirrors_the_child_kind() {
    let edge = Edge::between(&seed_node("1"), &seed_node("d09c08"));
    assert_eq!(edge.id, "1-d09c08");
    assert_eq!(edge.source, "1");
    assert_eq!(edge.target, "d09c08");
    assert_eq!(edge.kind, NodeKind::DateTime);
    assert_eq!(serde_json::to_value(&edge).unwrap()["type"], json!("dateTime"));
}
