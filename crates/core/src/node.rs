//! Graph nodes

use serde::{Deserialize, Serialize};

/// A single node of a graph example
///
/// Ids are dense and follow insertion order; a token chain uses the token
/// index as the node id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub id: usize,

    /// Caller-defined node type (e.g. a token category such as `Identifier`)
    #[serde(rename = "type")]
    pub node_type: String,

    /// Node payload (e.g. the token text)
    pub value: String,
}

impl Node {
    /// Create a new node
    pub fn new(id: usize, node_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            node_type: node_type.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(3, "Identifier", "foo");

        assert_eq!(node.id, 3);
        assert_eq!(node.node_type, "Identifier");
        assert_eq!(node.value, "foo");
    }

    #[test]
    fn test_node_serializes_type_field() {
        let json = serde_json::to_value(Node::new(0, "Separator", ";")).unwrap();

        assert_eq!(json["type"], "Separator");
        assert_eq!(json["value"], ";");
        assert_eq!(json["id"], 0);
    }
}
