//! Edge types - relationships between graph nodes

use serde::{Deserialize, Serialize};

/// Edge type linking each token node to the token that follows it
pub const NEXT_TOKEN: &str = "NEXT_TOKEN";

/// A directed, typed edge between two nodes
///
/// Edge types are an open vocabulary chosen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Source node id (the "from" node)
    pub src: usize,

    /// Target node id (the "to" node)
    pub dst: usize,

    /// Type of relationship
    #[serde(rename = "type")]
    pub edge_type: String,
}

impl Edge {
    /// Create a new edge
    pub fn new(src: usize, dst: usize, edge_type: impl Into<String>) -> Self {
        Self {
            src,
            dst,
            edge_type: edge_type.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.src, self.edge_type, self.dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_creation() {
        let edge = Edge::new(0, 1, NEXT_TOKEN);

        assert_eq!(edge.src, 0);
        assert_eq!(edge.dst, 1);
        assert_eq!(edge.edge_type, "NEXT_TOKEN");
        assert!(!edge.is_self_loop());
        assert!(Edge::new(2, 2, "SELF").is_self_loop());
    }

    #[test]
    fn test_edge_display() {
        assert_eq!(Edge::new(1, 2, NEXT_TOKEN).to_string(), "1 -[NEXT_TOKEN]-> 2");
    }
}
