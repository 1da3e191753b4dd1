//! Structural validation of graph examples
//!
//! Validity is a pure function of the current graph state. The checks run
//! in a fixed order and stop at the first violation:
//!
//! 1. node ids are exactly `0..N` in insertion order
//! 2. every edge endpoint names an existing node
//! 3. optional edge rules from [`ValidationPolicy`]
//! 4. exactly one output is set
//! 5. pointer outputs name existing nodes

use crate::{GraphExample, GraphOutput};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Optional edge rules; both relaxed by default
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub allow_self_loops: bool,
    pub allow_duplicate_edges: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allow_self_loops: true,
            allow_duplicate_edges: true,
        }
    }
}

impl ValidationPolicy {
    /// Forbid self-loops and duplicate edges
    pub fn strict() -> Self {
        Self {
            allow_self_loops: false,
            allow_duplicate_edges: false,
        }
    }
}

/// The first invariant a graph example breaks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("node at position {position} has id {id}, ids must be dense from 0")]
    NonDenseNodeId { position: usize, id: usize },

    #[error("edge {src} -> {dst} ({edge_type}) references missing node {missing}")]
    DanglingEdge {
        src: usize,
        dst: usize,
        edge_type: String,
        missing: usize,
    },

    #[error("self-loop on node {node} ({edge_type})")]
    SelfLoop { node: usize, edge_type: String },

    #[error("duplicate edge {src} -> {dst} ({edge_type})")]
    DuplicateEdge {
        src: usize,
        dst: usize,
        edge_type: String,
    },

    #[error("no output set")]
    MissingOutput,

    #[error("pointer output references missing node {0}")]
    DanglingPointer(usize),
}

/// Check a graph example against every invariant
pub fn validate(graph: &GraphExample, policy: &ValidationPolicy) -> Result<(), Violation> {
    let nodes = graph.get_nodes();
    for (position, node) in nodes.iter().enumerate() {
        if node.id != position {
            return Err(Violation::NonDenseNodeId {
                position,
                id: node.id,
            });
        }
    }

    // Ids are dense past this point, so membership is a bounds check.
    let node_count = nodes.len();
    let mut seen = HashSet::new();
    for edge in graph.get_edges() {
        if let Some(missing) = [edge.src, edge.dst].into_iter().find(|&id| id >= node_count) {
            return Err(Violation::DanglingEdge {
                src: edge.src,
                dst: edge.dst,
                edge_type: edge.edge_type.clone(),
                missing,
            });
        }
        if !policy.allow_self_loops && edge.is_self_loop() {
            return Err(Violation::SelfLoop {
                node: edge.src,
                edge_type: edge.edge_type.clone(),
            });
        }
        if !policy.allow_duplicate_edges && !seen.insert(edge) {
            return Err(Violation::DuplicateEdge {
                src: edge.src,
                dst: edge.dst,
                edge_type: edge.edge_type.clone(),
            });
        }
    }

    match graph.output() {
        None => Err(Violation::MissingOutput),
        Some(GraphOutput::Pointers(targets)) => match targets.iter().find(|&&t| t >= node_count) {
            Some(&missing) => Err(Violation::DanglingPointer(missing)),
            None => Ok(()),
        },
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: usize) -> GraphExample {
        let mut graph = GraphExample::new();
        for i in 0..len {
            graph.add_node(i, "Identifier", format!("t{i}")).unwrap();
        }
        for i in 1..len {
            graph.add_edge(i - 1, i, "NEXT_TOKEN");
        }
        graph
    }

    #[test]
    fn test_valid_chain() {
        let mut graph = chain(3);
        graph.add_class_output("NO_BUG").unwrap();

        assert_eq!(validate(&graph, &ValidationPolicy::default()), Ok(()));
        assert!(graph.check_if_valid());
    }

    #[test]
    fn test_missing_output() {
        let graph = chain(2);

        assert_eq!(graph.validate(), Err(Violation::MissingOutput));
        assert!(!graph.check_if_valid());
    }

    #[test]
    fn test_empty_graph_with_output_is_valid() {
        let mut graph = GraphExample::new();
        graph.add_class_output("NO_BUG").unwrap();

        assert!(graph.check_if_valid());
    }

    #[test]
    fn test_id_gap() {
        let mut graph = GraphExample::new();
        graph.add_node(0, "Identifier", "a").unwrap();
        graph.add_node(2, "Identifier", "b").unwrap();
        graph.add_class_output("NO_BUG").unwrap();

        assert_eq!(
            graph.validate(),
            Err(Violation::NonDenseNodeId { position: 1, id: 2 })
        );
    }

    #[test]
    fn test_ids_out_of_order() {
        let mut graph = GraphExample::new();
        graph.add_node(1, "Identifier", "a").unwrap();
        graph.add_node(0, "Identifier", "b").unwrap();
        graph.add_class_output("NO_BUG").unwrap();

        assert!(matches!(
            graph.validate(),
            Err(Violation::NonDenseNodeId { position: 0, id: 1 })
        ));
    }

    #[test]
    fn test_dangling_edge() {
        let mut graph = chain(2);
        graph.add_edge(1, 5, "NEXT_TOKEN");
        graph.add_class_output("NO_BUG").unwrap();

        assert_eq!(
            graph.validate(),
            Err(Violation::DanglingEdge {
                src: 1,
                dst: 5,
                edge_type: "NEXT_TOKEN".into(),
                missing: 5,
            })
        );
    }

    #[test]
    fn test_self_loops_and_duplicates_follow_policy() {
        let mut graph = chain(2);
        graph.add_edge(1, 1, "SELF");
        graph.add_edge(0, 1, "NEXT_TOKEN");
        graph.add_class_output("NO_BUG").unwrap();

        assert!(graph.check_if_valid());
        assert!(matches!(
            graph.validate_with(&ValidationPolicy::strict()),
            Err(Violation::SelfLoop { node: 1, .. })
        ));

        let no_loops_only = ValidationPolicy {
            allow_self_loops: true,
            allow_duplicate_edges: false,
        };
        assert!(matches!(
            graph.validate_with(&no_loops_only),
            Err(Violation::DuplicateEdge { src: 0, dst: 1, .. })
        ));
    }

    #[test]
    fn test_pointer_output_targets() {
        let mut graph = chain(2);
        graph.add_pointer_output(vec![0, 1]).unwrap();
        assert!(graph.check_if_valid());

        let mut graph = chain(2);
        graph.add_pointer_output(vec![0, 4]).unwrap();
        assert_eq!(graph.validate(), Err(Violation::DanglingPointer(4)));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let mut graph = chain(4);
        graph.add_edge(3, 9, "NEXT_TOKEN");
        graph.add_class_output("NO_BUG").unwrap();

        let first = graph.validate();
        for _ in 0..3 {
            assert_eq!(graph.validate(), first);
            assert!(!graph.check_if_valid());
        }
    }
}
