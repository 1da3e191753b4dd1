//! The graph example container
//!
//! A [`GraphExample`] is the unit every dataset conversion produces: an
//! ordered list of nodes, a list of typed edges, and exactly one output.
//! Construction only rejects duplicate ids and a second output. Everything
//! else is checked by [`crate::validation`].

use crate::validation::{self, ValidationPolicy, Violation};
use crate::{CoreError, Edge, GraphOutput, Node, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A graph with node/edge structure and a single graph-level output
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "GraphExampleRepr")]
pub struct GraphExample {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    output: Option<GraphOutput>,
    #[serde(skip)]
    node_ids: HashSet<usize>,
}

#[derive(Deserialize)]
struct GraphExampleRepr {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    output: Option<GraphOutput>,
}

impl From<GraphExampleRepr> for GraphExample {
    fn from(repr: GraphExampleRepr) -> Self {
        let node_ids = repr.nodes.iter().map(|n| n.id).collect();
        Self {
            nodes: repr.nodes,
            edges: repr.edges,
            output: repr.output,
            node_ids,
        }
    }
}

impl GraphExample {
    /// Create an empty graph example
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node
    ///
    /// Fails if a node with the same id already exists. An id that skips
    /// ahead of the dense range is accepted here and caught by validation.
    pub fn add_node(
        &mut self,
        id: usize,
        node_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        if !self.node_ids.insert(id) {
            return Err(CoreError::DuplicateNode(id));
        }
        self.nodes.push(Node::new(id, node_type, value));
        Ok(())
    }

    /// Record an edge; endpoints are checked by validation
    pub fn add_edge(&mut self, src: usize, dst: usize, edge_type: impl Into<String>) {
        self.edges.push(Edge::new(src, dst, edge_type));
    }

    /// Set a class label as the graph output
    pub fn add_class_output(&mut self, label: impl Into<String>) -> Result<()> {
        self.set_output(GraphOutput::Class(label.into()))
    }

    /// Set a token sequence as the graph output
    pub fn add_token_output(&mut self, tokens: Vec<String>) -> Result<()> {
        self.set_output(GraphOutput::Tokens(tokens))
    }

    /// Set a list of node pointers as the graph output
    pub fn add_pointer_output(&mut self, node_ids: Vec<usize>) -> Result<()> {
        self.set_output(GraphOutput::Pointers(node_ids))
    }

    fn set_output(&mut self, output: GraphOutput) -> Result<()> {
        if let Some(existing) = &self.output {
            return Err(CoreError::OutputAlreadySet {
                existing: existing.kind(),
            });
        }
        self.output = Some(output);
        Ok(())
    }

    /// Nodes in insertion order
    pub fn get_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn get_edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn output(&self) -> Option<&GraphOutput> {
        self.output.as_ref()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether a node with this id exists
    pub fn has_node(&self, id: usize) -> bool {
        self.node_ids.contains(&id)
    }

    /// Check every structural invariant under the default policy
    ///
    /// Repeated calls agree until the graph is mutated.
    pub fn check_if_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Report the first violated invariant under the default policy
    pub fn validate(&self) -> std::result::Result<(), Violation> {
        validation::validate(self, &ValidationPolicy::default())
    }

    /// Report the first violated invariant under an explicit policy
    pub fn validate_with(&self, policy: &ValidationPolicy) -> std::result::Result<(), Violation> {
        validation::validate(self, policy)
    }
}

impl std::fmt::Display for GraphExample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = match &self.output {
            Some(GraphOutput::Class(label)) => format!("class({label})"),
            Some(other) => other.kind().to_string(),
            None => "none".to_string(),
        };
        write!(
            f,
            "GraphExample(nodes={}, edges={}, output={})",
            self.nodes.len(),
            self.edges.len(),
            output
        )
    }
}
