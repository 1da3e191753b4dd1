//! User-supplied transformation and filter hooks
//!
//! Transformations run in order and may replace the graph outright; filters
//! run in order after validation and the first `false` drops the example.

use crate::{GraphExample, Result};

/// Graph → graph rewrite; may fail (e.g. by setting a second output)
pub type TransformFn = Box<dyn Fn(GraphExample) -> Result<GraphExample> + Send + Sync>;

/// Keep/drop predicate over a validated graph
pub type FilterFn = Box<dyn Fn(&GraphExample) -> bool + Send + Sync>;

/// Ordered transformation and filter lists
#[derive(Default)]
pub struct Hooks {
    transforms: Vec<TransformFn>,
    filters: Vec<FilterFn>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a transformation
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(GraphExample) -> Result<GraphExample> + Send + Sync + 'static,
    {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Builder: append a filter
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&GraphExample) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// Run every transformation in order
    pub fn transform(&self, graph: GraphExample) -> Result<GraphExample> {
        self.transforms.iter().try_fold(graph, |graph, f| f(graph))
    }

    /// True if every filter keeps the graph
    pub fn accepts(&self, graph: &GraphExample) -> bool {
        self.filters.iter().all(|f| f(graph))
    }

    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("transforms", &self.transforms.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Keep graphs with at most `limit` nodes
pub fn max_nodes(limit: usize) -> impl Fn(&GraphExample) -> bool + Send + Sync + 'static {
    move |graph| graph.node_count() <= limit
}

/// Keep graphs with at least `limit` nodes
pub fn min_nodes(limit: usize) -> impl Fn(&GraphExample) -> bool + Send + Sync + 'static {
    move |graph| graph.node_count() >= limit
}
