//! Graph construction from tokenized records

use crate::{CoreError, GraphExample, Hooks, LabeledExample, RawRecord, Result, Token, NEXT_TOKEN};
use tracing::debug;

/// Build the token chain for a snippet: one node per token, `NEXT_TOKEN`
/// edges between neighbours, and the label as the class output
pub fn token_chain(tokens: &[Token], label: &str) -> Result<GraphExample> {
    let mut graph = GraphExample::new();

    for (index, token) in tokens.iter().enumerate() {
        graph.add_node(index, token.token_type.as_str(), token.value.as_str())?;
    }

    for i in 1..graph.get_nodes().len() {
        graph.add_edge(i - 1, i, NEXT_TOKEN);
    }

    graph.add_class_output(label)?;
    Ok(graph)
}

/// Turn one raw record into a labeled example
///
/// Returns `Ok(None)` when a filter drops the example. A graph that is still
/// invalid after the transformations is an error, not a skip.
pub fn build_example(record: RawRecord, hooks: &Hooks) -> Result<Option<LabeledExample>> {
    let graph = token_chain(&record.tokens, &record.label)?;
    let graph = hooks.transform(graph)?;

    if let Err(violation) = graph.validate() {
        return Err(CoreError::GraphNotValid(format!("{graph}: {violation}")));
    }

    if !hooks.accepts(&graph) {
        debug!("Filtered out {}", graph);
        return Ok(None);
    }

    Ok(Some(LabeledExample {
        split: record.split,
        example: graph,
    }))
}
