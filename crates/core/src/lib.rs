//! Graph example model for the ManySStuBs4J converter
//!
//! This crate defines the data structures every converted record ends up
//! in: graph examples (nodes, edges, one output), their validation, split
//! assignment, user hooks, and the token-chain builder.

pub mod builder;
pub mod config;
pub mod edge;
pub mod error;
pub mod example;
pub mod hooks;
pub mod node;
pub mod output;
pub mod record;
pub mod split;
pub mod validation;

pub use builder::{build_example, token_chain};
pub use config::{DatasetConfig, DatasetVariant};
pub use edge::{Edge, NEXT_TOKEN};
pub use error::{CoreError, Result};
pub use example::GraphExample;
pub use hooks::{FilterFn, Hooks, TransformFn};
pub use node::Node;
pub use output::GraphOutput;
pub use record::{LabeledExample, RawRecord, Token, NO_BUG};
pub use split::{RandomSplitter, Split, SplitRatios, SplitSource};
pub use validation::{ValidationPolicy, Violation};
