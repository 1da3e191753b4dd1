//! Graph-level outputs

use serde::{Deserialize, Serialize};

/// The single output attached to a graph example
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum GraphOutput {
    /// A class label (e.g. a bug type, or `NO_BUG`)
    Class(String),
    /// A sequence of output tokens
    Tokens(Vec<String>),
    /// Node ids the output points at
    Pointers(Vec<usize>),
}

impl GraphOutput {
    /// Short name of the output kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            GraphOutput::Class(_) => "class",
            GraphOutput::Tokens(_) => "tokens",
            GraphOutput::Pointers(_) => "pointers",
        }
    }

    /// The class label, if this is a class output
    pub fn as_class(&self) -> Option<&str> {
        match self {
            GraphOutput::Class(label) => Some(label),
            _ => None,
        }
    }
}
