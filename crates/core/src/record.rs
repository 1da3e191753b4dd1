//! Records flowing between extraction and graph construction

use crate::{GraphExample, Split};
use serde::{Deserialize, Serialize};

/// Label given to the fixed (after-change) snippet of a patch
pub const NO_BUG: &str = "NO_BUG";

/// A lexical token: its category and its literal text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    #[serde(rename = "type")]
    pub token_type: String,
    pub value: String,
}

impl Token {
    pub fn new(token_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            value: value.into(),
        }
    }
}

impl<T: Into<String>, V: Into<String>> From<(T, V)> for Token {
    fn from((token_type, value): (T, V)) -> Self {
        Self::new(token_type, value)
    }
}

/// One tokenized snippet with its label and assigned split
///
/// Produced by extraction and consumed immediately by graph construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRecord {
    pub split: Split,
    pub tokens: Vec<Token>,
    pub label: String,
}

impl RawRecord {
    pub fn new(split: Split, tokens: Vec<Token>, label: impl Into<String>) -> Self {
        Self {
            split,
            tokens,
            label: label.into(),
        }
    }
}

/// A validated graph example tagged with its split
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabeledExample {
    pub split: Split,
    pub example: GraphExample,
}
