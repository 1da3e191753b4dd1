//! Error types for graph example construction

use thiserror::Error;

/// Core errors raised while building or validating graph examples
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Duplicate node id: {0}")]
    DuplicateNode(usize),

    #[error("Output already set: graph already has a {existing} output")]
    OutputAlreadySet { existing: &'static str },

    #[error("Invalid graph example: {0}")]
    GraphNotValid(String),

    #[error("Invalid split ratios {train}/{validation}/{test}: weights must sum to 100")]
    InvalidSplitRatios {
        train: u32,
        validation: u32,
        test: u32,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
