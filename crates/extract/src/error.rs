//! Extraction error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Graph error: {0}")]
    Core(#[from] sstubs_core::CoreError),

    #[error("Malformed patch: {0}")]
    Patch(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed: {0}")]
    Download(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
