//! ManySStuBs4J extraction
//!
//! Reads raw SStuB records, pulls the before/after snippet out of each fix
//! patch, tokenizes both and hands the token sequences to the graph builder:
//! - patch: first-hunk reader for unified diffs
//! - tokenizer: Java tokenizer over the tree-sitter grammar
//! - extractor: record → tokenized, split-tagged records
//! - dataset: the end-to-end converter

pub mod dataset;
pub mod download;
pub mod error;
pub mod extractor;
pub mod patch;
pub mod record;
pub mod tokenizer;

pub use dataset::{DatasetBuild, SstubsDataset};
pub use download::download_raw;
pub use error::{ExtractError, Result};
pub use extractor::{ExtractOutcome, Extraction, ExtractionStats, RecordExtractor};
pub use patch::{DiffParser, HunkSnippets, UnifiedDiffParser};
pub use record::SstubRecord;
pub use tokenizer::{JavaTokenizer, LexError, Tokenizer};
