//! Output sink for converted examples
//!
//! Writes labeled graph examples as sharded JSON lines, optionally dropping
//! exact duplicates, and records build statistics.

pub mod dedup;
pub mod error;
pub mod stats;
pub mod writer;

pub use dedup::{Deduplicator, ExactDeduplicator};
pub use error::{Result, SinkError};
pub use stats::{DatasetStats, STATS_FILE};
pub use writer::{read_split, ShardedWriter, WriteReport};
