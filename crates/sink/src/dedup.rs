//! Duplicate removal

use crate::Result;
use sstubs_core::GraphExample;
use std::collections::HashSet;

/// Decides whether an example was already emitted
pub trait Deduplicator: Send {
    /// Returns true for repeats; remembers first sightings
    fn is_duplicate(&mut self, example: &GraphExample) -> Result<bool>;
}

/// Drops examples whose nodes, edges and output match an earlier one
/// exactly, regardless of split
#[derive(Debug, Default)]
pub struct ExactDeduplicator {
    seen: HashSet<blake3::Hash>,
}

impl ExactDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deduplicator for ExactDeduplicator {
    fn is_duplicate(&mut self, example: &GraphExample) -> Result<bool> {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, example)?;
        Ok(!self.seen.insert(hasher.finalize()))
    }
}
