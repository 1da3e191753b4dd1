//! Dataset build configuration
//!
//! Built once (usually from CLI flags) and passed to the dataset converter
//! and the output sink.

use crate::{CoreError, Result, SplitRatios};
use serde::{Deserialize, Serialize};

/// Which release of the raw dataset to convert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DatasetVariant {
    /// Bugs mined from 100 Java Maven projects
    #[default]
    Standard,
    /// Bugs mined from the top 1000 Java projects
    Large,
}

impl DatasetVariant {
    /// File name of the raw JSON array inside the raw-data directory
    pub fn raw_file_name(&self) -> &'static str {
        match self {
            DatasetVariant::Standard => "sstubs.json",
            DatasetVariant::Large => "sstubsLarge.json",
        }
    }

    /// Download location of the raw file
    pub fn url(&self) -> &'static str {
        match self {
            DatasetVariant::Standard => "https://zenodo.org/record/3653444/files/sstubs?download=1",
            DatasetVariant::Large => {
                "https://zenodo.org/record/3653444/files/sstubsLarge?download=1"
            }
        }
    }

    /// Expected SHA-1 of the raw file, lowercase hex
    pub fn sha1sum(&self) -> &'static str {
        match self {
            DatasetVariant::Standard => "7217be8c154878c563820f53f7a5eacf6ac9c17a",
            DatasetVariant::Large => "c0bfd241a3fb60e84b39a8e2a1db2975f7c2be83",
        }
    }
}

impl std::fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetVariant::Standard => write!(f, "standard"),
            DatasetVariant::Large => write!(f, "large"),
        }
    }
}

/// Settings for one dataset build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Name used as the output shard prefix
    pub name: String,
    pub variant: DatasetVariant,
    pub split_ratios: SplitRatios,
    pub seed: u64,
    pub num_shards: usize,
    pub deduplicate: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            name: "manysstubs4j_dataset".to_string(),
            variant: DatasetVariant::Standard,
            split_ratios: SplitRatios::default(),
            seed: 0,
            num_shards: 1000,
            deduplicate: false,
        }
    }
}

impl DatasetConfig {
    /// Builder: set variant
    pub fn with_variant(mut self, variant: DatasetVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Builder: set split ratios
    pub fn with_split_ratios(mut self, split_ratios: SplitRatios) -> Self {
        self.split_ratios = split_ratios;
        self
    }

    /// Builder: set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder: set shard count
    pub fn with_num_shards(mut self, num_shards: usize) -> Self {
        self.num_shards = num_shards;
        self
    }

    /// Builder: toggle deduplication
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_shards == 0 {
            return Err(CoreError::Config("num_shards must be at least 1".into()));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::Config("dataset name cannot be empty".into()));
        }
        Ok(())
    }
}
