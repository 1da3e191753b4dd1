//! Build statistics written next to the shards

use crate::{Result, SinkError, WriteReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sstubs_core::{DatasetConfig, DatasetVariant, Split, SplitRatios};
use sstubs_extract::{DatasetBuild, ExtractionStats};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const STATS_FILE: &str = "stats.json";

/// Summary of one dataset build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub name: String,
    pub variant: DatasetVariant,
    pub seed: u64,
    pub split_ratios: SplitRatios,
    pub num_shards: usize,
    pub extraction: ExtractionStats,
    pub filtered: usize,
    #[serde(default)]
    pub aborted: usize,
    pub duplicates_removed: usize,
    pub examples: BTreeMap<Split, usize>,
    pub generated_at: DateTime<Utc>,
}

impl DatasetStats {
    pub fn new(config: &DatasetConfig, build: &DatasetBuild, report: &WriteReport) -> Self {
        Self {
            name: config.name.clone(),
            variant: config.variant,
            seed: config.seed,
            split_ratios: config.split_ratios,
            num_shards: config.num_shards,
            extraction: build.extraction.clone(),
            filtered: build.filtered,
            aborted: build.aborted,
            duplicates_removed: report.duplicates_removed,
            examples: report.written.clone(),
            generated_at: Utc::now(),
        }
    }

    pub fn total_examples(&self) -> usize {
        self.examples.values().sum()
    }

    pub fn path(out_dir: impl AsRef<Path>) -> PathBuf {
        out_dir.as_ref().join(STATS_FILE)
    }

    pub fn save(&self, out_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = Self::path(out_dir);
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn load(out_dir: impl AsRef<Path>) -> Result<Self> {
        let path = Self::path(out_dir);
        if !path.exists() {
            return Err(SinkError::NotFound(path.display().to_string()));
        }
        Ok(serde_json::from_str(&std::fs::read_to_string(&path)?)?)
    }
}
