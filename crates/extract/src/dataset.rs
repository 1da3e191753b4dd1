//! The ManySStuBs4J dataset converter
//!
//! There is no task attached to ManySStuBs4J, so one is made up: predict the
//! bug template of a code snippet. The snippet before each fix is labeled
//! with its bug type, the snippet after the fix with `NO_BUG`. Each snippet
//! becomes a chain of token nodes joined by `NEXT_TOKEN` edges, with the
//! label as the class output.

use crate::{ExtractionStats, RecordExtractor, Result, SstubRecord};
use rayon::prelude::*;
use sstubs_core::{
    build_example, CoreError, DatasetConfig, Hooks, LabeledExample, RandomSplitter, Split,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Everything one conversion produced
#[derive(Debug, Clone, Default)]
pub struct DatasetBuild {
    /// Accepted examples, in input order
    pub examples: Vec<LabeledExample>,
    pub extraction: ExtractionStats,
    /// Valid examples dropped by filter hooks
    pub filtered: usize,
    /// Examples whose graph could not be built (duplicate node, second output)
    pub aborted: usize,
}

/// Result of building one raw record
enum Built {
    Kept(LabeledExample),
    Filtered,
    Aborted,
}

impl DatasetBuild {
    pub fn split_counts(&self) -> BTreeMap<Split, usize> {
        let mut counts = BTreeMap::new();
        for example in &self.examples {
            *counts.entry(example.split).or_insert(0) += 1;
        }
        counts
    }
}

/// Converter from raw SStuB records to labeled graph examples
pub struct SstubsDataset {
    config: DatasetConfig,
    hooks: Hooks,
    extractor: RecordExtractor,
}

impl SstubsDataset {
    /// Create a converter using the unified-diff parser and Java tokenizer
    pub fn new(config: DatasetConfig, hooks: Hooks) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            hooks,
            extractor: RecordExtractor::java(),
        })
    }

    /// Builder: swap the extraction collaborators
    pub fn with_extractor(mut self, extractor: RecordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Location of the raw JSON file for the configured variant
    pub fn raw_data_path(&self, raw_dir: impl AsRef<Path>) -> PathBuf {
        raw_dir.as_ref().join(self.config.variant.raw_file_name())
    }

    /// Convert records into labeled examples
    ///
    /// Splits are drawn while extracting, in input order, from a generator
    /// seeded with the configured seed; graph construction then runs in
    /// parallel. A duplicate node or second output drops only that example;
    /// an invalid graph aborts the whole build.
    #[instrument(skip_all, fields(records = records.len(), seed = self.config.seed))]
    pub fn build(&self, records: &[SstubRecord]) -> Result<DatasetBuild> {
        let splitter = RandomSplitter::new(self.config.split_ratios, self.config.seed);
        let (raw, extraction) = self.extractor.extract_all(records, &splitter);
        let built: Vec<Built> = raw
            .into_par_iter()
            .map(|record| match build_example(record, &self.hooks) {
                Ok(Some(example)) => Ok(Built::Kept(example)),
                Ok(None) => Ok(Built::Filtered),
                Err(e @ (CoreError::DuplicateNode(_) | CoreError::OutputAlreadySet { .. })) => {
                    warn!("Dropping example: {}", e);
                    Ok(Built::Aborted)
                }
                Err(e) => Err(e),
            })
            .collect::<sstubs_core::Result<_>>()?;

        let mut examples = Vec::with_capacity(built.len());
        let (mut filtered, mut aborted) = (0, 0);
        for outcome in built {
            match outcome {
                Built::Kept(example) => examples.push(example),
                Built::Filtered => filtered += 1,
                Built::Aborted => aborted += 1,
            }
        }

        info!(
            "Built {} examples from {} records ({} filtered, {} aborted)",
            examples.len(),
            extraction.records_read,
            filtered,
            aborted
        );

        Ok(DatasetBuild {
            examples,
            extraction,
            filtered,
            aborted,
        })
    }

    /// Load a raw dataset file and convert it
    pub fn build_from_file(&self, path: impl AsRef<Path>) -> Result<DatasetBuild> {
        let path = path.as_ref();
        info!("Reading raw records from: {}", path.display());
        let records = SstubRecord::load_all(path)?;
        self.build(&records)
    }
}

impl std::fmt::Debug for SstubsDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SstubsDataset")
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
