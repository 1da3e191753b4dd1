//! Sharded JSON-lines output
//!
//! Examples are written to `<out>/<split>/<name>-<shard>-of-<num_shards>.jsonl`,
//! one `{"split": ..., "example": ...}` object per line. Shards are filled
//! round-robin per split in emission order; shards that would be empty are
//! not created.

use crate::{Deduplicator, ExactDeduplicator, Result};
use sstubs_core::{DatasetConfig, LabeledExample, Split};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Outcome of one write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: BTreeMap<Split, usize>,
    pub duplicates_removed: usize,
    pub shards_written: usize,
}

impl WriteReport {
    pub fn total_written(&self) -> usize {
        self.written.values().sum()
    }
}

/// Writes labeled examples into per-split shard files
pub struct ShardedWriter {
    out_dir: PathBuf,
    name: String,
    num_shards: usize,
    deduplicator: Option<Box<dyn Deduplicator>>,
}

impl ShardedWriter {
    /// Create a writer for `config`; exact deduplication is enabled when the
    /// config asks for it
    pub fn new(out_dir: impl Into<PathBuf>, config: &DatasetConfig) -> Self {
        let deduplicator: Option<Box<dyn Deduplicator>> = if config.deduplicate {
            Some(Box::new(ExactDeduplicator::new()))
        } else {
            None
        };
        Self {
            out_dir: out_dir.into(),
            name: config.name.clone(),
            num_shards: config.num_shards.max(1),
            deduplicator,
        }
    }

    /// Builder: use a custom deduplicator
    pub fn with_deduplicator(mut self, deduplicator: impl Deduplicator + 'static) -> Self {
        self.deduplicator = Some(Box::new(deduplicator));
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Path of one shard file
    pub fn shard_path(&self, split: Split, shard: usize) -> PathBuf {
        self.out_dir.join(split.as_str()).join(format!(
            "{}-{:05}-of-{:05}.jsonl",
            self.name, shard, self.num_shards
        ))
    }

    /// Write every example, replacing shards from earlier runs
    #[instrument(skip_all, fields(examples = examples.len(), out_dir = %self.out_dir.display()))]
    pub fn write(&mut self, examples: &[LabeledExample]) -> Result<WriteReport> {
        let mut report = WriteReport::default();
        let mut shards: BTreeMap<(Split, usize), Vec<String>> = BTreeMap::new();

        for labeled in examples {
            if let Some(dedup) = self.deduplicator.as_mut() {
                if dedup.is_duplicate(&labeled.example)? {
                    report.duplicates_removed += 1;
                    continue;
                }
            }
            let count = report.written.entry(labeled.split).or_insert(0);
            let shard = *count % self.num_shards;
            *count += 1;
            shards
                .entry((labeled.split, shard))
                .or_default()
                .push(serde_json::to_string(labeled)?);
        }

        for split in Split::ALL {
            let dir = self.out_dir.join(split.as_str());
            fs::create_dir_all(&dir)?;
            self.remove_stale_shards(&dir)?;
        }

        for ((split, shard), lines) in &shards {
            let path = self.shard_path(*split, *shard);
            let mut out = BufWriter::new(File::create(&path)?);
            for line in lines {
                writeln!(out, "{}", line)?;
            }
            out.flush()?;
            debug!("Wrote {} examples to {}", lines.len(), path.display());
        }
        report.shards_written = shards.len();

        info!(
            "Wrote {} examples in {} shards ({} duplicates removed)",
            report.total_written(),
            report.shards_written,
            report.duplicates_removed
        );
        Ok(report)
    }

    fn remove_stale_shards(&self, dir: &Path) -> Result<()> {
        let prefix = format!("{}-", self.name);
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_shard = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".jsonl"));
            if is_shard {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// Read every example back from a split directory, shard by shard
pub fn read_split(out_dir: impl AsRef<Path>, split: Split) -> Result<Vec<LabeledExample>> {
    let dir = out_dir.as_ref().join(split.as_str());
    if !dir.is_dir() {
        return Err(crate::SinkError::NotFound(dir.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.retain(|p| p.extension().is_some_and(|ext| ext == "jsonl"));
    paths.sort();

    let mut examples = Vec::new();
    for path in paths {
        for line in fs::read_to_string(&path)?.lines().filter(|l| !l.trim().is_empty()) {
            examples.push(serde_json::from_str(line)?);
        }
    }
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sstubs_core::{token_chain, Token};

    fn example(split: Split, value: &str) -> LabeledExample {
        LabeledExample {
            split,
            example: token_chain(&[Token::new("Identifier", value)], "NO_BUG").unwrap(),
        }
    }

    #[test]
    fn test_shard_path_format() {
        let config = DatasetConfig::default().with_num_shards(20);
        let writer = ShardedWriter::new("/data/out", &config);

        assert_eq!(
            writer.shard_path(Split::Validation, 3),
            PathBuf::from("/data/out/validation/manysstubs4j_dataset-00003-of-00020.jsonl")
        );
    }

    #[test]
    fn test_round_robin_shards() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatasetConfig::default().with_num_shards(2);
        let mut writer = ShardedWriter::new(dir.path(), &config);

        let examples: Vec<_> = ["a", "b", "c"].iter().map(|v| example(Split::Train, v)).collect();
        let report = writer.write(&examples).unwrap();

        assert_eq!(report.shards_written, 2);
        assert_eq!(report.written.get(&Split::Train), Some(&3));
        let first = fs::read_to_string(writer.shard_path(Split::Train, 0)).unwrap();
        let second = fs::read_to_string(writer.shard_path(Split::Train, 1)).unwrap();
        assert_eq!(first.lines().count(), 2);
        assert_eq!(second.lines().count(), 1);
        assert!(!writer.shard_path(Split::Test, 0).exists());
    }
}
