//! Record extraction: one patch in, up to two tokenized records out

use crate::{DiffParser, JavaTokenizer, SstubRecord, Tokenizer, UnifiedDiffParser};
use serde::{Deserialize, Serialize};
use sstubs_core::{RawRecord, SplitSource, Token, NO_BUG};
use tracing::{debug, instrument, warn};

/// What happened to one raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Before and after snippets both emitted
    Both,
    /// After snippet did not tokenize; only the buggy snippet emitted
    BeforeOnly,
    /// Before snippet did not tokenize; nothing emitted
    Untokenizable,
    /// Patch had no readable hunk; nothing emitted
    MalformedPatch,
}

/// Records produced from one raw record
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<RawRecord>,
    pub outcome: ExtractOutcome,
}

/// Counters over a whole extraction run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionStats {
    pub records_read: usize,
    pub malformed_patches: usize,
    pub untokenizable_before: usize,
    pub dropped_after: usize,
    pub raw_records_emitted: usize,
}

impl ExtractionStats {
    fn record(&mut self, extraction: &Extraction) {
        self.records_read += 1;
        self.raw_records_emitted += extraction.records.len();
        match extraction.outcome {
            ExtractOutcome::Both => {}
            ExtractOutcome::BeforeOnly => self.dropped_after += 1,
            ExtractOutcome::Untokenizable => self.untokenizable_before += 1,
            ExtractOutcome::MalformedPatch => self.malformed_patches += 1,
        }
    }
}

/// Turns raw SStuB records into labeled token sequences
pub struct RecordExtractor {
    diff_parser: Box<dyn DiffParser>,
    tokenizer: Box<dyn Tokenizer>,
}

impl RecordExtractor {
    pub fn new(diff_parser: impl DiffParser + 'static, tokenizer: impl Tokenizer + 'static) -> Self {
        Self {
            diff_parser: Box::new(diff_parser),
            tokenizer: Box::new(tokenizer),
        }
    }

    /// Unified diffs tokenized as Java
    pub fn java() -> Self {
        Self::new(UnifiedDiffParser::new(), JavaTokenizer::new())
    }

    fn tokens_or_empty(&self, snippet: &str, which: &str) -> Vec<Token> {
        match self.tokenizer.tokenize(snippet) {
            Ok(tokens) => tokens,
            Err(e) => {
                debug!("Could not tokenize {} snippet: {}", which, e);
                Vec::new()
            }
        }
    }

    /// Extract the buggy snippet (labeled with its bug type) and the fixed
    /// snippet (labeled `NO_BUG`), drawing one split for each record emitted
    pub fn extract(&self, record: &SstubRecord, splits: &dyn SplitSource) -> Extraction {
        let hunk = match self.diff_parser.first_hunk(&record.fix_patch) {
            Ok(hunk) => hunk,
            Err(e) => {
                warn!("Skipping {} record: {}", record.bug_type, e);
                return Extraction {
                    records: Vec::new(),
                    outcome: ExtractOutcome::MalformedPatch,
                };
            }
        };

        let before = self.tokens_or_empty(&hunk.source, "before");
        if before.is_empty() {
            return Extraction {
                records: Vec::new(),
                outcome: ExtractOutcome::Untokenizable,
            };
        }
        let after = self.tokens_or_empty(&hunk.target, "after");

        let mut records = vec![RawRecord::new(splits.next_split(), before, record.bug_type.as_str())];
        let outcome = if after.is_empty() {
            ExtractOutcome::BeforeOnly
        } else {
            records.push(RawRecord::new(splits.next_split(), after, NO_BUG));
            ExtractOutcome::Both
        };

        Extraction { records, outcome }
    }

    /// Extract every record in input order
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn extract_all(
        &self,
        records: &[SstubRecord],
        splits: &dyn SplitSource,
    ) -> (Vec<RawRecord>, ExtractionStats) {
        let mut stats = ExtractionStats::default();
        let mut raw = Vec::with_capacity(records.len() * 2);

        for record in records {
            let extraction = self.extract(record, splits);
            stats.record(&extraction);
            raw.extend(extraction.records);
        }

        debug!("Extraction stats: {:?}", stats);
        (raw, stats)
    }
}

impl std::fmt::Debug for RecordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordExtractor").finish_non_exhaustive()
    }
}
