//! sstubs2graph CLI
//!
//! Converts the ManySStuBs4J bug-fix dataset into graph examples.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sstubs_core::{hooks, DatasetConfig, DatasetVariant, Hooks, RandomSplitter, SplitRatios};
use sstubs_extract::{download_raw, RecordExtractor, SstubRecord, SstubsDataset};
use sstubs_sink::{DatasetStats, ShardedWriter};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// sstubs2graph - ManySStuBs4J to graph example converter
#[derive(Parser)]
#[command(name = "sstubs2graph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct VariantArgs {
    /// Use the large variant (top 1000 projects)
    #[arg(long)]
    large: bool,
}

impl VariantArgs {
    fn variant(&self) -> DatasetVariant {
        if self.large {
            DatasetVariant::Large
        } else {
            DatasetVariant::Standard
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Download the raw dataset
    Download {
        /// Raw data directory (defaults to ~/.sstubs/raw)
        #[arg(short, long, env = "SSTUBS_RAW_DIR")]
        raw_dir: Option<PathBuf>,

        #[command(flatten)]
        variant: VariantArgs,

        /// Download even if the file exists
        #[arg(long)]
        force: bool,
    },

    /// Convert raw records into sharded graph examples
    Convert {
        /// Raw data directory (defaults to ~/.sstubs/raw)
        #[arg(short, long, env = "SSTUBS_RAW_DIR")]
        raw_dir: Option<PathBuf>,

        /// Raw JSON file to convert (overrides --raw-dir)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (defaults to ~/.sstubs/out)
        #[arg(short, long, env = "SSTUBS_OUT_DIR")]
        out_dir: Option<PathBuf>,

        #[command(flatten)]
        variant: VariantArgs,

        /// Train/validation/test weights, summing to 100
        #[arg(long, default_value = "80,10,10")]
        split: SplitRatios,

        /// Seed for split assignment
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Number of output shards per split
        #[arg(long, default_value = "1000")]
        num_shards: usize,

        /// Drop examples identical to an earlier one
        #[arg(long)]
        deduplicate: bool,

        /// Drop graphs with more nodes than this
        #[arg(long)]
        max_nodes: Option<usize>,

        /// Drop graphs with fewer nodes than this
        #[arg(long)]
        min_nodes: Option<usize>,
    },

    /// Show how the first records of a raw file are tokenized
    Inspect {
        /// Raw JSON file
        path: PathBuf,

        /// Maximum records to show
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Train/validation/test weights, summing to 100
        #[arg(long, default_value = "80,10,10")]
        split: SplitRatios,

        /// Seed for split assignment
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Show statistics of a finished conversion
    Stats {
        /// Output directory (defaults to ~/.sstubs/out)
        #[arg(short, long, env = "SSTUBS_OUT_DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Download {
            raw_dir,
            variant,
            force,
        } => {
            cmd_download(resolve_dir(raw_dir, "raw")?, variant.variant(), force).await?;
        }
        Commands::Convert {
            raw_dir,
            input,
            out_dir,
            variant,
            split,
            seed,
            num_shards,
            deduplicate,
            max_nodes,
            min_nodes,
        } => {
            let config = DatasetConfig::default()
                .with_variant(variant.variant())
                .with_split_ratios(split)
                .with_seed(seed)
                .with_num_shards(num_shards)
                .with_deduplicate(deduplicate);

            let mut filters = Hooks::new();
            if let Some(limit) = min_nodes {
                filters = filters.with_filter(hooks::min_nodes(limit));
            }
            if let Some(limit) = max_nodes {
                filters = filters.with_filter(hooks::max_nodes(limit));
            }

            let dataset = SstubsDataset::new(config, filters)?;
            let input = match input {
                Some(path) => path,
                None => dataset.raw_data_path(resolve_dir(raw_dir, "raw")?),
            };
            cmd_convert(dataset, input, resolve_dir(out_dir, "out")?)?;
        }
        Commands::Inspect {
            path,
            limit,
            split,
            seed,
        } => {
            cmd_inspect(path, limit, split, seed)?;
        }
        Commands::Stats { out_dir } => {
            cmd_stats(resolve_dir(out_dir, "out")?)?;
        }
    }

    Ok(())
}

/// Explicit directory, else `~/.sstubs/<leaf>`
fn resolve_dir(dir: Option<PathBuf>, leaf: &str) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => {
            let mut path = dirs::home_dir().context("Could not find home directory")?;
            path.push(".sstubs");
            path.push(leaf);
            Ok(path)
        }
    }
}

async fn cmd_download(raw_dir: PathBuf, variant: DatasetVariant, force: bool) -> Result<()> {
    let path = download_raw(variant, &raw_dir, force)
        .await
        .with_context(|| format!("Failed to download the {} dataset", variant))?;

    println!("✓ Raw data at {}", path.display());
    Ok(())
}

fn cmd_convert(dataset: SstubsDataset, input: PathBuf, out_dir: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!(
            "Raw data not found at {} (run `sstubs2graph download` first)",
            input.display()
        );
    }

    let build = dataset
        .build_from_file(&input)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let mut writer = ShardedWriter::new(&out_dir, dataset.config());
    let report = writer.write(&build.examples)?;

    let stats = DatasetStats::new(dataset.config(), &build, &report);
    let stats_path = stats.save(&out_dir)?;
    info!("Saved stats to {}", stats_path.display());

    println!("✓ Conversion complete:");
    print_stats(&stats);
    Ok(())
}

fn cmd_inspect(path: PathBuf, limit: usize, ratios: SplitRatios, seed: u64) -> Result<()> {
    let records = SstubRecord::load_all(&path)
        .with_context(|| format!("Failed to read raw records from {}", path.display()))?;
    println!("Found {} records", records.len());

    let extractor = RecordExtractor::java();
    let splitter = RandomSplitter::new(ratios, seed);

    for (i, record) in records.iter().take(limit).enumerate() {
        let extraction = extractor.extract(record, &splitter);
        println!("\n{}. {} ({:?})", i + 1, record.bug_type, extraction.outcome);
        for raw in &extraction.records {
            let tokens: Vec<String> = raw
                .tokens
                .iter()
                .map(|t| format!("{}:{}", t.token_type, t.value))
                .collect();
            println!("   [{}] {} -> {}", raw.split, raw.label, tokens.join(" "));
        }
    }

    Ok(())
}

fn cmd_stats(out_dir: PathBuf) -> Result<()> {
    let stats = DatasetStats::load(&out_dir)
        .with_context(|| format!("No conversion found in {}", out_dir.display()))?;

    println!(
        "Dataset {} ({}, generated {}):",
        stats.name,
        stats.variant,
        stats.generated_at.format("%Y-%m-%d %H:%M")
    );
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &DatasetStats) {
    let extraction = &stats.extraction;
    println!("  • Records read: {}", extraction.records_read);
    println!("  • Malformed patches: {}", extraction.malformed_patches);
    println!("  • Untokenizable snippets: {}", extraction.untokenizable_before);
    println!("  • Fixed snippets dropped: {}", extraction.dropped_after);
    println!("  • Filtered: {}", stats.filtered);
    println!("  • Aborted builds: {}", stats.aborted);
    println!("  • Duplicates removed: {}", stats.duplicates_removed);
    println!("  • Examples: {}", stats.total_examples());
    for (split, count) in &stats.examples {
        println!("    - {}: {}", split, count);
    }
}
