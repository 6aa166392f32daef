//! WORDVEC Import Binary
//!
//! Reads a word2vec binary model, selects the top terms plus any whitelisted
//! words, and writes the normalized entries to a store snapshot.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wordvec::{ImportConfig, Importer, MemoryStore, ModelReader, VectorStore};

/// WORDVEC Import - build a vector store from a word2vec model
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the pretrained word2vec binary model
    #[arg(long, default_value = "data/GoogleNews-vectors-negative300.bin")]
    model: PathBuf,

    /// Number of top terms to import
    #[arg(long, default_value_t = 30_000)]
    top_words: usize,

    /// Comma-separated words to find even if they are not among the top
    /// terms (lowercase, spaces instead of underscores)
    #[arg(long, default_value = "")]
    whitelist: String,

    /// Output path for the store snapshot
    #[arg(long, default_value = "data/wordvec.wvec")]
    store: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wordvec=info".parse()?))
        .init();

    let args = Args::parse();

    let whitelist: Vec<String> = args
        .whitelist
        .split(',')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    let reader = ModelReader::open(&args.model)?;
    let header = reader.header();
    info!(
        word_count = header.word_count,
        dimensions = header.dimensions,
        "opened model {}",
        args.model.display()
    );

    let config = ImportConfig::default()
        .with_top_words(args.top_words)
        .with_whitelist(whitelist);

    let mut store = MemoryStore::new(header.dimensions);
    let report = Importer::new(config).run(reader, &mut store)?;

    store.save(&args.store)?;
    info!(
        entries = store.len(),
        "snapshot saved to {}",
        args.store.display()
    );

    if !report.missing_whitelist.is_empty() {
        println!("left-over {}", report.missing_whitelist.join(", "));
    }

    Ok(())
}
