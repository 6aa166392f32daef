//! WORDVEC Query Binary
//!
//! Loads a store snapshot and answers an analogy query: the words nearest to
//! sum(positive) - sum(negative).

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use wordvec::{AnalogyConfig, AnalogyEngine, MemoryStore};

/// WORDVEC Query - vector-arithmetic analogy lookups
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the store snapshot
    #[arg(long, default_value = "data/wordvec.wvec")]
    store: PathBuf,

    /// Positive examples separated by comma
    #[arg(long)]
    positive: String,

    /// Negative examples separated by comma
    #[arg(long, default_value = "")]
    negative: String,

    /// Number of neighbors to return
    #[arg(long, default_value_t = 5)]
    neighbors: usize,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wordvec=info".parse()?))
        .init();

    let args = Args::parse();

    let split = |s: &str| -> Vec<String> {
        s.split(',')
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    };
    let positive = split(&args.positive);
    let negative = split(&args.negative);

    let store = MemoryStore::load(&args.store)?;
    let engine = AnalogyEngine::with_config(
        &store,
        AnalogyConfig::default().with_neighbors(args.neighbors),
    );

    for neighbor in engine.analogy(&positive, &negative)? {
        println!("{} {}", neighbor.word, neighbor.distance);
    }

    Ok(())
}
