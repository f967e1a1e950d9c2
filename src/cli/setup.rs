use anyhow::{Context, Result};
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

use crate::config::Config;
use crate::search::{acquire, create_embedder, Embedder, Indexer, JsonStore};

static INDEXING: Emoji<'_, '_> = Emoji("📊 ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "");

pub async fn run_setup(config: &Config, source: &str, verbose: bool) -> Result<()> {
    // Fail on bad chunking before cloning anything
    config.chunking.stride()?;

    let embedder: Arc<dyn Embedder> = Arc::from(create_embedder(&config.embedder)?);

    if verbose {
        println!("{}Checking Ollama connection...", INFO);
    }
    embedder.health_check().await?;

    let root = acquire(source, &config.repos_dir())
        .with_context(|| format!("Failed to acquire {}", source))?;

    let indexer = Indexer::new(Arc::clone(&embedder), &config.chunking)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message(format!("{}Embedding {}", INDEXING, root.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let index = indexer
        .build(&root, source, |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        })
        .await?;

    pb.finish_and_clear();

    let store = JsonStore::new(&config.index_path);
    index
        .save(&store)
        .with_context(|| format!("Failed to write index to {}", config.index_path.display()))?;

    let stats = index.stats();
    println!("{}Index built successfully", SUCCESS);
    println!("  Files indexed:   {}", style(stats.total_files).green());
    println!("  Chunks created:  {}", style(stats.total_chunks).cyan());
    println!(
        "  Index location:  {}",
        style(config.index_path.display()).dim()
    );

    Ok(())
}
