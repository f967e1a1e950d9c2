use anyhow::Result;
use console::style;
use std::sync::Arc;

use crate::config::Config;
use crate::search::{create_embedder, Embedder, FileScore, JsonStore, RepoIndex, Searcher};

/// Load the persisted index and wire a searcher around it.
pub fn open_searcher(config: &Config) -> Result<Searcher> {
    let store = JsonStore::new(&config.index_path);
    let index = RepoIndex::load(&store)?;

    if index.meta().embedding_model != config.embedder.model {
        tracing::warn!(
            "Index was built with '{}' but '{}' is configured; similarities will be meaningless",
            index.meta().embedding_model,
            config.embedder.model
        );
    }

    let embedder: Arc<dyn Embedder> = Arc::from(create_embedder(&config.embedder)?);
    Ok(Searcher::new(
        Arc::new(index),
        embedder,
        config.search.clone(),
    ))
}

pub async fn run_question(config: &Config, question: &str, top_k: usize, json: bool) -> Result<()> {
    let searcher = open_searcher(config)?;
    let results = searcher.query(question, top_k).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    Ok(())
}

fn print_results(results: &[FileScore]) {
    println!("Top relevant files:");
    if results.is_empty() {
        println!("  {}", style("(no indexed files)").dim());
        return;
    }
    for result in results {
        println!("{}", format_result(result));
    }
}

pub fn format_result(result: &FileScore) -> String {
    format!("- {} (score: {:.4})", result.path, result.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_result_uses_four_decimals() {
        let line = format_result(&FileScore::new("src/main.rs", 1.23456));
        assert_eq!(line, "- src/main.rs (score: 1.2346)");
    }
}
