use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::config::Config;
use crate::search::{evaluate, Dataset};

use super::question::open_searcher;

pub async fn run_evaluate(config: &Config, dataset_path: &Path, top_k: usize) -> Result<()> {
    let searcher = open_searcher(config)?;
    let dataset = Dataset::load(dataset_path)
        .with_context(|| format!("Failed to read dataset {}", dataset_path.display()))?;

    let pb = ProgressBar::new(dataset.records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Evaluating [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let report = evaluate(&searcher, &dataset, top_k, |_| pb.inc(1)).await?;
    pb.finish_and_clear();

    if report.skipped > 0 {
        println!(
            "Skipped {} invalid records",
            style(report.skipped).yellow()
        );
    }
    println!("Recall@{}: {:.2}%", report.top_k, report.recall() * 100.0);

    Ok(())
}
