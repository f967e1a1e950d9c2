use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reporank")]
#[command(version, about = "Rank the files of a repository by relevance to a question")]
#[command(group(ArgGroup::new("action").args(["setup", "question", "evaluate"])))]
pub struct Args {
    /// Repository URL (or local directory) to index
    #[arg(long, value_name = "REPO_URL")]
    pub setup: Option<String>,

    /// Ask a question against the built index
    #[arg(long, value_name = "TEXT")]
    pub question: Option<String>,

    /// Measure Recall@k on a labeled JSON dataset
    #[arg(long, value_name = "DATASET")]
    pub evaluate: Option<PathBuf>,

    /// Number of files to return (defaults to search.top_k)
    #[arg(long, short = 'k')]
    pub top_k: Option<usize>,

    /// Print question results as JSON
    #[arg(long)]
    pub json: bool,

    /// Configuration file (defaults to ./reporank.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub enum Action {
    Setup(String),
    Question(String),
    Evaluate(PathBuf),
    None,
}

impl Args {
    pub fn action(&self) -> Action {
        if let Some(url) = &self.setup {
            Action::Setup(url.clone())
        } else if let Some(question) = &self.question {
            Action::Question(question.clone())
        } else if let Some(dataset) = &self.evaluate {
            Action::Evaluate(dataset.clone())
        } else {
            Action::None
        }
    }
}
