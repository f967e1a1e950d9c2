use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use reporank::cli::{self, Action, Args};
use reporank::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let action = args.action();
    if matches!(action, Action::None) {
        println!("{}", cli::USAGE_HINT);
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    let top_k = args.top_k.unwrap_or(config.search.top_k);

    match action {
        Action::Setup(source) => cli::run_setup(&config, &source, args.verbose).await,
        Action::Question(question) => cli::run_question(&config, &question, top_k, args.json).await,
        Action::Evaluate(dataset) => cli::run_evaluate(&config, &dataset, top_k).await,
        Action::None => Ok(()),
    }
}
