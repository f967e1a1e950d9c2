use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building, loading or querying an index.
#[derive(Error, Debug)]
pub enum RankError {
    #[error("index not found at {}. Run `reporank --setup <repo_url>` first", .0.display())]
    IndexNotFound(PathBuf),

    #[error("invalid chunking: overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    InvalidChunking { chunk_size: usize, overlap: usize },

    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    #[error("failed to acquire repository: {0}")]
    Clone(String),

    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("invalid dataset: {0}")]
    Dataset(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RankError>;
