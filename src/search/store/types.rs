use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current on-disk layout of [`IndexArtifact`].
pub const FORMAT_VERSION: u32 = 1;

/// A contiguous line range of one file; the unit of indexing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub text: String,
    /// Path relative to the repository root
    pub path: String,
    /// 1-indexed, inclusive
    pub lines: (usize, usize),
    pub file_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMeta {
    pub version: u32,
    /// Repository URL or local path the index was built from
    pub source: String,
    pub embedding_model: String,
    pub dimensions: usize,
    pub chunk_size: usize,
    pub overlap: usize,
    pub built_at: DateTime<Utc>,
}

/// Everything needed to answer questions without the source tree.
///
/// `chunks`, `tokenized_corpus` and `embeddings` are aligned by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexArtifact {
    pub meta: IndexMeta,
    pub chunks: Vec<Chunk>,
    pub tokenized_corpus: Vec<Vec<String>>,
    pub embeddings: Vec<Vec<f32>>,
}

/// A file and its aggregated relevance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileScore {
    pub path: String,
    pub score: f32,
}

impl FileScore {
    pub fn new(path: impl Into<String>, score: f32) -> Self {
        Self {
            path: path.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_files: usize,
    pub total_chunks: usize,
    pub dimensions: usize,
}
