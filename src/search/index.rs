use std::collections::HashSet;

use crate::error::{RankError, Result};

use super::lexical::{Bm25Index, LexicalScorer};
use super::store::{Chunk, IndexArtifact, IndexMeta, IndexStats, IndexStore};

/// A built or loaded index.
///
/// Chunks, tokenized corpus and embeddings share indices. The BM25
/// statistics are derived from the tokenized corpus and are rebuilt whenever
/// an index is constructed, never persisted.
#[derive(Debug, Clone)]
pub struct RepoIndex {
    meta: IndexMeta,
    chunks: Vec<Chunk>,
    tokenized_corpus: Vec<Vec<String>>,
    embeddings: Vec<Vec<f32>>,
    lexical: Bm25Index,
}

impl RepoIndex {
    pub fn new(
        meta: IndexMeta,
        chunks: Vec<Chunk>,
        tokenized_corpus: Vec<Vec<String>>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Self> {
        if chunks.len() != tokenized_corpus.len() || chunks.len() != embeddings.len() {
            return Err(RankError::CorruptIndex(format!(
                "misaligned index: {} chunks, {} tokenized documents, {} embeddings",
                chunks.len(),
                tokenized_corpus.len(),
                embeddings.len()
            )));
        }

        let lexical = Bm25Index::new(&tokenized_corpus);
        Ok(Self {
            meta,
            chunks,
            tokenized_corpus,
            embeddings,
            lexical,
        })
    }

    pub fn from_artifact(artifact: IndexArtifact) -> Result<Self> {
        Self::new(
            artifact.meta,
            artifact.chunks,
            artifact.tokenized_corpus,
            artifact.embeddings,
        )
    }

    pub fn to_artifact(&self) -> IndexArtifact {
        IndexArtifact {
            meta: self.meta.clone(),
            chunks: self.chunks.clone(),
            tokenized_corpus: self.tokenized_corpus.clone(),
            embeddings: self.embeddings.clone(),
        }
    }

    pub fn load(store: &dyn IndexStore) -> Result<Self> {
        Self::from_artifact(store.load()?)
    }

    pub fn save(&self, store: &dyn IndexStore) -> Result<()> {
        store.save(&self.to_artifact())
    }

    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn tokenized_corpus(&self) -> &[Vec<String>] {
        &self.tokenized_corpus
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn lexical(&self) -> &dyn LexicalScorer {
        &self.lexical
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        let files: HashSet<&str> = self.chunks.iter().map(|c| c.path.as_str()).collect();
        IndexStats {
            total_files: files.len(),
            total_chunks: self.chunks.len(),
            dimensions: self.meta.dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::store::{JsonStore, FORMAT_VERSION};
    use crate::search::tokenize::tokenize;
    use chrono::Utc;

    fn meta() -> IndexMeta {
        IndexMeta {
            version: FORMAT_VERSION,
            source: "local".to_string(),
            embedding_model: "test".to_string(),
            dimensions: 2,
            chunk_size: 1000,
            overlap: 50,
            built_at: Utc::now(),
        }
    }

    fn chunk(path: &str, text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            path: path.to_string(),
            lines: (1, 1),
            file_type: "rs".to_string(),
        }
    }

    #[test]
    fn test_rejects_misaligned_parts() {
        let chunks = vec![chunk("a.rs", "fn a")];
        let result = RepoIndex::new(meta(), chunks, vec![tokenize("fn a")], vec![]);
        assert!(matches!(result, Err(RankError::CorruptIndex(_))));
    }

    #[test]
    fn test_reload_rebuilds_identical_lexical_scores() {
        let texts = ["fn open_file path", "fn close_file handle", "struct Path"];
        let chunks: Vec<Chunk> = texts.iter().map(|t| chunk("a.rs", t)).collect();
        let corpus: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
        let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]];
        let index = RepoIndex::new(meta(), chunks, corpus, embeddings).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("index.json"));
        index.save(&store).unwrap();
        let reloaded = RepoIndex::load(&store).unwrap();

        let query = tokenize("open file path");
        let before: Vec<u64> = index
            .lexical()
            .score(&query)
            .iter()
            .map(|s| s.to_bits())
            .collect();
        let after: Vec<u64> = reloaded
            .lexical()
            .score(&query)
            .iter()
            .map(|s| s.to_bits())
            .collect();
        assert_eq!(before, after);
        assert_eq!(reloaded.chunks(), index.chunks());
        assert_eq!(reloaded.embeddings(), index.embeddings());
    }

    #[test]
    fn test_stats_counts_distinct_files() {
        let chunks = vec![chunk("a.rs", "x"), chunk("a.rs", "y"), chunk("b.rs", "z")];
        let corpus = vec![tokenize("x"), tokenize("y"), tokenize("z")];
        let index = RepoIndex::new(meta(), chunks, corpus, vec![vec![0.0, 1.0]; 3]).unwrap();

        let stats = index.stats();
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.dimensions, 2);
    }
}
