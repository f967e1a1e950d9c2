use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

use crate::config::ChunkingConfig;
use crate::error::{RankError, Result};

use super::chunker::Chunker;
use super::embedder::Embedder;
use super::index::RepoIndex;
use super::store::{Chunk, IndexMeta, FORMAT_VERSION};
use super::tokenize::tokenize;

const BATCH_SIZE: usize = 32;

/// Builds a [`RepoIndex`] from a directory on disk.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
    chunker: Chunker,
}

impl Indexer {
    pub fn new(embedder: Arc<dyn Embedder>, config: &ChunkingConfig) -> Result<Self> {
        let chunker = Chunker::from_config(config)?;
        Ok(Self { embedder, chunker })
    }

    /// Chunk, tokenize and embed every file under `root`.
    ///
    /// `on_progress(done, total)` is called after each embedding batch.
    pub async fn build<F>(&self, root: &Path, source: &str, on_progress: F) -> Result<RepoIndex>
    where
        F: FnMut(usize, usize),
    {
        let chunks = self.chunker.chunk_directory(root);
        tracing::info!("Chunked {} into {} chunks", root.display(), chunks.len());
        self.build_from_chunks(chunks, source, on_progress).await
    }

    pub async fn build_from_chunks<F>(
        &self,
        chunks: Vec<Chunk>,
        source: &str,
        on_progress: F,
    ) -> Result<RepoIndex>
    where
        F: FnMut(usize, usize),
    {
        let tokenized_corpus: Vec<Vec<String>> =
            chunks.iter().map(|c| tokenize(&c.text)).collect();
        let embeddings = self.embed_chunks(&chunks, on_progress).await?;

        let meta = IndexMeta {
            version: FORMAT_VERSION,
            source: source.to_string(),
            embedding_model: self.embedder.model().to_string(),
            dimensions: embeddings
                .first()
                .map(|v| v.len())
                .unwrap_or_else(|| self.embedder.dimensions()),
            chunk_size: self.chunker.chunk_size(),
            overlap: self.chunker.overlap(),
            built_at: Utc::now(),
        };

        RepoIndex::new(meta, chunks, tokenized_corpus, embeddings)
    }

    /// Embed chunk texts in batches, keeping corpus order.
    async fn embed_chunks<F>(&self, chunks: &[Chunk], mut on_progress: F) -> Result<Vec<Vec<f32>>>
    where
        F: FnMut(usize, usize),
    {
        let mut embeddings = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts).await?;

            if vectors.len() != batch.len() {
                return Err(RankError::Embedding(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    vectors.len()
                )));
            }

            embeddings.extend(vectors);
            on_progress(embeddings.len(), chunks.len());
        }

        if let Some(dim) = embeddings.first().map(|v| v.len()) {
            if embeddings.iter().any(|v| v.len() != dim) {
                return Err(RankError::Embedding(
                    "embedding model returned vectors of different sizes".to_string(),
                ));
            }
        }

        Ok(embeddings)
    }
}
