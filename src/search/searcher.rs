use std::sync::Arc;

use crate::config::SearchOptionsConfig;
use crate::error::Result;

use super::aggregate::aggregate_by_file;
use super::embedder::Embedder;
use super::index::RepoIndex;
use super::lexical::LexicalScorer;
use super::rerank::{rerank, top_lexical};
use super::store::{Chunk, FileScore};
use super::tokenize::tokenize;

/// Answers questions against a loaded index.
pub struct Searcher {
    index: Arc<RepoIndex>,
    embedder: Arc<dyn Embedder>,
    options: SearchOptionsConfig,
}

impl Searcher {
    pub fn new(
        index: Arc<RepoIndex>,
        embedder: Arc<dyn Embedder>,
        options: SearchOptionsConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            options,
        }
    }

    /// Files most relevant to `question`, best first.
    ///
    /// An empty index answers with no files and never calls the embedder.
    pub async fn query(&self, question: &str, top_k: usize) -> Result<Vec<FileScore>> {
        if self.index.is_empty() || self.index.embeddings().is_empty() {
            return Ok(Vec::new());
        }

        let tokens = tokenize(question);
        let query_vector = self.embedder.embed(question).await?;

        Ok(rank_files(
            &tokens,
            &query_vector,
            self.index.lexical(),
            self.index.chunks(),
            self.index.embeddings(),
            &self.options,
            top_k,
        ))
    }
}

/// The two-stage ranking: lexical candidates, semantic re-rank, per-file sum.
pub fn rank_files(
    tokens: &[String],
    query_vector: &[f32],
    lexical: &dyn LexicalScorer,
    chunks: &[Chunk],
    embeddings: &[Vec<f32>],
    options: &SearchOptionsConfig,
    top_k: usize,
) -> Vec<FileScore> {
    if chunks.is_empty() || embeddings.is_empty() {
        return Vec::new();
    }

    let lexical_scores = lexical.score(tokens);
    let candidates: Vec<usize> = top_lexical(&lexical_scores, options.lexical_candidates)
        .into_iter()
        .map(|(i, _)| i)
        .collect();
    tracing::debug!("{} lexical candidates", candidates.len());

    let reranked = rerank(
        query_vector,
        &candidates,
        embeddings,
        options.rerank_candidates,
    );

    aggregate_by_file(chunks, &reranked, top_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::lexical::Bm25Index;

    fn chunk(path: &str, text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            path: path.to_string(),
            lines: (1, 1),
            file_type: "rs".to_string(),
        }
    }

    fn fixture() -> (Vec<Chunk>, Bm25Index, Vec<Vec<f32>>) {
        let chunks = vec![
            chunk("src/db.rs", "connect to the database pool"),
            chunk("src/db.rs", "database query helpers"),
            chunk("src/http.rs", "http server routes"),
            chunk("src/cli.rs", "parse command line flags"),
            chunk("src/http.rs", "database backed http handlers"),
            chunk("README.md", "project overview"),
        ];
        let corpus: Vec<Vec<String>> = chunks.iter().map(|c| tokenize(&c.text)).collect();
        let embeddings = vec![
            vec![0.9, 0.1, 0.0],
            vec![0.8, 0.2, 0.1],
            vec![0.1, 0.9, 0.0],
            vec![0.0, 0.1, 0.9],
            vec![0.6, 0.6, 0.0],
            vec![0.3, 0.3, 0.3],
        ];
        (chunks, Bm25Index::new(&corpus), embeddings)
    }

    #[test]
    fn test_top_k_is_prefix_of_larger_top_k() {
        let (chunks, lexical, embeddings) = fixture();
        let options = SearchOptionsConfig::default();
        let tokens = tokenize("database");
        let query = [1.0f32, 0.2, 0.1];

        let top5 = rank_files(&tokens, &query, &lexical, &chunks, &embeddings, &options, 5);
        let top10 = rank_files(&tokens, &query, &lexical, &chunks, &embeddings, &options, 10);

        assert!(!top5.is_empty());
        assert_eq!(top5[..], top10[..top5.len()]);
        assert_eq!(top5[0].path, "src/db.rs");
    }

    #[test]
    fn test_rerank_limit_drops_weaker_chunks() {
        let (chunks, lexical, embeddings) = fixture();
        let options = SearchOptionsConfig {
            lexical_candidates: 1000,
            rerank_candidates: 1,
            top_k: 10,
        };

        let files = rank_files(
            &tokenize("database"),
            &[0.0, 1.0, 0.0],
            &lexical,
            &chunks,
            &embeddings,
            &options,
            10,
        );

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/http.rs");
    }

    #[test]
    fn test_lexical_limit_restricts_candidates() {
        let (chunks, lexical, embeddings) = fixture();
        let options = SearchOptionsConfig {
            lexical_candidates: 1,
            rerank_candidates: 100,
            top_k: 10,
        };

        // only the best lexical match for "command" survives, even though the
        // query vector points elsewhere
        let files = rank_files(
            &tokenize("command line"),
            &[1.0, 0.0, 0.0],
            &lexical,
            &chunks,
            &embeddings,
            &options,
            10,
        );

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/cli.rs");
    }

    #[test]
    fn test_empty_index_returns_nothing() {
        let lexical = Bm25Index::new(&[]);
        let files = rank_files(
            &tokenize("anything"),
            &[1.0],
            &lexical,
            &[],
            &[],
            &SearchOptionsConfig::default(),
            10,
        );
        assert!(files.is_empty());
    }
}
