pub mod acquire;
pub mod aggregate;
pub mod chunker;
pub mod embedder;
pub mod evaluate;
pub mod index;
pub mod indexer;
pub mod lexical;
pub mod rerank;
pub mod searcher;
pub mod store;
pub mod tokenize;

pub use acquire::acquire;
pub use aggregate::aggregate_by_file;
pub use chunker::Chunker;
pub use embedder::{create_embedder, Embedder, OllamaEmbedder};
pub use evaluate::{evaluate, Dataset, EvalRecord, EvalReport};
pub use index::RepoIndex;
pub use indexer::Indexer;
pub use lexical::{Bm25Index, LexicalScorer};
pub use rerank::cosine_similarity;
pub use searcher::{rank_files, Searcher};
pub use store::{Chunk, FileScore, IndexArtifact, IndexMeta, IndexStats, IndexStore, JsonStore};
pub use tokenize::tokenize;
