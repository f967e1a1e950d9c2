use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RankError, Result};

use super::{IndexArtifact, IndexStore, FORMAT_VERSION};

/// Stores the whole artifact as one JSON document.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn atomic_write(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(temp_path, &self.path)?;

        Ok(())
    }
}

impl IndexStore for JsonStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, artifact: &IndexArtifact) -> Result<()> {
        validate(artifact)?;
        let json = serde_json::to_vec(artifact)?;
        self.atomic_write(&json)?;
        tracing::info!(
            "Saved {} chunks to {}",
            artifact.chunks.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<IndexArtifact> {
        if !self.path.exists() {
            return Err(RankError::IndexNotFound(self.path.clone()));
        }

        let content = fs::read(&self.path)?;
        let artifact: IndexArtifact = serde_json::from_slice(&content)?;
        validate(&artifact)?;

        tracing::debug!(
            "Loaded {} chunks from {}",
            artifact.chunks.len(),
            self.path.display()
        );
        Ok(artifact)
    }
}

fn validate(artifact: &IndexArtifact) -> Result<()> {
    if artifact.meta.version != FORMAT_VERSION {
        return Err(RankError::CorruptIndex(format!(
            "unsupported format version {} (expected {})",
            artifact.meta.version, FORMAT_VERSION
        )));
    }

    let chunks = artifact.chunks.len();
    let tokens = artifact.tokenized_corpus.len();
    let vectors = artifact.embeddings.len();
    if chunks != tokens || chunks != vectors {
        return Err(RankError::CorruptIndex(format!(
            "misaligned index: {} chunks, {} tokenized documents, {} embeddings",
            chunks, tokens, vectors
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::store::{Chunk, IndexMeta};
    use chrono::Utc;

    fn artifact(n: usize) -> IndexArtifact {
        let chunks: Vec<Chunk> = (0..n)
            .map(|i| Chunk {
                text: format!("fn item_{}() {{}}", i),
                path: format!("src/file_{}.rs", i % 2),
                lines: (i * 10 + 1, i * 10 + 10),
                file_type: "rs".to_string(),
            })
            .collect();

        IndexArtifact {
            meta: IndexMeta {
                version: FORMAT_VERSION,
                source: "https://example.com/repo.git".to_string(),
                embedding_model: "all-minilm".to_string(),
                dimensions: 3,
                chunk_size: 1000,
                overlap: 50,
                built_at: Utc::now(),
            },
            tokenized_corpus: chunks
                .iter()
                .map(|c| crate::search::tokenize::tokenize(&c.text))
                .collect(),
            embeddings: (0..n).map(|i| vec![i as f32, 0.5, -1.0]).collect(),
            chunks,
        }
    }

    #[test]
    fn test_save_then_load_keeps_alignment() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested/index.json"));

        let original = artifact(5);
        store.save(&original).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.chunks, original.chunks);
        assert_eq!(loaded.tokenized_corpus, original.tokenized_corpus);
        assert_eq!(loaded.embeddings, original.embeddings);
        assert_eq!(loaded.meta.embedding_model, "all-minilm");
        assert!(!dir.path().join("nested/index.tmp").exists());
    }

    #[test]
    fn test_missing_index_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("index.json"));

        assert!(!store.exists());
        assert!(matches!(store.load(), Err(RankError::IndexNotFound(_))));
    }

    #[test]
    fn test_misaligned_artifact_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("index.json"));

        let mut broken = artifact(3);
        broken.embeddings.pop();
        assert!(matches!(
            store.save(&broken),
            Err(RankError::CorruptIndex(_))
        ));

        // written by something else
        fs::write(store.path(), serde_json::to_vec(&broken).unwrap()).unwrap();
        assert!(matches!(store.load(), Err(RankError::CorruptIndex(_))));
    }

    #[test]
    fn test_garbage_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("index.json"));
        fs::write(store.path(), b"not json").unwrap();

        assert!(matches!(store.load(), Err(RankError::Json(_))));
    }
}
