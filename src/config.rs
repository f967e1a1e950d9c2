use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RankError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "reporank.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where cloned repositories live
    pub data_dir: PathBuf,
    /// Location of the persisted index artifact
    pub index_path: PathBuf,
    pub chunking: ChunkingConfig,
    pub search: SearchOptionsConfig,
    pub embedder: EmbedderSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Lines per window
    pub chunk_size: usize,
    /// Lines shared by consecutive windows
    pub overlap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptionsConfig {
    /// Chunks kept after lexical scoring
    pub lexical_candidates: usize,
    /// Chunks kept after semantic re-ranking
    pub rerank_candidates: usize,
    /// Files returned per question
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedderSettings {
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub dimensions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".reporank"),
            index_path: PathBuf::from(".reporank/index.json"),
            chunking: ChunkingConfig::default(),
            search: SearchOptionsConfig::default(),
            embedder: EmbedderSettings::default(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 50,
        }
    }
}

impl Default for SearchOptionsConfig {
    fn default() -> Self {
        Self {
            lexical_candidates: 1000,
            rerank_candidates: 100,
            top_k: 10,
        }
    }
}

impl Default for EmbedderSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            // all-MiniLM-L6-v2 as published by Ollama
            model: "all-minilm".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            dimensions: 384,
        }
    }
}

impl ChunkingConfig {
    /// Distance between the starts of consecutive windows.
    pub fn stride(&self) -> Result<usize> {
        if self.chunk_size == 0 || self.overlap >= self.chunk_size {
            return Err(RankError::InvalidChunking {
                chunk_size: self.chunk_size,
                overlap: self.overlap,
            });
        }
        Ok(self.chunk_size - self.overlap)
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `reporank.toml` in the
    /// working directory is read when present, otherwise defaults apply.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| RankError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("REPORANK_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Ok(path) = std::env::var("REPORANK_INDEX_PATH") {
            self.index_path = PathBuf::from(path);
        }
        if let Ok(model) = std::env::var("REPORANK_EMBED_MODEL") {
            self.embedder.model = model;
        }
        if let Ok(url) = std::env::var("REPORANK_EMBED_ENDPOINT") {
            self.embedder.endpoint = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.chunking.stride()?;
        if self.search.lexical_candidates == 0 || self.search.rerank_candidates == 0 {
            return Err(RankError::Config(
                "lexical_candidates and rerank_candidates must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn repos_dir(&self) -> PathBuf {
        self.data_dir.join("repos")
    }
}
