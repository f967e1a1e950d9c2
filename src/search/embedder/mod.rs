mod ollama;

pub use ollama::OllamaEmbedder;

use async_trait::async_trait;

use crate::config::EmbedderSettings;
use crate::error::{RankError, Result};

/// Turns text into fixed-dimension dense vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
    /// One vector per input, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
    fn dimensions(&self) -> usize;
    fn model(&self) -> &str;
    async fn health_check(&self) -> Result<()>;
}

pub fn create_embedder(settings: &EmbedderSettings) -> Result<Box<dyn Embedder>> {
    match settings.provider.as_str() {
        "ollama" => Ok(Box::new(OllamaEmbedder::new(
            &settings.endpoint,
            &settings.model,
            settings.dimensions,
        )?)),
        other => Err(RankError::Config(format!(
            "unknown embedding provider '{}' (supported: ollama)",
            other
        ))),
    }
}
