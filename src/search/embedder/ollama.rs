use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{RankError, Result};

use super::Embedder;

pub struct OllamaEmbedder {
    endpoint: String,
    model: String,
    dimensions: usize,
    client: Client,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    truncate: bool,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

impl OllamaEmbedder {
    pub fn new(endpoint: &str, model: &str, dimensions: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| RankError::Embedding(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            dimensions,
            client,
        })
    }

    fn unreachable(&self) -> RankError {
        RankError::Embedding(format!(
            "Cannot connect to Ollama at {}. Is Ollama running?\n\
             Install: https://ollama.ai\n\
             Start: ollama serve",
            self.endpoint
        ))
    }

    fn model_missing(&self) -> RankError {
        RankError::Embedding(format!(
            "Model '{}' not found. Pull it with:\n  ollama pull {}",
            self.model, self.model
        ))
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| RankError::Embedding("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbedRequest {
            model: &self.model,
            input: texts,
            truncate: true,
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    self.unreachable()
                } else {
                    RankError::Embedding(format!("Ollama request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 404 || body.contains("not found") {
                return Err(self.model_missing());
            }

            return Err(RankError::Embedding(format!(
                "Ollama error ({}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| RankError::Embedding(format!("invalid Ollama response: {}", e)))?;

        if embed_response.embeddings.len() != texts.len() {
            return Err(RankError::Embedding(format!(
                "expected {} embeddings, Ollama returned {}",
                texts.len(),
                embed_response.embeddings.len()
            )));
        }

        Ok(embed_response.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.endpoint))
            .send()
            .await
            .map_err(|_| self.unreachable())?;

        if !response.status().is_success() {
            return Err(RankError::Embedding(
                "Ollama health check failed".to_string(),
            ));
        }

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| RankError::Embedding(format!("invalid Ollama response: {}", e)))?;
        let model_available = tags
            .models
            .iter()
            .any(|m| m.name.starts_with(&self.model) || m.name == format!("{}:latest", self.model));

        if !model_available {
            return Err(self.model_missing());
        }

        Ok(())
    }
}
