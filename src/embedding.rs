//! OpenAI embeddings client
//!
//! Thin wrapper over the `/embeddings` endpoint. Uses a long-lived
//! reqwest::Client for connection pooling; requests are batched but
//! strictly sequential.

use crate::error::AnalyzerError;
use crate::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Largest number of inputs sent in one embeddings request.
pub const MAX_EMBED_BATCH: usize = 64;

/// Reusable embeddings client (connection-pooled).
#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl EmbeddingClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        model: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AnalyzerError::Embedding(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            api_key,
            model,
        })
    }

    /// Embeds a single query string.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors.pop().ok_or_else(|| {
            AnalyzerError::Embedding("embeddings API returned no vector for query".to_string())
        })
    }

    /// Embeds a batch of texts, returning vectors in input order.
    pub async fn embed_batch(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        if inputs.len() > MAX_EMBED_BATCH {
            return Err(AnalyzerError::Embedding(format!(
                "batch of {} exceeds maximum {}",
                inputs.len(),
                MAX_EMBED_BATCH
            )));
        }

        let request = EmbeddingRequest {
            model: &self.model,
            input: inputs,
        };

        info!(count = inputs.len(), model = %self.model, "requesting embeddings");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("embeddings request failed: {}", e);
                AnalyzerError::Embedding(format!("embeddings request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "embeddings API error response: {}", body);
            return Err(AnalyzerError::Embedding(format!(
                "embeddings API returned {}: {}",
                status, body
            )));
        }

        let mut parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            AnalyzerError::Embedding(format!("failed to parse embeddings response: {}", e))
        })?;

        if parsed.data.len() != inputs.len() {
            return Err(AnalyzerError::Embedding(format!(
                "embeddings API returned {} vectors for {} inputs",
                parsed.data.len(),
                inputs.len()
            )));
        }

        // The API may reorder results; `index` restores input order.
        parsed.data.sort_by_key(|entry| entry.index);
        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = EmbeddingRequest {
            model: "text-embedding-ada-002",
            input: &["We face risks."],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"text-embedding-ada-002\""));
        assert!(json.contains("We face risks."));
    }

    #[test]
    fn test_response_reordering_by_index() {
        let raw = r#"{"data":[
            {"embedding":[0.2],"index":1},
            {"embedding":[0.1],"index":0}
        ]}"#;
        let mut parsed: EmbeddingResponse = serde_json::from_str(raw).unwrap();
        parsed.data.sort_by_key(|entry| entry.index);
        assert_eq!(parsed.data[0].embedding, vec![0.1]);
        assert_eq!(parsed.data[1].embedding, vec![0.2]);
    }
}
