//! Environment-driven configuration
//!
//! All credentials and model identities are resolved once at startup and
//! injected into each component; no global client state.

use crate::error::AnalyzerError;
use crate::Result;
use std::env;
use std::time::Duration;

/// Default OpenAI-compatible API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
/// Default chat model used for both the agent and the document tool.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo-0613";

/// Runtime configuration shared across the pipeline stages.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub openai_api_key: String,
    pub api_base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    /// Sampling temperature for chat calls. Kept at zero for determinism.
    pub temperature: f32,
    /// Target chunk length in characters.
    pub chunk_size: usize,
    /// Character overlap between consecutive chunks of one document.
    pub chunk_overlap: usize,
    /// Number of chunks the retriever returns per query.
    pub top_k: usize,
    /// Upper bound on agent reasoning steps before giving up.
    pub max_agent_steps: u32,
    /// Timeout applied to embedding and chat HTTP calls.
    pub request_timeout: Duration,
}

impl AnalyzerConfig {
    /// Builds the configuration from environment variables.
    ///
    /// `OPENAI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            AnalyzerError::Configuration(
                "OPENAI_API_KEY not set; the embedding and chat backends are unavailable"
                    .to_string(),
            )
        })?;

        let api_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let embedding_model =
            env::var("EMBEDDING_MODEL").unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let chat_model = env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        Ok(Self {
            openai_api_key,
            api_base_url,
            embedding_model,
            chat_model,
            temperature: 0.0,
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 4,
            max_agent_steps: 8,
            request_timeout: Duration::from_secs(60),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_a_configuration_error() {
        // Serialize access to the process environment within this test.
        env::remove_var("OPENAI_API_KEY");
        let result = AnalyzerConfig::from_env();
        assert!(matches!(result, Err(AnalyzerError::Configuration(_))));
    }
}
