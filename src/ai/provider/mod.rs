//! LLM Provider Abstraction
//!
//! Defines the `LlmProvider` trait: given a prompt, return the collaborator's
//! raw response and the text it carries (if any). Interpreting that text is
//! left to the validation layer.

mod gemini;
#[cfg(test)]
pub mod stub;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::constants::gemini as gemini_constants;
use crate::types::{QuizError, Result};

// =============================================================================
// LLM Response with Usage Metrics
// =============================================================================

/// Collaborator response: extracted text, raw body, usage metrics
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text, `None` when the response had no usable text field
    pub content: Option<String>,
    /// Response body as received
    pub raw: Value,
    /// Token usage metrics
    pub usage: TokenUsage,
    /// Response timing
    pub timing: ResponseTiming,
    /// Provider and model info
    pub metadata: ResponseMetadata,
}

impl LlmResponse {
    /// Response with text only (usage/timing unknown)
    pub fn text_only(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: Value::String(text.clone()),
            content: Some(text),
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
            metadata: ResponseMetadata::default(),
        }
    }
}

/// Token usage metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt)
    pub input_tokens: u32,
    /// Output tokens (response)
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }

    /// Create from Gemini `usageMetadata`
    pub fn from_gemini(prompt_token_count: u32, candidates_token_count: u32) -> Self {
        Self {
            input_tokens: prompt_token_count,
            output_tokens: candidates_token_count,
        }
    }
}

/// Response timing metrics
#[derive(Debug, Clone, Default)]
pub struct ResponseTiming {
    /// Total response time in milliseconds (wall clock)
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    /// Model used
    pub model: String,
    /// Provider name
    pub provider: String,
    /// Why generation stopped, as reported by the provider
    pub finish_reason: Option<String>,
}

/// Shared LLM provider type for concurrent access across requests.
pub type SharedProvider = Arc<dyn LlmProvider>;

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// Text generation collaborator
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send `prompt` and return the response
    ///
    /// Transport failures and non-2xx statuses are
    /// `QuizError::CollaboratorUnavailable`. A 2xx response without text is
    /// *not* an error here: `content` is `None`.
    async fn generate(&self, prompt: &str) -> Result<LlmResponse>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        gemini_constants::PROVIDER_NAME => Ok(Arc::new(GeminiProvider::new(config)?)),
        _ => Err(QuizError::Config(format!(
            "Unknown provider: {}. Supported: {}",
            config.provider,
            gemini_constants::PROVIDER_NAME
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_usage_from_gemini() {
        let usage = TokenUsage::from_gemini(120, 480);
        assert_eq!(usage.input_tokens, 120);
        assert_eq!(usage.output_tokens, 480);
        assert_eq!(usage.total(), 600);
    }

    #[test]
    fn test_token_total_saturates() {
        let usage = TokenUsage::from_gemini(u32::MAX, 10);
        assert_eq!(usage.total(), u32::MAX);
    }

    #[test]
    fn test_text_only_response() {
        let response = LlmResponse::text_only("[]");
        assert_eq!(response.content.as_deref(), Some("[]"));
        assert_eq!(response.raw, Value::String("[]".to_string()));
    }

    #[test]
    fn test_create_provider_unknown() {
        let config = LlmConfig {
            provider: "openai".to_string(),
            ..LlmConfig::default()
        };
        assert!(matches!(create_provider(&config), Err(QuizError::Config(_))));
    }

    #[test]
    fn test_create_provider_gemini() {
        let config = LlmConfig {
            api_key: Some("test-key".to_string()),
            ..LlmConfig::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-2.5-flash");
    }
}
