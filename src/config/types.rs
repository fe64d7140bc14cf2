//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Constructed once at process entry and passed into the components that
//! need them.

use serde::{Deserialize, Serialize};

use crate::constants::{gemini, network, player, quiz};
use crate::types::{QuizError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Quiz generation settings
    pub quiz: QuizConfig,

    /// Terminal player settings
    pub player: PlayerConfig,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `QuizError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.llm.provider != gemini::PROVIDER_NAME {
            return Err(QuizError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.llm.provider,
                gemini::PROVIDER_NAME
            )));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(QuizError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(QuizError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_output_tokens == 0 {
            return Err(QuizError::Config(
                "LLM max_output_tokens must be greater than 0".to_string(),
            ));
        }

        if self.quiz.max_questions == 0 {
            return Err(QuizError::Config(
                "Quiz max_questions must be greater than 0".to_string(),
            ));
        }

        if !(1..=self.quiz.max_questions).contains(&self.quiz.default_questions) {
            return Err(QuizError::Config(format!(
                "Quiz default_questions must be between 1 and {}, got {}",
                self.quiz.max_questions, self.quiz.default_questions
            )));
        }

        if let Some(base) = &self.llm.api_base {
            url::Url::parse(base)
                .map_err(|e| QuizError::Config(format!("Invalid llm.api_base '{}': {}", base, e)))?;
        }

        if let Some(server_url) = &self.player.server_url {
            url::Url::parse(server_url).map_err(|e| {
                QuizError::Config(format!("Invalid player.server_url '{}': {}", server_url, e))
            })?;
        }

        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: network::DEFAULT_HOST.to_string(),
            port: network::DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

/// LLM provider configuration
///
/// The API key is never serialized and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider type (only "gemini" is supported)
    pub provider: String,
    /// Model name
    pub model: String,
    /// API base URL override
    pub api_base: Option<String>,
    /// API key; falls back to the GEMINI_API_KEY environment variable
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_output_tokens: u32,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: gemini::PROVIDER_NAME.to_string(),
            model: gemini::DEFAULT_MODEL.to_string(),
            api_base: None,
            api_key: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: gemini::DEFAULT_TEMPERATURE,
            max_output_tokens: gemini::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Quiz Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Questions generated when a request does not specify a count
    pub default_questions: usize,
    /// Largest count a request may ask for
    pub max_questions: usize,
    /// Language used when a request does not specify one
    pub default_language: String,
    /// How malformed questions in collaborator output are handled
    pub validation: ValidationPolicy,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_questions: quiz::DEFAULT_QUESTIONS,
            max_questions: quiz::MAX_QUESTIONS,
            default_language: quiz::DEFAULT_LANGUAGE.to_string(),
            validation: ValidationPolicy::default(),
        }
    }
}

/// Policy for questions that fail per-element validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Any malformed question rejects the whole set
    Strict,
    /// Malformed questions are dropped; fails only if none survive
    #[default]
    Filter,
    /// Only shape is checked (fields present with the right types)
    Lenient,
}

impl std::fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationPolicy::Strict => write!(f, "strict"),
            ValidationPolicy::Filter => write!(f, "filter"),
            ValidationPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl std::str::FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(ValidationPolicy::Strict),
            "filter" => Ok(ValidationPolicy::Filter),
            "lenient" => Ok(ValidationPolicy::Lenient),
            _ => Err(format!(
                "Unknown validation policy: {}. Valid values: strict, filter, lenient",
                s
            )),
        }
    }
}

// =============================================================================
// Player Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pause after each answer, in milliseconds
    pub feedback_delay_ms: u64,
    /// Quiz server to use instead of in-process generation
    pub server_url: Option<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: player::FEEDBACK_DELAY_MS,
            server_url: None,
        }
    }
}
