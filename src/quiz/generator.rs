//! Quiz Generation Service
//!
//! request → prompt → collaborator (bounded by the configured timeout) →
//! extraction. One collaborator call per request; nothing is retried.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::ai::{SharedProvider, create_provider, extract_quiz_with_policy, quiz_prompt, with_timeout};
use crate::config::{Config, QuizConfig};
use crate::types::{
    ErrorCategory, GenerateRequest, LlmError, QuizError, QuizRequest, QuizSet, Result,
};

/// Generates quiz sets through a collaborator
#[derive(Clone)]
pub struct QuizGenerator {
    provider: SharedProvider,
    quiz: QuizConfig,
    timeout: Duration,
}

pub type SharedGenerator = Arc<QuizGenerator>;

impl QuizGenerator {
    pub fn new(provider: SharedProvider, config: &Config) -> Self {
        Self {
            provider,
            quiz: config.quiz.clone(),
            timeout: config.llm.timeout(),
        }
    }

    /// Build the generator with the provider named in config
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.llm)?;
        Ok(Self::new(provider, config))
    }

    pub fn quiz_config(&self) -> &QuizConfig {
        &self.quiz
    }

    /// Validate a wire request, then generate
    pub async fn generate(&self, raw: &GenerateRequest) -> Result<QuizSet> {
        let request = QuizRequest::from_generate_request(raw, &self.quiz)?;
        self.generate_for(&request).await
    }

    /// Generate a quiz set for a validated request
    #[instrument(skip(self, request), fields(topic = %request.topic, count = request.count))]
    pub async fn generate_for(&self, request: &QuizRequest) -> Result<QuizSet> {
        let prompt = quiz_prompt(request);
        debug!("Prompt:\n{}", prompt);

        let provider_name = self.provider.name().to_string();
        let response = with_timeout(
            self.timeout,
            self.provider.generate(&prompt),
            "collaborator request",
        )
        .await
        .map_err(|e| match e {
            QuizError::Timeout { duration, .. } => LlmError::with_provider(
                ErrorCategory::Network,
                format!("no response within {:?}", duration),
                provider_name.as_str(),
            )
            .into(),
            other => other,
        })?;

        let model = match response.metadata.model.as_str() {
            "" => self.provider.model(),
            reported => reported,
        };
        info!(
            "Collaborator {} ({}) answered in {}ms, {} tokens, finish reason {}",
            provider_name,
            model,
            response.timing.total_ms,
            response.usage.total(),
            response.metadata.finish_reason.as_deref().unwrap_or("unknown")
        );

        let text = match response.content.filter(|text| !text.is_empty()) {
            Some(text) => text,
            None => {
                warn!("Collaborator {} returned no text", provider_name);
                return Err(QuizError::CollaboratorEmptyResponse {
                    provider: provider_name,
                    raw: response.raw,
                });
            }
        };

        let questions = extract_quiz_with_policy(&text, self.quiz.validation)?;

        if questions.len() != request.count {
            warn!(
                "Requested {} questions, collaborator produced {} usable",
                request.count,
                questions.len()
            );
        }

        Ok(questions)
    }
}
