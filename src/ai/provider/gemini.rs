//! Gemini API Provider
//!
//! Collaborator backed by the Google Generative Language API
//! (`models/{model}:generateContent`). The generated text is read from
//! `candidates[0].content.parts[0].text`; any other shape yields a response
//! without content rather than an error.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{LlmProvider, LlmResponse, ResponseMetadata, ResponseTiming, TokenUsage};
use crate::config::LlmConfig;
use crate::constants::gemini::{
    API_KEY_ENV, API_KEY_HEADER, DEFAULT_API_BASE, PROVIDER_NAME,
};
use crate::types::{ErrorClassifier, QuizError, Result};

/// Gemini API provider with secure API key handling
pub struct GeminiProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                QuizError::Config(format!(
                    "Gemini API key not found. Set {} env var or llm.api_key in config",
                    API_KEY_ENV
                ))
            })?;

        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| QuizError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            api_base,
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn build_request<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
        info!(
            "Generating with Gemini (model: {}, temperature: {})",
            self.model, self.temperature
        );

        let start_time = Instant::now();
        let request = self.build_request(prompt);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER_NAME))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER_NAME))?;
        let elapsed = start_time.elapsed();

        // Non-JSON bodies are kept as a string so they can still be surfaced
        let raw = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));

        if !status.is_success() {
            let message = raw
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("Gemini API error ({})", status));
            warn!("Gemini API returned {}: {}", status, message);
            return Err(
                ErrorClassifier::classify_http_status(status.as_u16(), &message, PROVIDER_NAME)
                    .detail(raw)
                    .into(),
            );
        }

        let content = raw
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(String::from);

        let finish_reason = raw
            .pointer("/candidates/0/finishReason")
            .and_then(Value::as_str)
            .map(String::from);
        if let Some(reason) = finish_reason.as_deref()
            && reason != "STOP"
        {
            warn!("Gemini finished with reason {}", reason);
        }

        let usage = raw
            .get("usageMetadata")
            .map(|meta| {
                let count = |key: &str| {
                    meta.get(key)
                        .and_then(Value::as_u64)
                        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
                };
                TokenUsage::from_gemini(count("promptTokenCount"), count("candidatesTokenCount"))
            })
            .unwrap_or_default();

        debug!(
            "Received Gemini response in {}ms ({} tokens)",
            elapsed.as_millis(),
            usage.total()
        );

        Ok(LlmResponse {
            content,
            raw,
            usage,
            timing: ResponseTiming::from_duration(elapsed),
            metadata: ResponseMetadata {
                model: self.model.clone(),
                provider: PROVIDER_NAME.to_string(),
                finish_reason,
            },
        })
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}
