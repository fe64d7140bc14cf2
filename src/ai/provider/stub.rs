//! Scripted provider for tests

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

use super::{LlmProvider, LlmResponse};
use crate::types::{LlmError, Result};

/// Collaborator text for a two-question physics quiz
pub const PHYSICS_QUIZ: &str = r#"[{"question":"Unit of force?","options":["Newton","Joule","Watt","Pascal"],"answer":"Newton"}, {"question":"Speed of light approx?","options":["3x10^8 m/s","3x10^6 m/s","3x10^5 km/h","1x10^8 m/s"],"answer":"3x10^8 m/s"}]"#;

/// What the stub answers with
#[derive(Debug, Clone)]
pub enum StubReply {
    /// 2xx with this text
    Text(String),
    /// 2xx without text; the raw body
    Empty(Value),
    /// Transport or status failure
    Fail(LlmError),
    /// Sleep, then answer with the text
    Slow(Duration, String),
}

/// Provider returning a fixed reply and recording prompts
pub struct StubProvider {
    reply: StubReply,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(StubReply::Text(text.into()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            StubReply::Text(text) => Ok(LlmResponse::text_only(text.clone())),
            StubReply::Empty(raw) => Ok(LlmResponse {
                content: None,
                raw: raw.clone(),
                ..LlmResponse::text_only("")
            }),
            StubReply::Fail(err) => Err(err.clone().into()),
            StubReply::Slow(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(LlmResponse::text_only(text.clone()))
            }
        }
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}
