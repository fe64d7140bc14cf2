//! HTTP client for a running quiz server

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::constants::api::GENERATE_PATH;
use crate::types::{GenerateRequest, QuizError, QuizQuestion, QuizSet, Result};

#[derive(Debug, Clone)]
pub struct QuizClient {
    base_url: String,
    http: Client,
}

impl QuizClient {
    /// `timeout` bounds each whole request, including the server's wait on
    /// its collaborator
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a quiz from the server
    pub async fn generate(
        &self,
        topic: &str,
        count: Option<usize>,
        language: Option<&str>,
    ) -> Result<QuizSet> {
        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        let request = GenerateRequest::new(topic, count, language);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Quiz generation failed")
                .to_string();
            return Err(QuizError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let Some(items) = body.get("quizData").filter(|v| v.is_array()) else {
            return Err(QuizError::Server {
                status: status.as_u16(),
                message: "Response carried no quizData".to_string(),
            });
        };

        let questions: Vec<QuizQuestion> = serde_json::from_value(items.clone())?;
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::SharedProvider;
    use crate::ai::provider::stub::{PHYSICS_QUIZ, StubProvider, StubReply};
    use crate::config::Config;
    use crate::quiz::{QuizGenerator, QuizSession, SessionState};
    use crate::server::serve_with_shutdown;
    use axum::{Json, Router, routing::post};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn spawn_app(stub: StubProvider) -> String {
        let provider: SharedProvider = Arc::new(stub);
        let generator = Arc::new(QuizGenerator::new(provider, &Config::default()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_with_shutdown(
            listener,
            generator,
            std::future::pending(),
        ));
        format!("http://{}", addr)
    }

    /// A server that answers every request with `body`
    async fn spawn_fixed(body: Value) -> String {
        let app = Router::new().route(
            GENERATE_PATH,
            post(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_physics_end_to_end() {
        let base = spawn_app(StubProvider::text(PHYSICS_QUIZ)).await;
        let client = QuizClient::new(&base, TIMEOUT).unwrap();

        let quiz = client.generate("Physics", Some(2), None).await.unwrap();
        assert_eq!(quiz.len(), 2);

        let mut session = QuizSession::new();
        session.submit(quiz).unwrap();
        while let Some((_, question)) = session.current_question() {
            let answer = question.answer.clone();
            session.answer(&answer);
        }
        assert_eq!(session.state(), SessionState::Complete { score: 2, total: 2 });
    }

    #[tokio::test]
    async fn test_server_error_message_surfaces() {
        let base = spawn_app(StubProvider::text("I cannot generate that.")).await;
        let client = QuizClient::new(&base, TIMEOUT).unwrap();

        let err = client.generate("Physics", None, None).await.unwrap_err();
        match err {
            QuizError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Collaborator returned invalid JSON");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_gateway_is_error() {
        let base = spawn_app(StubProvider::new(StubReply::Empty(json!({})))).await;
        let client = QuizClient::new(&base, TIMEOUT).unwrap();

        let err = client.generate("Physics", None, None).await.unwrap_err();
        assert!(matches!(err, QuizError::Server { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_request_bounded_by_timeout() {
        let slow = StubReply::Slow(Duration::from_secs(2), PHYSICS_QUIZ.to_string());
        let base = spawn_app(StubProvider::new(slow)).await;
        let client = QuizClient::new(&base, Duration::from_millis(100)).unwrap();

        match client.generate("Physics", Some(2), None).await {
            Err(QuizError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_quiz_data_is_error() {
        let base = spawn_fixed(json!({"questions": []})).await;
        let client = QuizClient::new(&base, TIMEOUT).unwrap();

        let err = client.generate("Physics", None, None).await.unwrap_err();
        assert!(matches!(err, QuizError::Server { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_empty_quiz_data_is_ok() {
        let base = spawn_fixed(json!({"quizData": []})).await;
        let client = QuizClient::new(&format!("{}/", base), TIMEOUT).unwrap();

        let quiz = client.generate("Physics", None, None).await.unwrap();
        assert!(quiz.is_empty());
    }
}
