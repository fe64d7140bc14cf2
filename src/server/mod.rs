//! HTTP Server
//!
//! Exposes `POST /api/quiz/generate`. Every request is handled
//! independently; the only shared state is the immutable generator.

mod response;

pub use response::{ApiError, ErrorBody, GenerateResponse};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::constants::api::GENERATE_PATH;
use crate::quiz::SharedGenerator;
use crate::types::{GenerateRequest, QuizError, Result};

/// Build the application router
pub fn router(generator: SharedGenerator) -> Router {
    Router::new()
        .route(GENERATE_PATH, post(generate_quiz))
        .with_state(generator)
}

/// Bind to the configured address and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, generator: SharedGenerator) -> Result<()> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    serve_with_shutdown(listener, generator, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    generator: SharedGenerator,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Server listening at http://{}", addr);

    axum::serve(listener, router(generator))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

async fn generate_quiz(
    State(generator): State<SharedGenerator>,
    body: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> std::result::Result<Json<GenerateResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate", %request_id);

    async move {
        let Json(request) =
            body.map_err(|e| QuizError::invalid_request(format!("Invalid request body: {}", e)))?;

        info!("Generating quiz");
        let quiz_data = generator.generate(&request).await?;
        info!("Returning {} questions", quiz_data.len());

        Ok(Json(GenerateResponse { quiz_data }))
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::SharedProvider;
    use crate::ai::provider::stub::{PHYSICS_QUIZ, StubProvider, StubReply};
    use crate::config::{Config, ValidationPolicy};
    use crate::quiz::QuizGenerator;
    use crate::types::{ErrorCategory, LlmError};
    use serde_json::{Value, json};
    use std::sync::Arc;

    /// Serve a generator backed by `stub`; returns the base URL
    async fn spawn_app(stub: StubProvider) -> String {
        spawn_app_with(stub, &Config::default()).await
    }

    async fn spawn_app_with(stub: StubProvider, config: &Config) -> String {
        let provider: SharedProvider = Arc::new(stub);
        let generator = Arc::new(QuizGenerator::new(provider, config));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_with_shutdown(
            listener,
            generator,
            std::future::pending(),
        ));
        format!("http://{}", addr)
    }

    async fn post(base: &str, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("{}{}", base, GENERATE_PATH))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_generate_ok() {
        let base = spawn_app(StubProvider::text(PHYSICS_QUIZ)).await;
        let (status, body) = post(&base, json!({"topic": "Physics", "numQuestions": 2})).await;

        assert_eq!(status, 200);
        let questions = body["quizData"].as_array().unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0]["answer"], "Newton");
        assert_eq!(questions[1]["options"][0], "3x10^8 m/s");
    }

    #[tokio::test]
    async fn test_missing_topic_is_400() {
        let base = spawn_app(StubProvider::text(PHYSICS_QUIZ)).await;
        let (status, body) = post(&base, json!({"numQuestions": 2})).await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({"error": "Missing or invalid topic"}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let base = spawn_app(StubProvider::text(PHYSICS_QUIZ)).await;
        let response = reqwest::Client::new()
            .post(format!("{}{}", base, GENERATE_PATH))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_unparseable_text_is_500_with_raw() {
        let base = spawn_app(StubProvider::text("I cannot generate that.")).await;
        let (status, body) = post(&base, json!({"topic": "Physics"})).await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], "Collaborator returned invalid JSON");
        assert_eq!(body["raw"], "I cannot generate that.");
    }

    const THREE_OPTIONS: &str = r#"[{"question":"q","options":["a","b","c"],"answer":"a"}]"#;

    /// One good question, one with three options
    const MIXED: &str = r#"[{"question":"Unit of force?","options":["Newton","Joule","Watt","Pascal"],"answer":"Newton"},{"question":"q","options":["a","b","c"],"answer":"a"}]"#;

    #[tokio::test]
    async fn test_all_elements_malformed_is_500_with_raw() {
        let base = spawn_app(StubProvider::text(THREE_OPTIONS)).await;
        let (status, body) = post(&base, json!({"topic": "Physics"})).await;

        assert_eq!(status, 500);
        assert!(body["error"].is_string());
        assert_eq!(body["raw"], THREE_OPTIONS);
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_one_bad_element() {
        let mut config = Config::default();
        config.quiz.validation = ValidationPolicy::Strict;
        let base = spawn_app_with(StubProvider::text(MIXED), &config).await;
        let (status, body) = post(&base, json!({"topic": "Physics"})).await;

        assert_eq!(status, 500);
        assert_eq!(body["raw"], MIXED);
    }

    #[tokio::test]
    async fn test_filter_policy_drops_bad_element() {
        let base = spawn_app(StubProvider::text(MIXED)).await;
        let (status, body) = post(&base, json!({"topic": "Physics"})).await;

        assert_eq!(status, 200);
        assert_eq!(body["quizData"].as_array().unwrap().len(), 1);
        assert_eq!(body["quizData"][0]["answer"], "Newton");
    }

    #[tokio::test]
    async fn test_no_text_is_502_with_raw_object() {
        let raw = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let base = spawn_app(StubProvider::new(StubReply::Empty(raw.clone()))).await;
        let (status, body) = post(&base, json!({"topic": "Physics"})).await;

        assert_eq!(status, 502);
        assert_eq!(body["raw"], raw);
    }

    #[tokio::test]
    async fn test_collaborator_down_is_500_with_detail() {
        let failure = LlmError::with_provider(ErrorCategory::Transient, "overloaded", "stub")
            .status(503)
            .detail(json!({"error": {"code": 503}}));
        let base = spawn_app(StubProvider::new(StubReply::Fail(failure))).await;
        let (status, body) = post(&base, json!({"topic": "Physics"})).await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["detail"], json!({"error": {"code": 503}}));
    }
}
