//! Serve Command
//!
//! Usage:
//!   quizgen serve [--host HOST] [--port PORT]

use std::sync::Arc;

use crate::cli::Output;
use crate::config::Config;
use crate::quiz::QuizGenerator;
use crate::server;
use crate::types::Result;

pub async fn run(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let generator = Arc::new(QuizGenerator::from_config(&config)?);

    let output = Output::new();
    output.info(&format!(
        "Serving quizzes from {} ({})",
        config.llm.provider, config.llm.model
    ));
    output.detail("Address", &format!("http://{}", config.server.bind_address()));
    let quiz = generator.quiz_config();
    output.detail(
        "Quiz",
        &format!(
            "{} questions by default (max {}), {} validation",
            quiz.default_questions, quiz.max_questions, quiz.validation
        ),
    );

    server::serve(&config.server, generator).await
}
