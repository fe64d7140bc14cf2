//! Generate Command
//!
//! One in-process generation, printed to stdout.
//!
//! Usage:
//!   quizgen generate --topic T [-n N] [--language L] [-f text|json]

use console::style;

use crate::config::Config;
use crate::quiz::QuizGenerator;
use crate::server::GenerateResponse;
use crate::types::{GenerateRequest, QuizSet, Result};

pub async fn run(
    config: Config,
    topic: &str,
    count: Option<usize>,
    language: Option<&str>,
    format: &str,
) -> Result<()> {
    let generator = QuizGenerator::from_config(&config)?;
    let quiz = generator
        .generate(&GenerateRequest::new(topic, count, language))
        .await?;

    if format == "json" {
        let body = GenerateResponse { quiz_data: quiz };
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", format_quiz(&quiz));
    }
    Ok(())
}

/// Numbered questions with the answer marked
fn format_quiz(quiz: &QuizSet) -> String {
    let mut out = String::new();
    for (i, question) in quiz.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, style(&question.question).bold()));
        for (j, option) in question.options.iter().enumerate() {
            let marker = if question.is_correct(option) { "*" } else { " " };
            out.push_str(&format!("   {} {}) {}\n", marker, j + 1, option));
        }
        out.push('\n');
    }
    out
}
