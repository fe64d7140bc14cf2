//! quizgen - AI-Generated Multiple-Choice Quizzes
//!
//! Turns a topic into a set of four-option questions by prompting a
//! generative-language collaborator, extracting the JSON array it answers
//! with, and serving the result over HTTP or playing it in the terminal.
//!
//! ## Quick Start
//!
//! ```ignore
//! use quizgen::{ConfigLoader, QuizGenerator, QuizSession, GenerateRequest};
//!
//! let config = ConfigLoader::load()?;
//! let generator = QuizGenerator::from_config(&config)?;
//! let quiz = generator
//!     .generate(&GenerateRequest::new("Physics", Some(2), None))
//!     .await?;
//!
//! let mut session = QuizSession::new();
//! session.submit(quiz)?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt builder, collaborator providers, quiz extraction
//! - [`quiz`]: generation service and the play-through state machine
//! - [`server`]: `POST /api/quiz/generate`
//! - [`client`]: HTTP client for a running server
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod quiz;
pub mod server;
pub mod types;

// Configuration
pub use config::{Config, ConfigLoader, ValidationPolicy};

// Error Types
pub use types::error::{ErrorCategory, ExtractionError, LlmError, QuizError, Result};

// Quiz
pub use client::QuizClient;
pub use quiz::{QuizGenerator, QuizSession, ResultSummary, SessionState, Verdict};
pub use types::{GenerateRequest, QuizQuestion, QuizRequest, QuizSet};

// AI
pub use ai::{GeminiProvider, LlmProvider, LlmResponse, extract_quiz, quiz_prompt, with_timeout};
