//! Quiz generation and play
//!
//! - `generator`: request → collaborator → quiz set
//! - `session`: the play-through state machine
//! - `summary`: score and verdict for the results view

pub mod generator;
pub mod session;
pub mod summary;

pub use generator::{QuizGenerator, SharedGenerator};
pub use session::{AnswerOutcome, QuizSession, SessionState};
pub use summary::{ResultSummary, Verdict};
