//! Quiz Session State Machine
//!
//! `Idle --submit--> InProgress(0, 0) --answer--> ... --answer--> Complete(score, total)`,
//! and `restart` back to `Idle`.
//!
//! Transitions are synchronous and total. Any pause between an answer and
//! the next question belongs to the presentation layer.

use crate::types::{QuizError, QuizQuestion, QuizSet, Result};

use super::summary::ResultSummary;

/// Where a play-through stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No quiz loaded
    #[default]
    Idle,
    /// `index` is the question awaiting an answer; `score` counts correct
    /// answers so far
    InProgress { index: usize, score: usize },
    /// Every question answered
    Complete { score: usize, total: usize },
}

/// Result of answering the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Index of the question that was answered
    pub question_index: usize,
    pub selected: String,
    pub expected: String,
    pub correct: bool,
    /// State after the transition
    pub state: SessionState,
}

/// One user's play-through of a quiz set
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: QuizSet,
    state: SessionState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Complete { .. })
    }

    /// The question awaiting an answer, with its index
    pub fn current_question(&self) -> Option<(usize, &QuizQuestion)> {
        match self.state {
            SessionState::InProgress { index, .. } => {
                self.questions.get(index).map(|q| (index, q))
            }
            _ => None,
        }
    }

    /// Load a quiz set and start at the first question
    ///
    /// An empty set is rejected and the session stays `Idle`.
    pub fn submit(&mut self, questions: QuizSet) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(QuizError::SessionBusy);
        }
        if questions.is_empty() {
            return Err(QuizError::EmptySubmission);
        }

        self.questions = questions;
        self.state = SessionState::InProgress { index: 0, score: 0 };
        Ok(())
    }

    /// Record the answer to the current question and advance
    ///
    /// Returns `None` when no question is awaiting an answer; the state is
    /// unchanged in that case.
    pub fn answer(&mut self, selected: &str) -> Option<AnswerOutcome> {
        let SessionState::InProgress { index, score } = self.state else {
            return None;
        };
        let question = self.questions.get(index)?;

        let correct = question.is_correct(selected);
        let score = if correct { score + 1 } else { score };
        let total = self.questions.len();

        let expected = question.answer.clone();
        self.state = if index + 1 < total {
            SessionState::InProgress {
                index: index + 1,
                score,
            }
        } else {
            SessionState::Complete { score, total }
        };

        Some(AnswerOutcome {
            question_index: index,
            selected: selected.to_string(),
            expected,
            correct,
            state: self.state,
        })
    }

    /// Drop the quiz set and return to `Idle`
    pub fn restart(&mut self) {
        self.questions.clear();
        self.state = SessionState::Idle;
    }

    /// Score summary, available once complete
    pub fn summary(&self) -> Option<ResultSummary> {
        match self.state {
            SessionState::Complete { score, total } => Some(ResultSummary::new(score, total)),
            _ => None,
        }
    }
}
