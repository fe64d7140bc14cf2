//! Terminal Quiz Player
//!
//! Drives a `QuizSession` from the keyboard. The session owns every state
//! transition; this module only renders and waits.
//!
//! ```text
//! topic → fetch → Question 1/N ... Question N/N → results → play again?
//! ```

use console::{Key, Term, style};
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::QuizClient;
use crate::constants::player::PROGRESS_BAR_WIDTH;
use crate::quiz::{QuizGenerator, QuizSession, ResultSummary};
use crate::types::{GenerateRequest, QuizError, QuizQuestion, QuizSet, Result};

// =============================================================================
// Quiz Source
// =============================================================================

/// Where quiz sets come from
pub enum QuizSource {
    /// Generate in-process
    Local(QuizGenerator),
    /// Ask a running quiz server
    Remote(QuizClient),
}

impl QuizSource {
    pub async fn fetch(
        &self,
        topic: &str,
        count: Option<usize>,
        language: Option<&str>,
    ) -> Result<QuizSet> {
        match self {
            QuizSource::Local(generator) => {
                generator
                    .generate(&GenerateRequest::new(topic, count, language))
                    .await
            }
            QuizSource::Remote(client) => client.generate(topic, count, language).await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            QuizSource::Local(_) => "in-process generator".to_string(),
            QuizSource::Remote(client) => client.base_url().to_string(),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// What a key press means while a question is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Zero-based option index
    Select(usize),
    Quit,
    Ignore,
}

pub fn key_action(key: &Key, option_count: usize) -> KeyAction {
    match key {
        Key::Escape | Key::Char('q') | Key::Char('Q') => KeyAction::Quit,
        Key::Char(c) => match c.to_digit(10) {
            Some(n) if n >= 1 && (n as usize) <= option_count => KeyAction::Select(n as usize - 1),
            _ => KeyAction::Ignore,
        },
        _ => KeyAction::Ignore,
    }
}

pub fn render_question(index: usize, total: usize, question: &QuizQuestion) -> String {
    let mut out = format!(
        "{}\n\n{}\n\n",
        style(format!("Question {}/{}", index + 1, total)).dim(),
        style(&question.question).bold()
    );
    for (i, option) in question.options.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, option));
    }
    out.push_str(&format!(
        "\n{}",
        style(format!("Press 1-{} to answer, Esc to quit", question.options.len())).dim()
    ));
    out
}

/// Question view after an answer: correct option green, wrong pick red
pub fn render_feedback(
    index: usize,
    total: usize,
    question: &QuizQuestion,
    selected: usize,
) -> String {
    let mut out = format!(
        "{}\n\n{}\n\n",
        style(format!("Question {}/{}", index + 1, total)).dim(),
        style(&question.question).bold()
    );

    for (i, option) in question.options.iter().enumerate() {
        let line = format!("{}. {}", i + 1, option);
        if question.is_correct(option) {
            out.push_str(&format!("{} {}\n", style("✓").green(), style(line).green()));
        } else if i == selected {
            out.push_str(&format!("{} {}\n", style("✗").red(), style(line).red()));
        } else {
            out.push_str(&format!("  {}\n", line));
        }
    }

    let picked_correct = question
        .options
        .get(selected)
        .is_some_and(|option| question.is_correct(option));
    if picked_correct {
        out.push_str(&format!("\n{}", style("Correct!").green().bold()));
    } else {
        out.push_str(&format!(
            "\n{} The answer was {}",
            style("Wrong!").red().bold(),
            style(&question.answer).green()
        ));
    }
    out
}

pub fn render_results(summary: &ResultSummary) -> String {
    format!(
        "{}\n\n  Score: {}/{} ({}%)\n  {}\n  {}\n",
        style("Results").bold().underlined(),
        summary.score,
        summary.total,
        summary.percentage,
        style(summary.verdict).bold(),
        render_progress_bar(summary.score, summary.total, PROGRESS_BAR_WIDTH)
    )
}

fn render_progress_bar(completed: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return format!("[{}]", "░".repeat(width));
    }

    let progress = (completed as f32 / total as f32).min(1.0);
    let filled = (progress * width as f32).round() as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

// =============================================================================
// Player
// =============================================================================

#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub count: Option<usize>,
    pub language: Option<String>,
    pub feedback_delay: Duration,
}

pub struct Player {
    term: Term,
    source: QuizSource,
    options: PlayerOptions,
    session: QuizSession,
}

impl Player {
    pub fn new(source: QuizSource, options: PlayerOptions) -> Self {
        Self {
            term: Term::stdout(),
            source,
            options,
            session: QuizSession::new(),
        }
    }

    /// Play until the user quits
    ///
    /// A generation failure shows the error and asks for a topic again.
    pub async fn run(&mut self, topic: Option<String>) -> Result<()> {
        debug!("Player using {}", self.source.describe());
        let mut next_topic = topic.filter(|t| !t.trim().is_empty());

        loop {
            let topic = match next_topic.take() {
                Some(topic) => topic,
                None => match self.prompt_topic()? {
                    Some(topic) => topic,
                    None => return Ok(()),
                },
            };

            self.term
                .write_line(&format!("{}", style(format!("Generating quiz on \"{}\"...", topic)).dim()))?;
            let quiz = match self
                .source
                .fetch(&topic, self.options.count, self.options.language.as_deref())
                .await
            {
                Ok(quiz) => quiz,
                Err(e) => {
                    self.show_error(&e)?;
                    continue;
                }
            };

            self.session.restart();
            if let Err(e) = self.session.submit(quiz) {
                self.show_error(&e)?;
                continue;
            }

            if !self.play_through().await? {
                return Ok(());
            }
            if let Some(summary) = self.session.summary() {
                self.term.write_line(&render_results(&summary))?;
            }
            if !self.ask_restart()? {
                return Ok(());
            }
            self.session.restart();
        }
    }

    /// Returns `false` if the user quit mid-quiz
    async fn play_through(&mut self) -> Result<bool> {
        let total = self.session.total();

        while let Some((index, question)) = self.session.current_question() {
            let question = question.clone();
            self.term.clear_screen()?;
            self.term.write_line(&render_question(index, total, &question))?;

            let Some(selected) = self.read_choice(question.options.len())? else {
                return Ok(false);
            };
            let Some(option) = question.options.get(selected) else {
                continue;
            };
            if self.session.answer(option).is_none() {
                break;
            }

            self.term.clear_screen()?;
            self.term
                .write_line(&render_feedback(index, total, &question, selected))?;
            tokio::time::sleep(self.options.feedback_delay).await;
        }

        self.term.clear_screen()?;
        Ok(true)
    }

    /// First valid selection wins; `None` on quit
    fn read_choice(&self, option_count: usize) -> Result<Option<usize>> {
        loop {
            match key_action(&self.term.read_key()?, option_count) {
                KeyAction::Select(index) => return Ok(Some(index)),
                KeyAction::Quit => return Ok(None),
                KeyAction::Ignore => {}
            }
        }
    }

    fn prompt_topic(&self) -> Result<Option<String>> {
        self.term.write_str("Topic (blank to quit): ")?;
        let topic = self.term.read_line()?;
        let topic = topic.trim();
        Ok((!topic.is_empty()).then(|| topic.to_string()))
    }

    fn ask_restart(&self) -> Result<bool> {
        self.term.write_str("Play again? [y/N] ")?;
        let key = self.term.read_key()?;
        self.term.write_line("")?;
        Ok(matches!(key, Key::Char('y') | Key::Char('Y')))
    }

    fn show_error(&self, err: &QuizError) -> Result<()> {
        warn!("Quiz unavailable: {}", err);
        let message = match err {
            QuizError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        };
        self.term
            .write_line(&format!("{} {}", style("✗").red(), style(message).red()))?;
        Ok(())
    }
}
