//! Play Command
//!
//! Usage:
//!   quizgen play [--topic T] [-n N] [--language L] [--server URL]

use std::time::Duration;

use crate::cli::{Player, PlayerOptions, QuizSource};
use crate::client::QuizClient;
use crate::config::Config;
use crate::quiz::QuizGenerator;
use crate::types::Result;

pub struct PlayArgs {
    pub topic: Option<String>,
    pub count: Option<usize>,
    pub language: Option<String>,
    pub server: Option<String>,
}

/// The server may spend its whole collaborator timeout before answering
fn client_timeout(config: &Config) -> Duration {
    config.llm.timeout() * 2
}

pub async fn run(config: Config, args: PlayArgs) -> Result<()> {
    let source = match args.server.or_else(|| config.player.server_url.clone()) {
        Some(url) => QuizSource::Remote(QuizClient::new(&url, client_timeout(&config))?),
        None => QuizSource::Local(QuizGenerator::from_config(&config)?),
    };

    let options = PlayerOptions {
        count: args.count,
        language: args.language,
        feedback_delay: Duration::from_millis(config.player.feedback_delay_ms),
    };

    Player::new(source, options).run(args.topic).await
}
