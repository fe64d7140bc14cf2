pub mod commands;
pub mod player;
pub mod ui;

pub use player::{Player, PlayerOptions, QuizSource};
pub use ui::Output;
