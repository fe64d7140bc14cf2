pub mod config;
pub mod generate;
pub mod play;
pub mod serve;
