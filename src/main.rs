use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizgen::cli::commands;
use quizgen::{Config, ConfigLoader, ValidationPolicy};

#[derive(Parser)]
#[command(name = "quizgen")]
#[command(version, about = "AI-generated multiple-choice quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Config file (default: ./quizgen.toml)")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the quiz HTTP server
    Serve {
        #[arg(long, help = "Bind host")]
        host: Option<String>,
        #[arg(long, short, help = "Bind port")]
        port: Option<u16>,
        #[arg(long, help = "Question validation policy: strict, filter, lenient")]
        validation: Option<ValidationPolicy>,
    },

    /// Generate one quiz and print it
    Generate {
        #[arg(long, short, help = "Quiz topic")]
        topic: String,
        #[arg(short = 'n', long = "num-questions", help = "Number of questions")]
        count: Option<usize>,
        #[arg(long, short, help = "Language of questions and options")]
        language: Option<String>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
        #[arg(long, help = "Question validation policy: strict, filter, lenient")]
        validation: Option<ValidationPolicy>,
    },

    /// Play a quiz in the terminal
    Play {
        #[arg(long, short, help = "Quiz topic (prompted when omitted)")]
        topic: Option<String>,
        #[arg(short = 'n', long = "num-questions", help = "Number of questions")]
        count: Option<usize>,
        #[arg(long, short, help = "Language of questions and options")]
        language: Option<String>,
        #[arg(long, short, help = "Quiz server URL (default: generate in-process)")]
        server: Option<String>,
        #[arg(long, help = "Question validation policy: strict, filter, lenient")]
        validation: Option<ValidationPolicy>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write a default configuration file
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Load the layered config, then apply a `--validation` override
fn load_config(path: Option<&Path>, validation: Option<ValidationPolicy>) -> anyhow::Result<Config> {
    let mut config = ConfigLoader::load_with(path)?;
    if let Some(policy) = validation {
        config.quiz.validation = policy;
    }
    Ok(config)
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mquizgen encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Default hook prints the backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            validation,
        } => {
            let config = load_config(cli.config.as_deref(), validation)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::serve::run(config, host, port))?;
        }
        Commands::Generate {
            topic,
            count,
            language,
            format,
            validation,
        } => {
            let config = load_config(cli.config.as_deref(), validation)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::generate::run(
                config,
                &topic,
                count,
                language.as_deref(),
                &format,
            ))?;
        }
        Commands::Play {
            topic,
            count,
            language,
            server,
            validation,
        } => {
            let config = load_config(cli.config.as_deref(), validation)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::play::run(
                config,
                commands::play::PlayArgs {
                    topic,
                    count,
                    language,
                    server,
                },
            ))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                let config = ConfigLoader::load_with(cli.config.as_deref())?;
                commands::config::show(&config, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_flag_parses() {
        let cli = Cli::try_parse_from([
            "quizgen",
            "generate",
            "--topic",
            "Physics",
            "--validation",
            "Strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { validation, .. } => {
                assert_eq!(validation, Some(ValidationPolicy::Strict))
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_unknown_validation_is_rejected() {
        let result = Cli::try_parse_from(["quizgen", "serve", "--validation", "loose"]);
        assert!(result.is_err());
    }
}
