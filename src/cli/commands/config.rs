//! Config Command
//!
//! Manage quizgen configuration.
//!
//! Usage:
//!   quizgen config show [-f json]
//!   quizgen config path
//!   quizgen config init [-g] [--force]

use crate::cli::Output;
use crate::config::{Config, ConfigLoader};
use crate::types::Result;

/// Show the effective configuration (merged from all sources)
pub fn show(config: &Config, format: &str) -> Result<()> {
    println!("{}", ConfigLoader::render(config, format == "json")?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write the default configuration file
pub fn init(global: bool, force: bool) -> Result<()> {
    let output = Output::new();
    let path = if global {
        ConfigLoader::global_config_path()
    } else {
        Some(ConfigLoader::project_config_path())
    };

    if let Some(existing) = path.as_ref().filter(|p| p.exists() && !force) {
        output.info(&format!(
            "Config already exists at {} (use --force to overwrite)",
            existing.display()
        ));
        return Ok(());
    }

    let written = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };
    output.success(&format!(
        "Initialized {} configuration",
        if global { "global" } else { "project" }
    ));
    output.detail("Config", &written.display().to_string());
    Ok(())
}
