//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/quizgen/config.toml)
//! 3. Project config (./quizgen.toml) or an explicit `--config` file
//! 4. Environment variables (QUIZGEN_* prefix, `__` separates sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{QuizError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_with(None)
    }

    /// Same as [`ConfigLoader::load`], with `explicit` replacing the project
    /// config file when given.
    pub fn load_with(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(QuizError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                debug!("Loading config from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let project_path = Self::project_config_path();
                if project_path.exists() {
                    debug!("Loading project config from: {}", project_path.display());
                    figment = figment.merge(Toml::file(&project_path));
                }
            }
        }

        // e.g. QUIZGEN_LLM__MODEL -> llm.model
        figment = figment.merge(Env::prefixed("QUIZGEN_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| QuizError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| QuizError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Global config directory (~/.config/quizgen/ on Linux)
    pub fn global_dir() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("quizgen"))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn project_config_path() -> PathBuf {
        PathBuf::from("quizgen.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration as JSON or TOML
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| QuizError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default config to the global location
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let path = Self::global_config_path().ok_or_else(|| {
            QuizError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_default(&path, force)?;
        Ok(path)
    }

    /// Write the default config to ./quizgen.toml
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let path = Self::project_config_path();
        Self::write_default(&path, force)?;
        Ok(path)
    }

    /// Write the commented default config to `path`
    ///
    /// Returns `true` if the file was written, `false` if it already existed
    /// and `force` was not set.
    pub fn write_default(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, Self::default_config())?;
        info!("Created config: {}", path.display());
        Ok(true)
    }

    /// Default config content (TOML)
    fn default_config() -> String {
        r#"# quizgen Configuration
# Environment variables override these values, e.g. QUIZGEN_LLM__MODEL.

[server]
host = "127.0.0.1"
port = 5000

# Collaborator settings. The API key is read from GEMINI_API_KEY when unset.
[llm]
provider = "gemini"
model = "gemini-2.5-flash"
timeout_secs = 30
temperature = 0.5
max_output_tokens = 1024

[quiz]
default_questions = 15
max_questions = 50
default_language = "English"
# strict | filter | lenient
validation = "filter"

[player]
feedback_delay_ms = 700
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationPolicy;
    use figment::Jail;
    use tempfile::TempDir;

    /// Point the global config dir into the jail so a real user config
    /// never leaks into the result
    fn isolate(jail: &mut Jail) {
        let config_home = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", config_home.display());
    }

    #[test]
    fn test_load_default_config() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.llm.provider, "gemini");
            assert_eq!(config.quiz.default_language, "English");
            Ok(())
        });
    }

    #[test]
    fn test_default_template_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("quizgen.toml");

        assert!(ConfigLoader::write_default(&path, false).unwrap());
        assert!(!ConfigLoader::write_default(&path, false).unwrap());
        assert!(ConfigLoader::write_default(&path, true).unwrap());

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.quiz.validation, ValidationPolicy::Filter);
    }

    #[test]
    fn test_load_from_file_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quizgen.toml");
        fs::write(
            &path,
            "[server]\nport = 8080\n\n[quiz]\nvalidation = \"strict\"\ndefault_questions = 5\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.quiz.validation, ValidationPolicy::Strict);
        assert_eq!(config.quiz.default_questions, 5);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quizgen.toml");
        fs::write(&path, "[llm]\ntemperature = 9.0\n").unwrap();

        assert!(matches!(
            ConfigLoader::load_from_file(&path),
            Err(QuizError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let result = ConfigLoader::load_with(Some(Path::new("/nonexistent/quizgen.toml")));
            assert!(matches!(result, Err(QuizError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_project_file_then_env_override() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(
                "quizgen.toml",
                "[quiz]\ndefault_language = \"French\"\ndefault_questions = 5\n",
            )?;

            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.quiz.default_language, "French");
            assert_eq!(config.quiz.default_questions, 5);

            jail.set_env("QUIZGEN_QUIZ__DEFAULT_LANGUAGE", "German");
            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.quiz.default_language, "German");
            assert_eq!(config.quiz.default_questions, 5);
            Ok(())
        });
    }

    #[test]
    fn test_render_hides_api_key() {
        let mut config = Config::default();
        config.llm.api_key = Some("secret-key".to_string());

        let toml = ConfigLoader::render(&config, false).unwrap();
        assert!(toml.contains("[llm]"));
        assert!(!toml.contains("secret-key"));

        let json = ConfigLoader::render(&config, true).unwrap();
        assert!(json.contains("\"quiz\""));
    }
}
