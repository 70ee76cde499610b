//! Secret Santa configuration file handling
//!
//! Provides default configuration generation and loading for the operator CLI.
//! Configuration files are TOML format and stored under the user's config
//! directory unless `--config` points elsewhere.
//!
//! Only search budgets and logging live here. Group data (participants,
//! restrictions, deadlines) always comes from the input documents.

use secret_santa::engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Operator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SantaConfig {
    /// Matching engine search budgets
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl SantaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: SantaConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Load from `path` if given, else from the default location if present,
    /// else fall back to built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml() -> String {
        let engine = EngineConfig::default();
        format!(
            r#"# Secret Santa Configuration (Operator Settings)
#
# Search budgets and logging only. Participants, restrictions and deadlines
# come from the group documents passed on the command line.

[engine]
# Uniform random shuffles tried before falling back to backtracking.
# 0 skips straight to backtracking.
max_random_attempts = {max_random_attempts}

# Backtracking node visits allowed before giving up with a timeout.
# A timeout is NOT a proof of impossibility; retry or raise this budget.
max_backtrack_steps = {max_backtrack_steps}

# Prove impossibility up front with a perfect-matching check.
precheck_feasibility = {precheck_feasibility}

[logging]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides)
level = "{level}"

# Log file path (optional, logs to stderr if not specified)
# file = "/var/log/secret-santa/secret-santa.log"
"#,
            max_random_attempts = engine.max_random_attempts,
            max_backtrack_steps = engine.max_backtrack_steps,
            precheck_feasibility = engine.precheck_feasibility,
            level = DEFAULT_LOG_LEVEL,
        )
    }

    /// Create and save a default configuration file
    pub fn create_default(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml();

        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }
}

/// Get the default config file path
///
/// - Linux: ~/.config/secret-santa/config.toml
/// - macOS: ~/Library/Application Support/secret-santa/config.toml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("secret-santa")
        .join("config.toml")
}
