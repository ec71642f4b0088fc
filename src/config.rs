//! Configuration management for execgraph
//!
//! All configuration is loaded from `./config/execgraph.toml`. Tunable
//! defaults live in the config template, not in source code. Edge strengths
//! are deliberately NOT configurable: they are fixed arbitration priorities,
//! and moving them into config would let two runs disagree on which
//! classification wins a pair.

use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/execgraph.toml";

/// Default configuration file content - the only place defaults exist
pub const DEFAULT_CONFIG: &str = include_str!("../config/execgraph.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },

    #[error("Configuration field '{field}' must be greater than zero")]
    ZeroLimit { field: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub mining: MiningConfig,
}

/// Input and output file locations
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Company roster JSON (companies with executive sub-records)
    pub roster_file: String,
    /// Bio atoms JSON keyed by "name|company"
    pub atoms_file: String,
    /// Canonical name override table JSON
    pub canonical_file: String,
    /// Directory for executives.json / relationships.json / CSV output
    pub output_dir: String,
}

/// Grouping caps and length filters for the mining pass
#[derive(Debug, Clone, Deserialize)]
pub struct MiningConfig {
    /// Executives per company considered for colleague pairing
    pub colleague_cap: usize,
    /// Members per school / former-employer / regulator group
    pub group_cap: usize,
    /// Minimum chars for a school name to be a meaningful identifier
    pub min_school_len: usize,
    /// Minimum chars for a former-employer name to group on
    pub min_company_len: usize,
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new(CONFIG_PATH))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("paths.roster_file", &self.paths.roster_file),
            ("paths.atoms_file", &self.paths.atoms_file),
            ("paths.canonical_file", &self.paths.canonical_file),
            ("paths.output_dir", &self.paths.output_dir),
        ] {
            if value.is_empty() {
                return Err(ConfigError::EmptyRequired {
                    field: field.to_string(),
                });
            }
        }
        if self.mining.colleague_cap == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "mining.colleague_cap".to_string(),
            });
        }
        if self.mining.group_cap == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "mining.group_cap".to_string(),
            });
        }
        Ok(())
    }

    /// Create default configuration file at the standard location
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = Path::new(CONFIG_PATH);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;
        Ok(path.to_path_buf())
    }

    /// Check if stdin is a TTY (interactive terminal)
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stdin)
    }

    /// Prompt user to create default config (only in interactive mode)
    pub fn prompt_create_config() -> Result<Option<PathBuf>, ConfigError> {
        if !Self::is_interactive() {
            return Ok(None);
        }

        print!("Configuration file not found. Create default config? [Y/n] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input.is_empty() || input == "y" || input == "yes" {
            let path = Self::create_default_config()?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }
}
