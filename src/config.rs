//! Configuration management for the combo handler patcher.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML config file
//! - Built-in default paths

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Backup copy the patch is read from
pub const DEFAULT_INPUT_PATH: &str = "electron/ipc-handlers.js.backup";

/// Handler file the patch is written to
pub const DEFAULT_OUTPUT_PATH: &str = "electron/ipc-handlers.js";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for the patcher
#[derive(Debug, Default, Parser)]
#[command(name = "fix-combo-handlers")]
#[command(about = "Replace duplicated combo IPC handlers with one clean set")]
#[command(version)]
pub struct Args {
    /// File to read the original handlers from
    #[arg(long, help = "Backup file to read (default: electron/ipc-handlers.js.backup)")]
    pub input: Option<PathBuf>,

    /// File the patched handlers are written to
    #[arg(long, help = "File to write (default: electron/ipc-handlers.js)")]
    pub output: Option<PathBuf>,

    /// TOML file providing defaults for the other options
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    /// Report what would be written without touching the output
    #[arg(long)]
    pub dry_run: bool,

    /// Log level for the patcher
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// Keys accepted in the config file
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub dry_run: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            dry_run: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    ///
    /// Command-line values win over the config file, which wins over the
    /// built-in defaults.
    pub fn from_args(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        let defaults = Config::default();

        Ok(Config {
            input_path: args.input.or(file.input).unwrap_or(defaults.input_path),
            output_path: args.output.or(file.output).unwrap_or(defaults.output_path),
            dry_run: args.dry_run,
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
        })
    }
}
